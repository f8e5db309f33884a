// Category color assignment
use std::collections::{HashMap, HashSet};

/// Plotly's default qualitative palette
pub const PLOTLY: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52",
];

/// Ordered, non-empty list of colors cycled by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: PLOTLY.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Key to color mapping, built from the order keys are first seen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    pub fn assign<'a, I>(keys: I, palette: &Palette) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for key in keys {
            if seen.insert(key) {
                order.push(key.to_string());
            }
        }

        tracing::debug!("Assigned colors to {} categories", order.len());
        let colors = order
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key, palette.color(i).to_string()))
            .collect();

        Self { colors }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Color for `key`, or the first palette color if the key was never assigned
    pub fn color_for<'a>(&'a self, key: &str, palette: &'a Palette) -> &'a str {
        self.get(key).unwrap_or_else(|| palette.color(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_not_sorted_order() {
        let palette = Palette::default();
        let map = ColorMap::assign(["z", "a", "z", "m", "a"], &palette);

        assert_eq!(map.get("y"), None);
        assert_eq!(map.get("z"), Some("#636EFA"));
        assert_eq!(map.get("a"), Some("#EF553B"));
        assert_eq!(map.get("m"), Some("#00CC96"));
    }

    #[test]
    fn test_palette_cycles() {
        let palette = Palette::new(vec!["red".to_string(), "blue".to_string()]).unwrap();
        let map = ColorMap::assign(["k0", "k1", "k2", "k3", "k4"], &palette);

        assert_eq!(map.get("k0"), Some("red"));
        assert_eq!(map.get("k1"), Some("blue"));
        assert_eq!(map.get("k2"), Some("red"));
        assert_eq!(map.get("k4"), Some("red"));
    }

    #[test]
    fn test_deterministic() {
        let palette = Palette::default();
        let keys = ["d1 - Peak Hours", "d2 - Peak Hours", "d1 - Lowest Hours"];
        assert_eq!(ColorMap::assign(keys, &palette), ColorMap::assign(keys, &palette));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(vec![]).is_none());
        let palette = Palette::default();
        assert_eq!(palette.color(10), palette.color(0));
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let palette = Palette::default();
        let map = ColorMap::assign(std::iter::empty(), &palette);
        assert_eq!(map.get("missing"), None);
        assert_eq!(map.color_for("missing", &palette), "#636EFA");
    }
}
