// Chart specification handed to the rendering host
use super::reading::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    GroupedBar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineDash {
    Dash,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    /// Legend label
    pub name: String,
    /// Value field plotted, for charts with several channels per legend entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub color: String,
    pub x: Vec<Timestamp>,
    pub y: Vec<f64>,
}

impl SeriesSpec {
    pub fn new(name: String, color: String) -> Self {
        Self {
            name,
            channel: None,
            color,
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    pub fn push(&mut self, x: Timestamp, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Constant-value line drawn over a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLine {
    pub name: String,
    pub color: String,
    pub width: u32,
    pub dash: LineDash,
    pub x: Vec<Timestamp>,
    pub y: Vec<f64>,
}

impl ReferenceLine {
    pub fn constant(name: &str, color: &str, value: f64, x: Vec<Timestamp>) -> Self {
        let y = vec![value; x.len()];
        Self {
            name: name.to_string(),
            color: color.to_string(),
            width: 2,
            dash: LineDash::Dash,
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
    pub show_legend: bool,
    pub series: Vec<SeriesSpec>,
    pub overlays: Vec<ReferenceLine>,
}

impl ChartSpec {
    pub fn new(id: &str, title: &str, kind: ChartKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            x_axis_title: String::new(),
            y_axis_title: String::new(),
            legend_title: String::new(),
            show_legend: true,
            series: Vec::new(),
            overlays: Vec::new(),
        }
    }

    pub fn axes(mut self, x_axis_title: &str, y_axis_title: &str) -> Self {
        self.x_axis_title = x_axis_title.to_string();
        self.y_axis_title = y_axis_title.to_string();
        self
    }

    pub fn legend(mut self, legend_title: &str) -> Self {
        self.legend_title = legend_title.to_string();
        self.show_legend = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(SeriesSpec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_reference_line_is_constant() {
        let x = vec![
            DateTime::parse_from_rfc3339("2024-01-01T03:00:00Z").unwrap(),
            DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap(),
        ];
        let line = ReferenceLine::constant("Média", "firebrick", 3.0, x);
        assert_eq!(line.y, vec![3.0, 3.0]);
        assert_eq!(line.dash, LineDash::Dash);
        assert_eq!(line.width, 2);
    }

    #[test]
    fn test_serialized_shape() {
        let mut series = SeriesSpec::new("d1 - Peak Hours".to_string(), "#636EFA".to_string());
        series.push(DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap(), 5.0);

        let mut chart = ChartSpec::new("consumption-patterns", "Padrões", ChartKind::GroupedBar)
            .axes("Hora (h)", "Energia Consumida (Wh)")
            .legend("Dispositivos");
        chart.series.push(series);

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "groupedBar");
        assert_eq!(json["xAxisTitle"], "Hora (h)");
        assert_eq!(json["showLegend"], true);
        assert!(json["series"][0]["x"][0]
            .as_str()
            .unwrap()
            .starts_with("2024-01-01T10:00:00"));
        assert!(json["series"][0].get("channel").is_none());
    }
}
