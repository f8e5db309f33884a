// Filter selection chosen by the dashboard viewer
use super::month::Month;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device choice shown as "Todos" that disables the device filter
pub const ALL_DEVICES: &str = "Todos";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum DeviceSelection {
    #[default]
    All,
    Device(String),
}

impl DeviceSelection {
    /// Blank input and the "Todos" sentinel both mean all devices
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_DEVICES {
            DeviceSelection::All
        } else {
            DeviceSelection::Device(value.to_string())
        }
    }

    pub fn matches(&self, device_id: &str) -> bool {
        match self {
            DeviceSelection::All => true,
            DeviceSelection::Device(id) => id == device_id,
        }
    }
}

impl fmt::Display for DeviceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelection::All => f.write_str(ALL_DEVICES),
            DeviceSelection::Device(id) => f.write_str(id),
        }
    }
}

impl From<DeviceSelection> for String {
    fn from(selection: DeviceSelection) -> Self {
        selection.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub month: Month,
    pub device: DeviceSelection,
}

impl FilterSelection {
    pub fn new(month: Month, device: DeviceSelection) -> Self {
        Self { month, device }
    }
}

/// Months and devices the reporting API has data for
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectionOptions {
    pub months: Vec<Month>,
    pub devices: Vec<String>,
}

impl SelectionOptions {
    /// Device choices as offered to the viewer, sentinel first
    pub fn device_choices(&self) -> Vec<String> {
        std::iter::once(ALL_DEVICES.to_string())
            .chain(self.devices.iter().cloned())
            .collect()
    }

    pub fn default_selection(&self) -> Option<FilterSelection> {
        self.months
            .first()
            .map(|month| FilterSelection::new(*month, DeviceSelection::All))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_selection() {
        assert_eq!(DeviceSelection::parse("Todos"), DeviceSelection::All);
        assert_eq!(DeviceSelection::parse("  "), DeviceSelection::All);
        assert_eq!(
            DeviceSelection::parse("d1"),
            DeviceSelection::Device("d1".to_string())
        );
    }

    #[test]
    fn test_matches() {
        assert!(DeviceSelection::All.matches("anything"));
        let d1 = DeviceSelection::Device("d1".to_string());
        assert!(d1.matches("d1"));
        assert!(!d1.matches("d2"));
    }

    #[test]
    fn test_options_from_api_payload() {
        let options: SelectionOptions = serde_json::from_value(serde_json::json!({
            "months": ["2024-01", "2024-02"],
            "devices": ["d1", "d2"]
        }))
        .unwrap();

        assert_eq!(options.device_choices(), vec!["Todos", "d1", "d2"]);
        let selection = options.default_selection().unwrap();
        assert_eq!(selection.month.to_string(), "2024-01");
        assert_eq!(selection.device, DeviceSelection::All);
    }

    #[test]
    fn test_no_default_without_months() {
        let options = SelectionOptions {
            months: vec![],
            devices: vec!["d1".to_string()],
        };
        assert!(options.default_selection().is_none());
    }
}
