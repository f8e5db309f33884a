// Reading domain models: one typed observation per report row
use super::month::Month;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// A record exactly as the reporting API returned it
pub type RawRecord = Map<String, Value>;

pub type Timestamp = DateTime<FixedOffset>;

/// The numeric payload of one report row, together with the keys it is read from.
pub trait Measurement: Clone + std::fmt::Debug {
    /// Key holding the row's timestamp (`hour` or `date`)
    const TIMESTAMP_FIELD: &'static str;
    const VALUE_FIELD: &'static str;

    fn from_value(value: f64) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyEnergy {
    pub energy_per_hour: f64,
}

impl Measurement for HourlyEnergy {
    const TIMESTAMP_FIELD: &'static str = "hour";
    const VALUE_FIELD: &'static str = "energyPerHour";

    fn from_value(value: f64) -> Self {
        Self {
            energy_per_hour: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyActivePower {
    pub active_power_per_hour: f64,
}

impl Measurement for HourlyActivePower {
    const TIMESTAMP_FIELD: &'static str = "hour";
    const VALUE_FIELD: &'static str = "activePowerPerHour";

    fn from_value(value: f64) -> Self {
        Self {
            active_power_per_hour: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAveragePower {
    pub avg_power_per_day: f64,
}

impl Measurement for DailyAveragePower {
    const TIMESTAMP_FIELD: &'static str = "date";
    const VALUE_FIELD: &'static str = "avgPowerPerDay";

    fn from_value(value: f64) -> Self {
        Self {
            avg_power_per_day: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyActiveEnergy {
    pub active_energy_per_day: f64,
}

impl Measurement for DailyActiveEnergy {
    const TIMESTAMP_FIELD: &'static str = "date";
    const VALUE_FIELD: &'static str = "activeEnergyPerDay";

    fn from_value(value: f64) -> Self {
        Self {
            active_energy_per_day: value,
        }
    }
}

/// The two value channels of the consumption-analysis report. A row carries
/// exactly one of them, depending on which sub-series it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DailyMeasurement {
    AveragePower(DailyAveragePower),
    ActiveEnergy(DailyActiveEnergy),
}

impl DailyMeasurement {
    pub fn avg_power_per_day(&self) -> Option<f64> {
        match self {
            DailyMeasurement::AveragePower(m) => Some(m.avg_power_per_day),
            DailyMeasurement::ActiveEnergy(_) => None,
        }
    }

    pub fn active_energy_per_day(&self) -> Option<f64> {
        match self {
            DailyMeasurement::ActiveEnergy(m) => Some(m.active_energy_per_day),
            DailyMeasurement::AveragePower(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading<M> {
    pub device_id: Option<String>,
    pub timestamp: Timestamp,
    pub month: Month,
    pub measurement: M,
}

impl<M> Reading<M> {
    pub fn new(device_id: Option<String>, timestamp: Timestamp, measurement: M) -> Self {
        Self {
            device_id,
            month: Month::of(&timestamp),
            timestamp,
            measurement,
        }
    }

    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> Reading<N> {
        Reading {
            device_id: self.device_id,
            timestamp: self.timestamp,
            month: self.month,
            measurement: f(self.measurement),
        }
    }
}

/// Interpret a JSON value as a number. Numeric strings are accepted since
/// decimal columns are often serialized as text.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(5)), Some(5.0));
        assert_eq!(as_number(&json!(2.5)), Some(2.5));
        assert_eq!(as_number(&json!("12.75")), Some(12.75));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!(null)), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn test_reading_derives_month() {
        let ts = DateTime::parse_from_rfc3339("2024-03-10T10:00:00Z").unwrap();
        let reading = Reading::new(Some("d1".to_string()), ts, HourlyEnergy::from_value(4.0));
        assert_eq!(reading.month.to_string(), "2024-03");
        assert_eq!(reading.measurement.energy_per_hour, 4.0);
    }
}
