// Series tagging: sub-series kinds and the composite device/series key
use super::month::Month;
use super::reading::Timestamp;
use serde::Serialize;
use std::fmt;

/// Origin of a row within a report that plots several sub-series together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesKind {
    PeakHours,
    LowestHours,
    AvgPowerPerDay,
    ActiveEnergy,
    ActivePower,
}

impl SeriesKind {
    pub fn label(&self) -> &'static str {
        match self {
            SeriesKind::PeakHours => "Peak Hours",
            SeriesKind::LowestHours => "Lowest Hours",
            SeriesKind::AvgPowerPerDay => "avg_power_per_day",
            SeriesKind::ActiveEnergy => "active_energy",
            SeriesKind::ActivePower => "active_power",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const DEVICE_TYPE_SEPARATOR: &str = " - ";

/// Composite `deviceId - seriesKind` key used for filtering and coloring
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DeviceType(String);

impl DeviceType {
    pub fn new(device_id: &str, kind: SeriesKind) -> Self {
        Self(format!("{}{}{}", device_id, DEVICE_TYPE_SEPARATOR, kind.label()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord<M> {
    pub device_id: String,
    pub series_kind: SeriesKind,
    pub device_type: DeviceType,
    pub timestamp: Timestamp,
    pub month: Month,
    pub measurement: M,
}
