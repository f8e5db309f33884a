// Domain layer - Readings, selections and chart models
pub mod chart;
pub mod dashboard;
pub mod month;
pub mod reading;
pub mod report;
pub mod selection;
pub mod series;
