// Error types for the report pipeline and the dashboard render cycle
use crate::domain::report::ReportKind;
use crate::domain::series::SeriesKind;
use serde::Serialize;
use thiserror::Error;

/// Raised by the normalizer and combiner when a payload does not have the
/// shape the charts need. Always fatal to the render cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("malformed timestamp in field `{field}` of record {index}: {value}")]
    MalformedTimestamp {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("record {index} is missing field `{field}`")]
    MissingField { field: &'static str, index: usize },

    #[error("field `{field}` of record {index} is not numeric: {value}")]
    InvalidNumber {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("record {index} of series `{series}` has no deviceId")]
    MissingDeviceId { series: SeriesKind, index: usize },
}

/// Failure to obtain a report payload from the reporting API.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("request for {report} failed: {source}")]
    Request {
        report: ReportKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{report} returned status {status}: {body}")]
    Status {
        report: ReportKind,
        status: u16,
        body: String,
    },

    #[error("{report} did not answer within {secs}s")]
    Timeout { report: ReportKind, secs: u64 },

    #[error("{report} payload could not be decoded: {source}")]
    Decode {
        report: ReportKind,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn report(&self) -> ReportKind {
        match self {
            ReportError::Request { report, .. }
            | ReportError::Status { report, .. }
            | ReportError::Timeout { report, .. }
            | ReportError::Decode { report, .. } => *report,
        }
    }
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] ReportError),

    #[error("{report} payload is malformed: {source}")]
    Pipeline {
        report: ReportKind,
        #[source]
        source: PipelineError,
    },

    #[error("no months available for selection")]
    NoMonthsAvailable,
}

/// Coarse classification surfaced to the dashboard viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadErrorKind {
    Fetch,
    Timeout,
    Malformed,
}

impl DashboardError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            DashboardError::Load(ReportError::Timeout { .. }) => LoadErrorKind::Timeout,
            DashboardError::Load(ReportError::Decode { .. }) => LoadErrorKind::Malformed,
            DashboardError::Load(_) => LoadErrorKind::Fetch,
            DashboardError::Pipeline { .. } => LoadErrorKind::Malformed,
            DashboardError::NoMonthsAvailable => LoadErrorKind::Malformed,
        }
    }

    pub fn report(&self) -> Option<ReportKind> {
        match self {
            DashboardError::Load(e) => Some(e.report()),
            DashboardError::Pipeline { report, .. } => Some(*report),
            DashboardError::NoMonthsAvailable => Some(ReportKind::DevicesAndMonths),
        }
    }
}
