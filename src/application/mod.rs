// Application layer - Use cases and the report pipelines
pub mod dashboard_service;
pub mod options_service;
pub mod pipeline;
pub mod report_source;
