// Series combiner: tag sub-series and concatenate them into one table
use crate::domain::reading::Reading;
use crate::domain::series::{CombinedRecord, DeviceType, SeriesKind};
use crate::error::PipelineError;

/// Concatenate the sub-series in the order given, tagging each row with its
/// kind and deriving its [`DeviceType`]. The order of `parts` decides the
/// first-seen order later used for color assignment.
pub fn combine<M>(parts: Vec<(SeriesKind, Vec<Reading<M>>)>) -> Result<Vec<CombinedRecord<M>>, PipelineError> {
    let total: usize = parts.iter().map(|(_, rows)| rows.len()).sum();
    let mut combined = Vec::with_capacity(total);

    for (kind, rows) in parts {
        for (index, reading) in rows.into_iter().enumerate() {
            let device_id = reading
                .device_id
                .ok_or(PipelineError::MissingDeviceId { series: kind, index })?;

            combined.push(CombinedRecord {
                device_type: DeviceType::new(&device_id, kind),
                device_id,
                series_kind: kind,
                timestamp: reading.timestamp,
                month: reading.month,
                measurement: reading.measurement,
            });
        }
    }

    tracing::debug!("Combined {} rows", combined.len());
    Ok(combined)
}
