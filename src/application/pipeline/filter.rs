// Filter engine: apply the viewer's month/device selection
use crate::domain::selection::FilterSelection;
use crate::domain::series::CombinedRecord;

/// Rows of `table` in the selected month (and device, unless all devices are
/// selected), stably sorted by timestamp.
pub fn filter<M: Clone>(table: &[CombinedRecord<M>], selection: &FilterSelection) -> Vec<CombinedRecord<M>> {
    let mut rows: Vec<CombinedRecord<M>> = table
        .iter()
        .filter(|row| row.month == selection.month && selection.device.matches(&row.device_id))
        .cloned()
        .collect();

    rows.sort_by_key(|row| row.timestamp);

    tracing::debug!(
        "Filter {} / {} kept {} of {} rows",
        selection.month,
        selection.device,
        rows.len(),
        table.len()
    );
    rows
}
