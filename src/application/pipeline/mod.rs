// Report pipelines: normalize -> combine -> color -> filter -> chart
pub mod charts;
pub mod combiner;
pub mod filter;
pub mod normalizer;
pub mod palette;

use crate::domain::chart::ChartSpec;
use crate::domain::reading::{
    DailyActiveEnergy, DailyAveragePower, DailyMeasurement, HourlyActivePower, HourlyEnergy,
};
use crate::domain::report::{ActivePowerPayload, ConsumptionAnalysisPayload, ConsumptionPatternsPayload};
use crate::domain::selection::FilterSelection;
use crate::domain::series::SeriesKind;
use crate::error::PipelineError;
use combiner::combine;
use filter::filter;
use normalizer::normalize;
use palette::{ColorMap, Palette};

/// Peak hours are concatenated before lowest hours, so peak series take the
/// earlier palette colors.
pub fn consumption_patterns(
    payload: &ConsumptionPatternsPayload,
    selection: &FilterSelection,
    palette: &Palette,
) -> Result<ChartSpec, PipelineError> {
    let peak = normalize::<HourlyEnergy>(&payload.peak_hours)?;
    let lowest = normalize::<HourlyEnergy>(&payload.lowest_hours)?;
    let combined = combine(vec![(SeriesKind::PeakHours, peak), (SeriesKind::LowestHours, lowest)])?;

    let colors = ColorMap::assign(combined.iter().map(|r| r.device_type.as_str()), palette);
    let rows = filter(&combined, selection);

    Ok(charts::consumption_patterns_chart(
        &rows,
        &colors,
        palette,
        payload.average_consumption,
    ))
}

pub fn active_power(
    payload: &ActivePowerPayload,
    selection: &FilterSelection,
    palette: &Palette,
) -> Result<ChartSpec, PipelineError> {
    let readings = normalize::<HourlyActivePower>(&payload.0)?;
    let combined = combine(vec![(SeriesKind::ActivePower, readings)])?;

    let colors = ColorMap::assign(combined.iter().map(|r| r.device_id.as_str()), palette);
    let rows = filter(&combined, selection);

    Ok(charts::active_power_chart(&rows, &colors, palette))
}

/// Average power is concatenated before active energy.
pub fn consumption_analysis(
    payload: &ConsumptionAnalysisPayload,
    selection: &FilterSelection,
    palette: &Palette,
) -> Result<ChartSpec, PipelineError> {
    let power: Vec<_> = normalize::<DailyAveragePower>(&payload.avg_power_per_day)?
        .into_iter()
        .map(|r| r.map(DailyMeasurement::AveragePower))
        .collect();
    let energy: Vec<_> = normalize::<DailyActiveEnergy>(&payload.active_energy_per_day)?
        .into_iter()
        .map(|r| r.map(DailyMeasurement::ActiveEnergy))
        .collect();
    let combined = combine(vec![(SeriesKind::AvgPowerPerDay, power), (SeriesKind::ActiveEnergy, energy)])?;

    let colors = ColorMap::assign(combined.iter().map(|r| r.device_type.as_str()), palette);
    let rows = filter(&combined, selection);

    Ok(charts::consumption_analysis_chart(&rows, &colors, palette))
}
