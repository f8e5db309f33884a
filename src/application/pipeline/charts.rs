// Chart builders: filtered tables into chart specifications
use super::palette::{ColorMap, Palette};
use crate::domain::chart::{ChartKind, ChartSpec, ReferenceLine, SeriesSpec};
use crate::domain::reading::{DailyMeasurement, HourlyActivePower, HourlyEnergy, Timestamp};
use crate::domain::series::CombinedRecord;

const LEGEND_TITLE: &str = "Dispositivos";
const AVERAGE_LABEL: &str = "Média";
const AVERAGE_COLOR: &str = "firebrick";

pub const CONSUMPTION_PATTERNS_ID: &str = "consumption-patterns";
pub const ACTIVE_POWER_ID: &str = "active-power";
pub const CONSUMPTION_ANALYSIS_ID: &str = "consumption-analysis";

/// Grouped bars of hourly energy per device/series, with a dashed line at
/// the report's average consumption when the report provides one.
pub fn consumption_patterns_chart(
    rows: &[CombinedRecord<HourlyEnergy>],
    colors: &ColorMap,
    palette: &Palette,
    average_consumption: Option<f64>,
) -> ChartSpec {
    let mut chart = ChartSpec::new(
        CONSUMPTION_PATTERNS_ID,
        "Padrões de Consumo: Horários de Pico e Menor Uso (Wh)",
        ChartKind::GroupedBar,
    )
    .axes("Hora (h)", "Energia Consumida (Wh)")
    .legend(LEGEND_TITLE);

    chart.series = group_series(
        rows,
        |row| row.device_type.as_str(),
        |row| Some(row.measurement.energy_per_hour),
        colors,
        palette,
    );

    if let Some(average) = average_consumption {
        let domain = x_domain(rows);
        if !domain.is_empty() {
            chart
                .overlays
                .push(ReferenceLine::constant(AVERAGE_LABEL, AVERAGE_COLOR, average, domain));
        }
    }

    chart
}

/// One line per device of its average active power per hour
pub fn active_power_chart(
    rows: &[CombinedRecord<HourlyActivePower>],
    colors: &ColorMap,
    palette: &Palette,
) -> ChartSpec {
    let mut chart = ChartSpec::new(
        ACTIVE_POWER_ID,
        "Comparação da Potência Ativa Média entre dispositivos (W/h)",
        ChartKind::Line,
    )
    .axes("Hora (h)", "Potência ativa média(W)")
    .legend(LEGEND_TITLE);

    chart.series = group_series(
        rows,
        |row| row.device_id.as_str(),
        |row| Some(row.measurement.active_power_per_hour),
        colors,
        palette,
    );

    chart
}

/// Grouped bars of daily active energy and average power per device/series.
/// Each device/series gets one bar series per channel it carries.
pub fn consumption_analysis_chart(
    rows: &[CombinedRecord<DailyMeasurement>],
    colors: &ColorMap,
    palette: &Palette,
) -> ChartSpec {
    let mut chart = ChartSpec::new(
        CONSUMPTION_ANALYSIS_ID,
        "Consumo de energia e potência ativa ao longo do tempo",
        ChartKind::GroupedBar,
    )
    .axes("Dia", "Energia Consumida (W)")
    .legend(LEGEND_TITLE);

    let mut energy = group_series(
        rows,
        |row| row.device_type.as_str(),
        |row| row.measurement.active_energy_per_day(),
        colors,
        palette,
    );
    let mut power = group_series(
        rows,
        |row| row.device_type.as_str(),
        |row| row.measurement.avg_power_per_day(),
        colors,
        palette,
    );

    // Legend order follows the first appearance of each device/series; within
    // one, the energy channel comes before the power channel.
    for key in first_seen(rows) {
        for (channel, series) in [("activeEnergyPerDay", &mut energy), ("avgPowerPerDay", &mut power)] {
            if let Some(position) = series.iter().position(|s| s.name == key) {
                chart.series.push(series.remove(position).with_channel(channel));
            }
        }
    }

    chart
}

/// Split rows into one series per key, in the order keys first appear.
/// Rows where `value` yields nothing are skipped, and so are keys left
/// without any point.
fn group_series<M>(
    rows: &[CombinedRecord<M>],
    key: impl Fn(&CombinedRecord<M>) -> &str,
    value: impl Fn(&CombinedRecord<M>) -> Option<f64>,
    colors: &ColorMap,
    palette: &Palette,
) -> Vec<SeriesSpec> {
    let mut series: Vec<SeriesSpec> = Vec::new();
    for row in rows {
        let Some(y) = value(row) else { continue };
        let name = key(row);
        let index = match series.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                let color = colors.color_for(name, palette).to_string();
                series.push(SeriesSpec::new(name.to_string(), color));
                series.len() - 1
            }
        };
        series[index].push(row.timestamp, y);
    }
    series
}

fn first_seen(rows: &[CombinedRecord<DailyMeasurement>]) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for row in rows {
        let key = row.device_type.as_str();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Distinct timestamps of the rows, ascending
fn x_domain<M>(rows: &[CombinedRecord<M>]) -> Vec<Timestamp> {
    let mut domain: Vec<Timestamp> = rows.iter().map(|row| row.timestamp).collect();
    domain.sort();
    domain.dedup();
    domain
}
