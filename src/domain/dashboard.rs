// Dashboard domain model
use super::chart::ChartSpec;
use super::selection::FilterSelection;
use serde::Serialize;

/// One full-width row on top, two half-width charts below.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    pub top: ChartSpec,
    pub bottom_left: ChartSpec,
    pub bottom_right: ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub title: String,
    pub subtitle: String,
    pub selection: FilterSelection,
    pub layout: DashboardLayout,
}

impl Dashboard {
    pub fn new(title: String, selection: FilterSelection, layout: DashboardLayout) -> Self {
        let subtitle = format!("Dispositivo: {} | Mês: {}", selection.device, selection.month);
        Self {
            title,
            subtitle,
            selection,
            layout,
        }
    }

    pub fn charts(&self) -> [&ChartSpec; 3] {
        [&self.layout.top, &self.layout.bottom_left, &self.layout.bottom_right]
    }
}
