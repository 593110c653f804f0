// Dashboard domain model
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityRow {
    pub zone: String,
    pub collected: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub kind: String,
    pub title: String,
    pub message: String,
    pub time: String,
}

/// Counts derived from the entity stores at request time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSummary {
    pub collection_points: usize,
    pub critical_points: usize,
    pub employees: usize,
    pub available_employees: usize,
    pub routes: usize,
    pub routes_in_progress: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub stats: Vec<StatCard>,
    pub activity: Vec<ActivityRow>,
    pub alerts: Vec<Alert>,
    pub live: LiveSummary,
}

impl Dashboard {
    pub fn new(
        stats: Vec<StatCard>,
        activity: Vec<ActivityRow>,
        alerts: Vec<Alert>,
        live: LiveSummary,
    ) -> Self {
        Self {
            title: "Dashboard".to_string(),
            stats,
            activity,
            alerts,
            live,
        }
    }
}
