use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub downloads: DownloadSettings,
    pub map: MapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
    pub log_filter: String,
}

/// File name patterns with `${date}` / `${type}` placeholders
#[derive(Debug, Deserialize, Clone)]
pub struct DownloadSettings {
    pub report_file: String,
    pub export_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub fit_padding: u32,
    pub tile_url: String,
    pub attribution: String,
    pub stylesheet_url: String,
    pub script_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub stats: Vec<StatConfig>,
    #[serde(default)]
    pub activity: Vec<ActivityConfig>,
    #[serde(default)]
    pub alerts: Vec<AlertConfig>,
    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatConfig {
    pub title: String,
    pub value: String,
    pub change: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ActivityConfig {
    pub zone: String,
    pub collected: String,
    pub status: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    pub kind: String,
    pub title: String,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    #[serde(default)]
    pub colors: Vec<String>,
    pub summary: PeriodConfig,
    #[serde(default)]
    pub periods: Vec<PeriodConfig>,
    #[serde(default)]
    pub daily: Vec<DailyConfig>,
    #[serde(default)]
    pub waste_types: Vec<WasteTypeConfig>,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PeriodConfig {
    #[serde(default)]
    pub period: String,
    pub collected: String,
    pub routes: u32,
    pub vehicles: u32,
    pub co2: String,
    pub efficiency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DailyConfig {
    pub day: String,
    pub collected: f64,
    pub target: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WasteTypeConfig {
    pub name: String,
    pub share: u32,
    pub amount: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZoneConfig {
    pub zone: String,
    pub collected: f64,
    pub efficiency: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricConfig {
    pub metric: String,
    pub value: String,
    pub trend: String,
}

impl MapSettings {
    /// Reject zoom limits the map cannot honour
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_zoom > self.max_zoom {
            anyhow::bail!(
                "map.min_zoom ({}) is greater than map.max_zoom ({})",
                self.min_zoom,
                self.max_zoom
            );
        }
        Ok(())
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(
            config::Environment::with_prefix("WASTEHUB")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let server: ServerConfig = settings.try_deserialize()?;
    server.map.validate()?;
    Ok(server)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace `${name}` placeholders in a template string
pub fn prepare_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_template() {
        let mut vars = HashMap::new();
        vars.insert("type".to_string(), "routes".to_string());
        vars.insert("date".to_string(), "2026-10-19".to_string());

        let result = prepare_template("waste_management_${type}_${date}.xml", &vars);

        assert_eq!(result, "waste_management_routes_2026-10-19.xml");
    }

    #[test]
    fn test_inverted_zoom_limits_are_rejected() {
        let text = fixtures::SERVER_TOML.replace("min_zoom = 0", "min_zoom = 20");
        let err = fixtures::server_config_from_str(&text).unwrap_err();

        assert!(err.to_string().contains("min_zoom (20) is greater than map.max_zoom (19)"));
    }

    #[test]
    fn test_shipped_config_files_parse() {
        let server = fixtures::server_config();
        assert_eq!(server.map.max_zoom, 19);
        assert_eq!(server.downloads.report_file, "waste-report-${date}.txt");

        let dashboard = fixtures::dashboard_config();
        assert_eq!(dashboard.stats.len(), 4);
        assert_eq!(dashboard.alerts[0].title, "Container Full");
        assert_eq!(dashboard.reports.daily.len(), 7);
        assert_eq!(dashboard.reports.summary.routes, 248);
    }
}
