// Report service - Builds chart datasets and the text report from configuration
use crate::domain::report::{
    ChartData, ChartKind, DataPoint, DateRange, PerformanceMetric, PeriodSummary, Report,
    SeriesData, WasteShare,
};
use crate::infrastructure::config::{PeriodConfig, ReportsConfig};

#[derive(Clone)]
pub struct ReportService {
    config: ReportsConfig,
}

fn summary(period: &PeriodConfig) -> PeriodSummary {
    PeriodSummary {
        period: period.period.clone(),
        collected: period.collected.clone(),
        routes: period.routes,
        vehicles: period.vehicles,
        co2: period.co2.clone(),
        efficiency: period.efficiency.clone(),
    }
}

impl ReportService {
    pub fn new(config: ReportsConfig) -> Self {
        Self { config }
    }

    fn color(&self, index: usize) -> String {
        if self.config.colors.is_empty() {
            return "#10b981".to_string();
        }
        self.config.colors[index % self.config.colors.len()].clone()
    }

    pub fn get_report(&self, range: DateRange) -> Report {
        Report {
            title: "Reports & Analytics".to_string(),
            range,
            summary: summary(&self.config.summary),
            periods: self.config.periods.iter().map(summary).collect(),
            charts: vec![self.daily_chart(), self.waste_chart(), self.zone_chart()],
            waste_types: self
                .config
                .waste_types
                .iter()
                .enumerate()
                .map(|(i, w)| WasteShare {
                    name: w.name.clone(),
                    share: w.share,
                    amount: w.amount.clone(),
                    color: self.color(i),
                })
                .collect(),
            metrics: self
                .config
                .metrics
                .iter()
                .map(|m| PerformanceMetric {
                    metric: m.metric.clone(),
                    value: m.value.clone(),
                    trend: m.trend.clone(),
                })
                .collect(),
        }
    }

    pub fn export_text(&self, range: DateRange, date: &str) -> String {
        let text = self.get_report(range).to_text(date);
        tracing::info!("Rendered {} report ({} bytes)", range, text.len());
        text
    }

    fn daily_chart(&self) -> ChartData {
        let daily = &self.config.daily;
        ChartData {
            id: "daily-collection".to_string(),
            title: "Daily Collection Trend".to_string(),
            kind: ChartKind::Line,
            series: vec![
                SeriesData {
                    id: "collected".to_string(),
                    name: "Collected (kg)".to_string(),
                    color: Some(self.color(0)),
                    dashed: false,
                    points: daily.iter().map(|d| DataPoint::new(&d.day, d.collected)).collect(),
                },
                SeriesData {
                    id: "target".to_string(),
                    name: "Target (kg)".to_string(),
                    color: Some(self.color(1)),
                    dashed: true,
                    points: daily.iter().map(|d| DataPoint::new(&d.day, d.target)).collect(),
                },
            ],
        }
    }

    fn waste_chart(&self) -> ChartData {
        ChartData {
            id: "waste-types".to_string(),
            title: "Waste Type Distribution".to_string(),
            kind: ChartKind::Pie,
            series: vec![SeriesData {
                id: "share".to_string(),
                name: "Share (%)".to_string(),
                color: None,
                dashed: false,
                points: self
                    .config
                    .waste_types
                    .iter()
                    .map(|w| DataPoint::new(&w.name, w.share as f64))
                    .collect(),
            }],
        }
    }

    fn zone_chart(&self) -> ChartData {
        let zones = &self.config.zones;
        ChartData {
            id: "zone-performance".to_string(),
            title: "Zone Performance".to_string(),
            kind: ChartKind::Bar,
            series: vec![
                SeriesData {
                    id: "collected".to_string(),
                    name: "Collected (kg)".to_string(),
                    color: Some(self.color(0)),
                    dashed: false,
                    points: zones.iter().map(|z| DataPoint::new(&z.zone, z.collected)).collect(),
                },
                SeriesData {
                    id: "efficiency".to_string(),
                    name: "Efficiency (%)".to_string(),
                    color: Some(self.color(2)),
                    dashed: false,
                    points: zones.iter().map(|z| DataPoint::new(&z.zone, z.efficiency)).collect(),
                },
            ],
        }
    }
}
