// Report and chart domain models
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Quarter => "quarter",
            DateRange::Year => "year",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "quarter" => Ok(DateRange::Quarter),
            "year" => Ok(DateRange::Year),
            other => Err(format!("unknown date range: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: String,
    pub collected: String,
    pub routes: u32,
    pub vehicles: u32,
    pub co2: String,
    pub efficiency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub dashed: bool,
    pub points: Vec<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WasteShare {
    pub name: String,
    /// Percentage of the total
    pub share: u32,
    pub amount: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetric {
    pub metric: String,
    pub value: String,
    pub trend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub range: DateRange,
    pub summary: PeriodSummary,
    pub periods: Vec<PeriodSummary>,
    pub charts: Vec<ChartData>,
    pub waste_types: Vec<WasteShare>,
    pub metrics: Vec<PerformanceMetric>,
}

impl Report {
    /// Plain-text rendition offered as a download
    pub fn to_text(&self, date: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("Waste Management Report - {}\n", date));
        out.push_str("================================================\n\n");
        out.push_str(&format!("Period: {}\n\n", self.range));

        out.push_str("Summary:\n");
        out.push_str(&format!("- Total Collected: {}\n", self.summary.collected));
        out.push_str(&format!("- Routes Completed: {}\n", self.summary.routes));
        out.push_str(&format!("- Vehicles Used: {}\n", self.summary.vehicles));
        out.push_str(&format!("- CO₂ Emissions: {}\n", self.summary.co2));
        out.push_str(&format!("- Efficiency: {}\n\n", self.summary.efficiency));

        out.push_str("Waste Type Distribution:\n");
        for waste in &self.waste_types {
            out.push_str(&format!("- {}: {} ({}%)\n", waste.name, waste.amount, waste.share));
        }

        out.push_str("\nPerformance Metrics:\n");
        for metric in &self.metrics {
            out.push_str(&format!("- {}: {}\n", metric.metric, metric.value));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        let summary = PeriodSummary {
            period: "This Month".to_string(),
            collected: "378,950 kg".to_string(),
            routes: 248,
            vehicles: 12,
            co2: "1,287.4 kg".to_string(),
            efficiency: "89%".to_string(),
        };
        Report {
            title: "Reports & Analytics".to_string(),
            range: DateRange::Quarter,
            summary: summary.clone(),
            periods: vec![summary],
            charts: Vec::new(),
            waste_types: vec![WasteShare {
                name: "Plastic".to_string(),
                share: 35,
                amount: "34,560 kg".to_string(),
                color: "#10b981".to_string(),
            }],
            metrics: vec![PerformanceMetric {
                metric: "Route Efficiency".to_string(),
                value: "94%".to_string(),
                trend: "+2%".to_string(),
            }],
        }
    }

    #[test]
    fn test_text_report_sections() {
        let text = report().to_text("10/19/2026");

        assert!(text.starts_with("Waste Management Report - 10/19/2026\n"));
        assert!(text.contains("Period: quarter\n"));
        assert!(text.contains("- Total Collected: 378,950 kg\n"));
        assert!(text.contains("- Plastic: 34,560 kg (35%)\n"));
        assert!(text.ends_with("- Route Efficiency: 94%\n"));
    }

    #[test]
    fn test_date_range_parsing() {
        assert_eq!("year".parse::<DateRange>(), Ok(DateRange::Year));
        assert!("decade".parse::<DateRange>().is_err());
        assert_eq!(DateRange::default(), DateRange::Month);
    }
}
