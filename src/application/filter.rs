// Filter/search over a record list
use crate::domain::record::Record;
use serde::Serialize;

/// A categorical filter value; "all" or an absent value admits everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Choice::All,
            Some(v) => Choice::Only(v.to_string()),
        }
    }

    fn admits(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub search: String,
    pub zone: Choice,
    pub status: Choice,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView<R> {
    pub items: Vec<R>,
    pub shown: usize,
    pub total: usize,
    /// Distinct zones of the whole list, first-seen order
    pub zones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl RecordQuery {
    pub fn new(search: Option<&str>, zone: Option<&str>, status: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().to_string(),
            zone: Choice::parse(zone),
            status: Choice::parse(status),
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));

        matches_search && self.zone.admits(record.zone()) && self.status.admits(record.status_label())
    }

    pub fn apply<R: Record>(&self, records: Vec<R>) -> FilteredView<R> {
        let total = records.len();
        let zones = distinct_zones(&records);
        let items: Vec<R> = records.into_iter().filter(|r| self.matches(r)).collect();
        let shown = items.len();

        FilteredView {
            items,
            shown,
            total,
            zones,
            empty_message: (shown == 0).then_some(R::EMPTY_MESSAGE),
        }
    }
}

fn distinct_zones<R: Record>(records: &[R]) -> Vec<String> {
    let mut zones: Vec<String> = Vec::new();
    for record in records {
        if !zones.iter().any(|z| z == record.zone()) {
            zones.push(record.zone().to_string());
        }
    }
    zones
}
