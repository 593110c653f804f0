// Route domain model
use super::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RouteStatus {
    #[default]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Planned => "Planned",
            RouteStatus::InProgress => "In Progress",
            RouteStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Planned" => Ok(RouteStatus::Planned),
            "In Progress" => Ok(RouteStatus::InProgress),
            "Completed" => Ok(RouteStatus::Completed),
            other => Err(format!("unknown route status: {}", other)),
        }
    }
}

/// A collection itinerary. Distance, CO₂ and collected weight are display
/// strings with their unit ("24.5 km", "8.2 kg", "2,450 kg").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: u32,
    pub name: String,
    pub zone: String,
    pub distance: String,
    pub points: u32,
    pub status: RouteStatus,
    pub co2: String,
    pub collected: String,
    /// Employee name copied from the form; never checked against the roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteDraft {
    pub name: String,
    pub zone: String,
    pub distance: String,
    pub points: u32,
    pub status: RouteStatus,
    pub co2: String,
    pub collected: String,
    pub assigned_to: Option<String>,
}

impl Record for Route {
    type Draft = RouteDraft;

    const KIND: &'static str = "route";
    const EMPTY_MESSAGE: &'static str = "No routes found";

    fn id(&self) -> u32 {
        self.id
    }

    fn zone(&self) -> &str {
        &self.zone
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.zone.as_str()];
        if let Some(assignee) = &self.assigned_to {
            fields.push(assignee.as_str());
        }
        fields
    }

    fn from_draft(id: u32, draft: RouteDraft) -> Self {
        Self {
            id,
            name: draft.name,
            zone: draft.zone,
            distance: draft.distance,
            points: draft.points,
            status: draft.status,
            co2: draft.co2,
            collected: draft.collected,
            assigned_to: draft.assigned_to.filter(|a| !a.trim().is_empty()),
        }
    }

    fn revise(&self, draft: RouteDraft) -> Self {
        Self::from_draft(self.id, draft)
    }

    fn with_id(self, id: u32) -> Self {
        Self { id, ..self }
    }

    fn to_draft(&self) -> RouteDraft {
        RouteDraft {
            name: self.name.clone(),
            zone: self.zone.clone(),
            distance: self.distance.clone(),
            points: self.points,
            status: self.status,
            co2: self.co2.clone(),
            collected: self.collected.clone(),
            assigned_to: self.assigned_to.clone(),
        }
    }
}
