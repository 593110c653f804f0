// Collection point domain model
use super::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PointStatus {
    #[default]
    Active,
    Inactive,
    Critical,
}

impl PointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointStatus::Active => "Active",
            PointStatus::Inactive => "Inactive",
            PointStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for PointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Active" => Ok(PointStatus::Active),
            "Inactive" => Ok(PointStatus::Inactive),
            "Critical" => Ok(PointStatus::Critical),
            other => Err(format!("unknown point status: {}", other)),
        }
    }
}

/// Colour tier of a fill level, shared by the table bars and map markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillTier {
    Normal,
    Warning,
    Critical,
}

impl FillTier {
    pub fn from_fill(fill: u8) -> Self {
        if fill > 90 {
            FillTier::Critical
        } else if fill > 70 {
            FillTier::Warning
        } else {
            FillTier::Normal
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            FillTier::Critical => "#ef4444",
            FillTier::Warning => "#f59e0b",
            FillTier::Normal => "#10b981",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FillTier::Normal => "normal",
            FillTier::Warning => "warning",
            FillTier::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPoint {
    pub id: u32,
    pub name: String,
    pub zone: String,
    #[serde(rename = "type")]
    pub waste_type: String,
    pub fill: u8,
    pub status: PointStatus,
    pub location: String,
}

/// Editable fields of a collection point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionPointDraft {
    pub name: String,
    pub zone: String,
    #[serde(rename = "type")]
    pub waste_type: String,
    pub fill: u8,
    pub status: PointStatus,
    pub location: String,
}

impl CollectionPoint {
    pub fn tier(&self) -> FillTier {
        FillTier::from_fill(self.fill)
    }
}

impl Record for CollectionPoint {
    type Draft = CollectionPointDraft;

    const KIND: &'static str = "collection point";
    const EMPTY_MESSAGE: &'static str = "No collection points found";

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
        vec![self.name.as_str(), self.zone.as_str()]
    }

    fn from_draft(id: u32, draft: CollectionPointDraft) -> Self {
        Self {
            id,
            name: draft.name,
            zone: draft.zone,
            waste_type: draft.waste_type,
            fill: draft.fill,
            status: draft.status,
            location: draft.location,
        }
    }

    fn revise(&self, draft: CollectionPointDraft) -> Self {
        Self::from_draft(self.id, draft)
    }

    fn with_id(self, id: u32) -> Self {
        Self { id, ..self }
    }

    fn to_draft(&self) -> CollectionPointDraft {
        CollectionPointDraft {
            name: self.name.clone(),
            zone: self.zone.clone(),
            waste_type: self.waste_type.clone(),
            fill: self.fill,
            status: self.status,
            location: self.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_tier_thresholds() {
        assert_eq!(FillTier::from_fill(0), FillTier::Normal);
        assert_eq!(FillTier::from_fill(70), FillTier::Normal);
        assert_eq!(FillTier::from_fill(71), FillTier::Warning);
        assert_eq!(FillTier::from_fill(90), FillTier::Warning);
        assert_eq!(FillTier::from_fill(91), FillTier::Critical);
        assert_eq!(FillTier::from_fill(100).color(), "#ef4444");
    }

    #[test]
    fn test_draft_round_trip_keeps_id() {
        let point = CollectionPoint::from_draft(
            7,
            CollectionPointDraft {
                name: "Point C1".to_string(),
                zone: "Zone C".to_string(),
                waste_type: "Metal".to_string(),
                fill: 60,
                status: PointStatus::Inactive,
                location: "48.8693, 2.3412".to_string(),
            },
        );

        let mut draft = point.to_draft();
        draft.fill = 92;
        let revised = point.revise(draft);

        assert_eq!(revised.id, 7);
        assert_eq!(revised.fill, 92);
        assert_eq!(revised.tier(), FillTier::Critical);
    }

    #[test]
    fn test_json_uses_type_field() {
        let draft: CollectionPointDraft =
            serde_json::from_str(r#"{"name":"P","zone":"Z","type":"Glass","fill":10}"#).unwrap();
        assert_eq!(draft.waste_type, "Glass");
        assert_eq!(draft.status, PointStatus::Active);
    }
}
