// Employee domain model
use super::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Availability {
    #[default]
    Available,
    #[serde(rename = "On Route")]
    OnRoute,
    #[serde(rename = "Off Duty")]
    OffDuty,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::OnRoute => "On Route",
            Availability::OffDuty => "Off Duty",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(Availability::Available),
            "On Route" => Ok(Availability::OnRoute),
            "Off Duty" => Ok(Availability::OffDuty),
            other => Err(format!("unknown availability: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub zone: String,
    pub skill: String,
    pub availability: Availability,
    /// Number of routes this employee has worked
    pub routes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Editable fields of an employee. The route count is not part of the form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeDraft {
    pub name: String,
    pub zone: String,
    pub skill: String,
    pub availability: Availability,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Blank contact fields are stored as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Record for Employee {
    type Draft = EmployeeDraft;

    const KIND: &'static str = "employee";
    const EMPTY_MESSAGE: &'static str = "No employees found";

    fn id(&self) -> u32 {
        self.id
    }

    fn zone(&self) -> &str {
        &self.zone
    }

    fn status_label(&self) -> &str {
        self.availability.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.zone.as_str(), self.skill.as_str()]
    }

    fn from_draft(id: u32, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            zone: draft.zone,
            skill: draft.skill,
            availability: draft.availability,
            routes: 0,
            phone: non_blank(draft.phone),
            email: non_blank(draft.email),
        }
    }

    fn revise(&self, draft: EmployeeDraft) -> Self {
        Self {
            routes: self.routes,
            ..Self::from_draft(self.id, draft)
        }
    }

    fn with_id(self, id: u32) -> Self {
        Self { id, ..self }
    }

    fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            zone: self.zone.clone(),
            skill: self.skill.clone(),
            availability: self.availability,
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}
