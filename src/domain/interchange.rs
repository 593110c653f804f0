// XML interchange: export scopes and the import log
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which sections an XML export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    #[default]
    All,
    Points,
    Routes,
    Employees,
}

impl ExportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportScope::All => "all",
            ExportScope::Points => "points",
            ExportScope::Routes => "routes",
            ExportScope::Employees => "employees",
        }
    }

    pub fn includes_points(&self) -> bool {
        matches!(self, ExportScope::All | ExportScope::Points)
    }

    pub fn includes_routes(&self) -> bool {
        matches!(self, ExportScope::All | ExportScope::Routes)
    }

    pub fn includes_employees(&self) -> bool {
        matches!(self, ExportScope::All | ExportScope::Employees)
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ExportScope::All),
            "points" => Ok(ExportScope::Points),
            "routes" => Ok(ExportScope::Routes),
            "employees" => Ok(ExportScope::Employees),
            other => Err(format!("unknown export type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Points,
    Routes,
    Employees,
}

/// Occurrences of the three record tags in an imported document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagCounts {
    pub points: usize,
    pub routes: usize,
    pub employees: usize,
}

impl TagCounts {
    pub fn total(&self) -> usize {
        self.points + self.routes + self.employees
    }

    /// Dominant kind: points first, then routes, employees otherwise
    pub fn kind(&self) -> ImportKind {
        if self.points > 0 {
            ImportKind::Points
        } else if self.routes > 0 {
            ImportKind::Routes
        } else {
            ImportKind::Employees
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportEntry {
    #[serde(rename = "type")]
    pub kind: ImportKind,
    pub count: usize,
    pub timestamp: String,
    pub status: ImportStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ImportEntry {
    pub fn success(counts: TagCounts, timestamp: String) -> Self {
        Self {
            kind: counts.kind(),
            count: counts.total(),
            timestamp,
            status: ImportStatus::Success,
            message: format!(
                "Successfully imported {} items ({} points, {} routes, {} employees)",
                counts.total(),
                counts.points,
                counts.routes,
                counts.employees
            ),
            detail: None,
        }
    }

    pub fn failure(detail: String, timestamp: String) -> Self {
        Self {
            kind: ImportKind::Points,
            count: 0,
            timestamp,
            status: ImportStatus::Error,
            message: "Error: Invalid XML format".to_string(),
            detail: Some(detail),
        }
    }
}
