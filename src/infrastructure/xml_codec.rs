// XML interchange format: <waste_management> documents
use crate::domain::collection_point::{CollectionPoint, PointStatus};
use crate::domain::employee::{Availability, Employee};
use crate::domain::interchange::{ExportScope, TagCounts};
use crate::domain::route::{Route, RouteStatus};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Sample document shown in the schema documentation
pub const SAMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<waste_management>
  <collection_points>
    <point id="1">
      <name>Point A1</name>
      <zone>Zone A</zone>
      <type>Plastic</type>
      <location>48.8566, 2.3522</location>
      <fill_level>85</fill_level>
      <status>Active</status>
    </point>
    <point id="2">
      <name>Point A2</name>
      <zone>Zone A</zone>
      <type>Organic</type>
      <location>48.8606, 2.3376</location>
      <fill_level>45</fill_level>
      <status>Active</status>
    </point>
  </collection_points>
  <routes>
    <route id="1">
      <name>Route A-1</name>
      <zone>Zone A</zone>
      <distance>24.5</distance>
      <points>12</points>
      <collected>2450</collected>
      <co2_emissions>8.2</co2_emissions>
      <status>Completed</status>
    </route>
  </routes>
  <employees>
    <employee id="1">
      <name>John Smith</name>
      <zone>Zone A</zone>
      <skill>Driver</skill>
      <availability>Available</availability>
      <phone>+1-555-0101</phone>
      <email>john.smith@wastehub.com</email>
    </employee>
  </employees>
</waste_management>"#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("Please upload an XML file")]
    InvalidExtension(String),

    #[error("Invalid XML format: {0}")]
    Malformed(String),
}

/// Field list of one document section
#[derive(Debug, Clone, Serialize)]
pub struct SectionSchema {
    pub section: &'static str,
    pub element: &'static str,
    pub fields: Vec<(&'static str, &'static str)>,
}

pub fn schema() -> Vec<SectionSchema> {
    vec![
        SectionSchema {
            section: "collection_points",
            element: "point",
            fields: vec![
                ("id", "Unique identifier"),
                ("name", "Point name"),
                ("zone", "Zone assignment"),
                ("type", "Waste type"),
                ("location", "GPS coordinates"),
                ("fill_level", "0-100%"),
                ("status", "Active/Inactive"),
            ],
        },
        SectionSchema {
            section: "routes",
            element: "route",
            fields: vec![
                ("id", "Unique identifier"),
                ("name", "Route name"),
                ("zone", "Zone assignment"),
                ("distance", "Distance in km"),
                ("points", "Collection points"),
                ("collected", "Waste collected"),
                ("co2_emissions", "CO₂ in kg"),
            ],
        },
        SectionSchema {
            section: "employees",
            element: "employee",
            fields: vec![
                ("id", "Unique identifier"),
                ("name", "Employee name"),
                ("zone", "Zone assignment"),
                ("skill", "Job skill"),
                ("availability", "Status"),
                ("phone", "Contact number"),
                ("email", "Email address"),
            ],
        },
    ]
}

struct DocumentWriter {
    out: String,
}

impl DocumentWriter {
    fn new() -> Self {
        let mut out = String::new();
        out.push_str(DECLARATION);
        out.push_str("\n<waste_management>\n");
        Self { out }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn field(&mut self, name: &str, value: &str) {
        let line = format!("<{0}>{1}</{0}>", name, escape(value));
        self.line(3, &line);
    }

    fn finish(mut self) -> String {
        self.out.push_str("</waste_management>");
        self.out
    }
}

/// Render a document with the sections the scope asks for
pub fn write_document(
    scope: ExportScope,
    points: &[CollectionPoint],
    routes: &[Route],
    employees: &[Employee],
) -> String {
    let mut w = DocumentWriter::new();

    if scope.includes_points() {
        w.line(1, "<collection_points>");
        for p in points {
            w.line(2, &format!("<point id=\"{}\">", p.id));
            w.field("name", &p.name);
            w.field("zone", &p.zone);
            w.field("type", &p.waste_type);
            w.field("location", &p.location);
            w.field("fill_level", &p.fill.to_string());
            w.field("status", p.status.as_str());
            w.line(2, "</point>");
        }
        w.line(1, "</collection_points>");
    }

    if scope.includes_routes() {
        w.line(1, "<routes>");
        for r in routes {
            w.line(2, &format!("<route id=\"{}\">", r.id));
            w.field("name", &r.name);
            w.field("zone", &r.zone);
            w.field("distance", &bare_number(&r.distance));
            w.field("points", &r.points.to_string());
            w.field("collected", &bare_number(&r.collected));
            w.field("co2_emissions", &bare_number(&r.co2));
            w.field("status", r.status.as_str());
            if let Some(assignee) = &r.assigned_to {
                w.field("assigned_to", assignee);
            }
            w.line(2, "</route>");
        }
        w.line(1, "</routes>");
    }

    if scope.includes_employees() {
        w.line(1, "<employees>");
        for e in employees {
            w.line(2, &format!("<employee id=\"{}\">", e.id));
            w.field("name", &e.name);
            w.field("zone", &e.zone);
            w.field("skill", &e.skill);
            w.field("availability", e.availability.as_str());
            if let Some(phone) = &e.phone {
                w.field("phone", phone);
            }
            if let Some(email) = &e.email {
                w.field("email", email);
            }
            w.field("routes_completed", &e.routes.to_string());
            w.line(2, "</employee>");
        }
        w.line(1, "</employees>");
    }

    w.finish()
}

/// Numeric part of a display value: "2,450 kg" -> "2450"
pub fn bare_number(value: &str) -> String {
    let numeric: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .filter(|c| *c != ',')
        .collect();

    if numeric.is_empty() {
        value.trim().to_string()
    } else {
        numeric
    }
}

/// "24.5" -> "24.5 km"; non-numeric input is kept as written
fn with_unit(value: &str, unit: &str) -> String {
    let value = value.trim();
    if value.parse::<f64>().is_ok() {
        format!("{} {}", value, unit)
    } else {
        value.to_string()
    }
}

/// "2450" -> "2,450 kg"
fn with_thousands(value: &str, unit: &str) -> String {
    let value = value.trim();
    if value.parse::<f64>().is_err() {
        return value.to_string();
    }

    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{} {}", sign, grouped, f, unit),
        None => format!("{}{} {}", sign, grouped, unit),
    }
}

/// Records and tag counts read from an uploaded document
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub counts: TagCounts,
    pub points: Vec<CollectionPoint>,
    pub routes: Vec<Route>,
    pub employees: Vec<Employee>,
}

struct PendingRecord {
    tag: String,
    depth: usize,
    id: u32,
    fields: HashMap<String, String>,
}

impl PendingRecord {
    fn text(&self, name: &str) -> String {
        self.fields.get(name).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    fn optional(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|v| !v.is_empty())
    }

    fn number<T: std::str::FromStr + Default>(&self, name: &str) -> T {
        self.text(name).parse().unwrap_or_default()
    }
}

impl ParsedDocument {
    fn open_record(&mut self, tag: &str) -> bool {
        match tag {
            "point" => self.counts.points += 1,
            "route" => self.counts.routes += 1,
            "employee" => self.counts.employees += 1,
            _ => return false,
        }
        true
    }

    fn close_record(&mut self, record: PendingRecord) {
        match record.tag.as_str() {
            "point" => self.points.push(CollectionPoint {
                id: record.id,
                name: record.text("name"),
                zone: record.text("zone"),
                waste_type: record.text("type"),
                fill: record
                    .text("fill_level")
                    .parse::<f64>()
                    .map(|f| f.round().clamp(0.0, 100.0) as u8)
                    .unwrap_or(0),
                status: record.text("status").parse().unwrap_or(PointStatus::Active),
                location: record.text("location"),
            }),
            "route" => self.routes.push(Route {
                id: record.id,
                name: record.text("name"),
                zone: record.text("zone"),
                distance: with_unit(&record.text("distance"), "km"),
                points: record.number("points"),
                status: record.text("status").parse().unwrap_or(RouteStatus::Planned),
                co2: with_unit(&record.text("co2_emissions"), "kg"),
                collected: with_thousands(&record.text("collected"), "kg"),
                assigned_to: record.optional("assigned_to"),
            }),
            "employee" => self.employees.push(Employee {
                id: record.id,
                name: record.text("name"),
                zone: record.text("zone"),
                skill: record.text("skill"),
                availability: record
                    .text("availability")
                    .parse()
                    .unwrap_or(Availability::Available),
                routes: record.number("routes_completed"),
                phone: record.optional("phone"),
                email: record.optional("email"),
            }),
            _ => {}
        }
    }
}

fn malformed(reader: &Reader<&[u8]>, message: impl std::fmt::Display) -> XmlError {
    XmlError::Malformed(format!("{} at byte {}", message, reader.buffer_position()))
}

fn record_id(e: &quick_xml::events::BytesStart<'_>) -> u32 {
    e.try_get_attribute("id")
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().and_then(|v| v.trim().parse().ok()))
        .unwrap_or(0)
}

/// Parse a document, rejecting anything that is not well-formed XML with a
/// single root element
pub fn parse_document(text: &str) -> Result<ParsedDocument, XmlError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut doc = ParsedDocument::default();
    let mut stack: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut pending: Option<PendingRecord> = None;

    loop {
        let event = reader.read_event().map_err(|e| malformed(&reader, e))?;
        match event {
            Event::Start(e) | Event::Empty(e) if stack.is_empty() && seen_root => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                return Err(malformed(&reader, format!("second root element <{}>", name)));
            }
            Event::Start(e) => {
                seen_root = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if doc.open_record(&name) && pending.is_none() {
                    pending = Some(PendingRecord {
                        tag: name.clone(),
                        depth: stack.len(),
                        id: record_id(&e),
                        fields: HashMap::new(),
                    });
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                seen_root = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if doc.open_record(&name) && pending.is_none() {
                    doc.close_record(PendingRecord {
                        tag: name,
                        depth: stack.len(),
                        id: record_id(&e),
                        fields: HashMap::new(),
                    });
                }
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err(malformed(&reader, "closing tag without opening tag"));
                }
                if pending.as_ref().is_some_and(|p| p.depth == stack.len()) {
                    if let Some(record) = pending.take() {
                        doc.close_record(record);
                    }
                }
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(|e| malformed(&reader, e))?;
                push_text(&mut pending, &stack, &value, &reader)?;
            }
            Event::CData(c) => {
                let value = String::from_utf8_lossy(&c).into_owned();
                push_text(&mut pending, &stack, &value, &reader)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(&reader, format!("unclosed element <{}>", open)));
    }
    if !seen_root {
        return Err(malformed(&reader, "no root element"));
    }

    Ok(doc)
}

fn push_text(
    pending: &mut Option<PendingRecord>,
    stack: &[String],
    value: &str,
    reader: &Reader<&[u8]>,
) -> Result<(), XmlError> {
    if stack.is_empty() {
        if value.trim().is_empty() {
            return Ok(());
        }
        return Err(malformed(reader, "text outside the root element"));
    }

    if let Some(record) = pending {
        if stack.len() == record.depth + 2 {
            if let Some(field) = stack.last() {
                record.fields.entry(field.clone()).or_default().push_str(value);
            }
        }
    }
    Ok(())
}
