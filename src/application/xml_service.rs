// XML service - Export from the live stores, import into them, and the import log
use crate::application::entity_service::EntityService;
use crate::domain::collection_point::CollectionPoint;
use crate::domain::employee::Employee;
use crate::domain::interchange::{ExportScope, ImportEntry};
use crate::domain::route::Route;
use crate::infrastructure::xml_codec::{
    parse_document, schema, write_document, SectionSchema, XmlError, SAMPLE_DOCUMENT,
};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::RwLock;

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Clone)]
pub struct XmlService {
    points: EntityService<CollectionPoint>,
    routes: EntityService<Route>,
    employees: EntityService<Employee>,
    log: Arc<RwLock<Vec<ImportEntry>>>,
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

impl XmlService {
    pub fn new(
        points: EntityService<CollectionPoint>,
        routes: EntityService<Route>,
        employees: EntityService<Employee>,
    ) -> Self {
        Self {
            points,
            routes,
            employees,
            log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn export(&self, scope: ExportScope) -> String {
        let points = if scope.includes_points() {
            self.points.all().await
        } else {
            Vec::new()
        };
        let routes = if scope.includes_routes() {
            self.routes.all().await
        } else {
            Vec::new()
        };
        let employees = if scope.includes_employees() {
            self.employees.all().await
        } else {
            Vec::new()
        };

        let xml = write_document(scope, &points, &routes, &employees);
        tracing::info!("Exported {} document ({} bytes)", scope, xml.len());
        xml
    }

    pub fn sample(&self) -> &'static str {
        SAMPLE_DOCUMENT
    }

    pub fn schema(&self) -> Vec<SectionSchema> {
        schema()
    }

    /// Import an uploaded file. A file without the `.xml` extension is
    /// rejected before reading and leaves no log entry. A document that does
    /// not parse is answered with its `error` log entry and nothing is merged.
    pub async fn import(&self, file_name: &str, contents: &[u8]) -> Result<ImportEntry, XmlError> {
        if !file_name.ends_with(".xml") {
            tracing::warn!("Rejected upload {:?}: not an XML file", file_name);
            return Err(XmlError::InvalidExtension(file_name.to_string()));
        }

        let parsed = std::str::from_utf8(contents)
            .map_err(|e| XmlError::Malformed(e.to_string()))
            .and_then(parse_document);

        let doc = match parsed {
            Ok(doc) => doc,
            Err(XmlError::Malformed(detail) | XmlError::InvalidExtension(detail)) => {
                tracing::warn!("Import of {:?} failed: {}", file_name, detail);
                let entry = ImportEntry::failure(detail, now());
                self.record(entry.clone()).await;
                return Ok(entry);
            }
        };

        let counts = doc.counts;
        self.points.merge(doc.points).await;
        self.routes.merge(doc.routes).await;
        self.employees.merge(doc.employees).await;

        let entry = ImportEntry::success(counts, now());
        tracing::info!("Imported {:?}: {}", file_name, entry.message);
        self.record(entry.clone()).await;
        Ok(entry)
    }

    async fn record(&self, entry: ImportEntry) {
        self.log.write().await.insert(0, entry);
    }

    /// Newest entry first
    pub async fn log(&self) -> Vec<ImportEntry> {
        self.log.read().await.clone()
    }

    pub async fn clear_log(&self) {
        let mut log = self.log.write().await;
        tracing::info!("Cleared {} import log entries", log.len());
        log.clear();
    }
}
