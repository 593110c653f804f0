// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::entity_service::EntityService;
use crate::application::map_service::MapService;
use crate::application::report_service::ReportService;
use crate::application::xml_service::XmlService;
use crate::domain::collection_point::CollectionPoint;
use crate::domain::employee::Employee;
use crate::domain::route::Route;
use crate::infrastructure::config::{DashboardConfig, DownloadSettings, ServerConfig};
use crate::infrastructure::memory_repository::InMemoryRepository;
use crate::infrastructure::seed::{seed_employees, seed_points, seed_routes};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub points: EntityService<CollectionPoint>,
    pub employees: EntityService<Employee>,
    pub routes: EntityService<Route>,
    pub dashboard: DashboardService,
    pub reports: ReportService,
    pub map: MapService,
    pub xml: XmlService,
    pub downloads: DownloadSettings,
}

impl AppState {
    /// Wire every service over in-memory stores holding the seed records
    pub fn seeded(server: &ServerConfig, dashboard: DashboardConfig) -> Self {
        let points = EntityService::new(Arc::new(InMemoryRepository::new(seed_points())));
        let employees = EntityService::new(Arc::new(InMemoryRepository::new(seed_employees())));
        let routes = EntityService::new(Arc::new(InMemoryRepository::new(seed_routes())));

        let reports = ReportService::new(dashboard.reports.clone());
        let dashboard = DashboardService::new(
            dashboard,
            points.clone(),
            employees.clone(),
            routes.clone(),
        );
        let map = MapService::new(server.map.clone(), points.clone());
        let xml = XmlService::new(points.clone(), routes.clone(), employees.clone());

        Self {
            points,
            employees,
            routes,
            dashboard,
            reports,
            map,
            xml,
            downloads: server.downloads.clone(),
        }
    }
}
