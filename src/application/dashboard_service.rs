// Dashboard service - Configured cards plus counts from the live stores
use crate::application::entity_service::EntityService;
use crate::domain::collection_point::{CollectionPoint, FillTier};
use crate::domain::dashboard::{ActivityRow, Alert, Dashboard, LiveSummary, StatCard};
use crate::domain::employee::{Availability, Employee};
use crate::domain::route::{Route, RouteStatus};
use crate::infrastructure::config::DashboardConfig;

#[derive(Clone)]
pub struct DashboardService {
    config: DashboardConfig,
    points: EntityService<CollectionPoint>,
    employees: EntityService<Employee>,
    routes: EntityService<Route>,
}

impl DashboardService {
    pub fn new(
        config: DashboardConfig,
        points: EntityService<CollectionPoint>,
        employees: EntityService<Employee>,
        routes: EntityService<Route>,
    ) -> Self {
        Self {
            config,
            points,
            employees,
            routes,
        }
    }

    pub async fn get_dashboard(&self) -> Dashboard {
        let stats = self
            .config
            .stats
            .iter()
            .map(|s| StatCard {
                title: s.title.clone(),
                value: s.value.clone(),
                change: s.change.clone(),
                icon: s.icon.clone(),
                color: s.color.clone(),
            })
            .collect();

        let activity = self
            .config
            .activity
            .iter()
            .map(|a| ActivityRow {
                zone: a.zone.clone(),
                collected: a.collected.clone(),
                status: a.status.clone(),
            })
            .collect();

        let alerts = self
            .config
            .alerts
            .iter()
            .map(|a| Alert {
                kind: a.kind.clone(),
                title: a.title.clone(),
                message: a.message.clone(),
                time: a.time.clone(),
            })
            .collect();

        Dashboard::new(stats, activity, alerts, self.live_summary().await)
    }

    async fn live_summary(&self) -> LiveSummary {
        let points = self.points.all().await;
        let employees = self.employees.all().await;
        let routes = self.routes.all().await;

        LiveSummary {
            collection_points: points.len(),
            critical_points: points
                .iter()
                .filter(|p| p.tier() == FillTier::Critical)
                .count(),
            employees: employees.len(),
            available_employees: employees
                .iter()
                .filter(|e| e.availability == Availability::Available)
                .count(),
            routes: routes.len(),
            routes_in_progress: routes
                .iter()
                .filter(|r| r.status == RouteStatus::InProgress)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::fixtures;
    use crate::infrastructure::memory_repository::InMemoryRepository;
    use crate::infrastructure::seed::{seed_employees, seed_points, seed_routes};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_dashboard_combines_config_and_live_counts() {
        let points = EntityService::new(Arc::new(InMemoryRepository::new(seed_points())));
        let service = DashboardService::new(
            fixtures::dashboard_config(),
            points.clone(),
            EntityService::new(Arc::new(InMemoryRepository::new(seed_employees()))),
            EntityService::new(Arc::new(InMemoryRepository::new(seed_routes()))),
        );

        let dashboard = service.get_dashboard().await;
        assert_eq!(dashboard.stats[1].title, "Vehicles in Route");
        assert_eq!(dashboard.activity.len(), 4);
        assert_eq!(dashboard.alerts[3].kind, "success");
        assert_eq!(
            dashboard.live,
            LiveSummary {
                collection_points: 3,
                critical_points: 1,
                employees: 3,
                available_employees: 2,
                routes: 2,
                routes_in_progress: 1,
            }
        );

        points.delete(3, true).await.unwrap();
        assert_eq!(service.get_dashboard().await.live.critical_points, 0);
    }
}
