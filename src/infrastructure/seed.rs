// Records every store starts with
use crate::domain::collection_point::{CollectionPoint, PointStatus};
use crate::domain::employee::{Availability, Employee};
use crate::domain::route::{Route, RouteStatus};

fn point(id: u32, name: &str, zone: &str, waste_type: &str, fill: u8, status: PointStatus, location: &str) -> CollectionPoint {
    CollectionPoint {
        id,
        name: name.to_string(),
        zone: zone.to_string(),
        waste_type: waste_type.to_string(),
        fill,
        status,
        location: location.to_string(),
    }
}

pub fn seed_points() -> Vec<CollectionPoint> {
    vec![
        point(1, "Point A1", "Zone A", "Plastic", 85, PointStatus::Active, "48.8566, 2.3522"),
        point(2, "Point A2", "Zone A", "Organic", 45, PointStatus::Active, "48.8606, 2.3376"),
        point(3, "Point B1", "Zone B", "Glass", 95, PointStatus::Critical, "48.8530, 2.3499"),
    ]
}

fn employee(id: u32, name: &str, zone: &str, skill: &str, availability: Availability, routes: u32, phone: &str) -> Employee {
    let email = format!("{}@wastehub.com", name.to_lowercase().replace(' ', "."));
    Employee {
        id,
        name: name.to_string(),
        zone: zone.to_string(),
        skill: skill.to_string(),
        availability,
        routes,
        phone: Some(phone.to_string()),
        email: Some(email),
    }
}

pub fn seed_employees() -> Vec<Employee> {
    vec![
        employee(1, "John Smith", "Zone A", "Driver", Availability::Available, 3, "+1-555-0101"),
        employee(2, "Maria Garcia", "Zone B", "Operator", Availability::OnRoute, 2, "+1-555-0102"),
        employee(3, "Ahmed Hassan", "Zone C", "Driver", Availability::Available, 4, "+1-555-0103"),
    ]
}

pub fn seed_routes() -> Vec<Route> {
    vec![
        Route {
            id: 1,
            name: "Route A-1".to_string(),
            zone: "Zone A".to_string(),
            distance: "24.5 km".to_string(),
            points: 12,
            status: RouteStatus::Completed,
            co2: "8.2 kg".to_string(),
            collected: "2,450 kg".to_string(),
            assigned_to: Some("John Smith".to_string()),
        },
        Route {
            id: 2,
            name: "Route B-1".to_string(),
            zone: "Zone B".to_string(),
            distance: "18.3 km".to_string(),
            points: 9,
            status: RouteStatus::InProgress,
            co2: "6.1 kg".to_string(),
            collected: "1,890 kg".to_string(),
            assigned_to: Some("Maria Garcia".to_string()),
        },
    ]
}
