// Domain layer - Records and view models, free of I/O
pub mod collection_point;
pub mod dashboard;
pub mod employee;
pub mod interchange;
pub mod map;
pub mod record;
pub mod report;
pub mod route;
