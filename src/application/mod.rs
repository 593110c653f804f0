// Application layer - Use cases over the record stores
pub mod dashboard_service;
pub mod entity_repository;
pub mod entity_service;
pub mod filter;
pub mod form_controller;
pub mod map_service;
pub mod report_service;
pub mod xml_service;
