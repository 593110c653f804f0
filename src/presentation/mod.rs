// Presentation layer - axum handlers and routing
pub mod app_state;
pub mod entity_handlers;
pub mod error;
pub mod handlers;
pub mod router;
pub mod xml_handlers;
