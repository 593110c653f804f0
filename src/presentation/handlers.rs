// HTTP request handlers for the dashboard, map and reports
use crate::application::map_service::MapView;
use crate::domain::dashboard::Dashboard;
use crate::domain::report::{DateRange, Report};
use crate::infrastructure::config::prepare_template;
use crate::infrastructure::http_response::{accepts_brotli, download_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Response},
    Json,
};
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const TABS: [&str; 7] = [
    "Dashboard",
    "Map View",
    "Collection Points",
    "Employees",
    "Routes",
    "Reports",
    "XML Import/Export",
];

#[derive(Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

impl RangeQuery {
    fn date_range(&self) -> Result<DateRange, ApiError> {
        match self.range.as_deref() {
            None | Some("") => Ok(DateRange::default()),
            Some(value) => value.parse().map_err(ApiError::BadRequest),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "WasteHub",
        "tagline": "Waste Management System",
        "tabs": TABS,
    }))
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    Json(state.dashboard.get_dashboard().await)
}

pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapView> {
    Json(state.map.view().await)
}

pub async fn zoom_in(State(state): State<Arc<AppState>>) -> Json<MapView> {
    Json(state.map.zoom_in().await)
}

pub async fn zoom_out(State(state): State<Arc<AppState>>) -> Json<MapView> {
    Json(state.map.zoom_out().await)
}

pub async fn fit_bounds(State(state): State<Arc<AppState>>) -> Json<MapView> {
    Json(state.map.fit_bounds().await)
}

pub async fn select_point(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<MapView>, ApiError> {
    Ok(Json(state.map.select(id).await?))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.reports.get_report(query.date_range()?)))
}

/// Plain-text report download
pub async fn export_report(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Response<Body>, ApiError> {
    let range = query.date_range()?;
    let text = state
        .reports
        .export_text(range, &Local::now().format("%-m/%-d/%Y").to_string());

    let mut vars = HashMap::new();
    vars.insert("date".to_string(), Utc::now().format("%Y-%m-%d").to_string());
    let file_name = prepare_template(&state.downloads.report_file, &vars);

    Ok(download_response(text, "text/plain; charset=utf-8", &file_name, accepts_brotli(&headers)).await?)
}
