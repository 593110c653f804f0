// HTTP handlers for the XML import/export utility
use crate::domain::interchange::{ExportScope, ImportEntry};
use crate::infrastructure::config::prepare_template;
use crate::infrastructure::http_response::{accepts_brotli, data_uri, download_response};
use crate::infrastructure::xml_codec::SectionSchema;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const XML_CONTENT_TYPE: &str = "text/xml";

#[derive(Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub scope: Option<String>,
}

impl ExportQuery {
    fn scope(&self) -> Result<ExportScope, ApiError> {
        match self.scope.as_deref() {
            None | Some("") => Ok(ExportScope::default()),
            Some(value) => value.parse().map_err(ApiError::BadRequest),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPreview {
    pub file_name: String,
    pub scope: ExportScope,
    pub content: String,
    pub download_uri: String,
}

fn export_file_name(state: &AppState, scope: ExportScope) -> String {
    let mut vars = HashMap::new();
    vars.insert("type".to_string(), scope.as_str().to_string());
    vars.insert("date".to_string(), Utc::now().format("%Y-%m-%d").to_string());
    prepare_template(&state.downloads.export_file, &vars)
}

pub async fn export_xml(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response<Body>, ApiError> {
    let scope = query.scope()?;
    let xml = state.xml.export(scope).await;
    let file_name = export_file_name(&state, scope);

    Ok(download_response(xml, XML_CONTENT_TYPE, &file_name, accepts_brotli(&headers)).await?)
}

pub async fn preview_export(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportPreview>, ApiError> {
    let scope = query.scope()?;
    let content = state.xml.export(scope).await;

    Ok(Json(ExportPreview {
        file_name: export_file_name(&state, scope),
        scope,
        download_uri: data_uri(XML_CONTENT_TYPE, &content),
        content,
    }))
}

/// Import the multipart field `file`
pub async fn import_xml(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ImportEntry>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        return Ok(Json(state.xml.import(&file_name, &contents).await?));
    }

    Err(ApiError::BadRequest("missing multipart field \"file\"".to_string()))
}

pub async fn list_imports(State(state): State<Arc<AppState>>) -> Json<Vec<ImportEntry>> {
    Json(state.xml.log().await)
}

pub async fn clear_imports(State(state): State<Arc<AppState>>) -> StatusCode {
    state.xml.clear_log().await;
    StatusCode::NO_CONTENT
}

pub async fn sample(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], state.xml.sample())
}

pub async fn schema(State(state): State<Arc<AppState>>) -> Json<Vec<SectionSchema>> {
    Json(state.xml.schema())
}
