// CRUD, filter and form handlers shared by the three record kinds
use crate::application::entity_service::{DeleteOutcome, EntityService};
use crate::application::filter::{FilteredView, RecordQuery};
use crate::application::form_controller::FormState;
use crate::domain::collection_point::CollectionPoint;
use crate::domain::employee::Employee;
use crate::domain::record::Record;
use crate::domain::route::Route;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// A record kind exposed over HTTP
pub trait ServedRecord: Record {
    /// Query parameter carrying the categorical status filter
    const STATUS_PARAM: &'static str;

    fn service(state: &AppState) -> &EntityService<Self>;
}

impl ServedRecord for CollectionPoint {
    const STATUS_PARAM: &'static str = "status";

    fn service(state: &AppState) -> &EntityService<Self> {
        &state.points
    }
}

impl ServedRecord for Employee {
    const STATUS_PARAM: &'static str = "availability";

    fn service(state: &AppState) -> &EntityService<Self> {
        &state.employees
    }
}

impl ServedRecord for Route {
    const STATUS_PARAM: &'static str = "status";

    fn service(state: &AppState) -> &EntityService<Self> {
        &state.routes
    }
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn list_records<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<FilteredView<R>> {
    let query = RecordQuery::new(
        params.get("search").map(String::as_str),
        params.get("zone").map(String::as_str),
        params.get(R::STATUS_PARAM).map(String::as_str),
    );
    Json(R::service(&state).list(&query).await)
}

pub async fn create_record<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<R::Draft>,
) -> (StatusCode, Json<R>) {
    let record = R::service(&state).create(draft).await;
    (StatusCode::CREATED, Json(record))
}

pub async fn get_record<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<R>, ApiError> {
    Ok(Json(R::service(&state).get(id).await?))
}

pub async fn update_record<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(draft): Json<R::Draft>,
) -> Result<Json<R>, ApiError> {
    Ok(Json(R::service(&state).update(id, draft).await?))
}

/// Deletes only with `confirm=true`; otherwise answers `deleted: false`
pub async fn delete_record<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteOutcome<R>>, ApiError> {
    Ok(Json(R::service(&state).delete(id, query.confirm).await?))
}

pub async fn get_form<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
) -> Json<FormState<R::Draft>> {
    Json(R::service(&state).form().await)
}

pub async fn open_create_form<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
) -> Json<FormState<R::Draft>> {
    Json(R::service(&state).open_create_form().await)
}

pub async fn open_edit_form<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<FormState<R::Draft>>, ApiError> {
    Ok(Json(R::service(&state).open_edit_form(id).await?))
}

pub async fn update_form<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<R::Draft>,
) -> Result<Json<FormState<R::Draft>>, ApiError> {
    Ok(Json(R::service(&state).update_form(draft).await?))
}

pub async fn cancel_form<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
) -> Json<FormState<R::Draft>> {
    Json(R::service(&state).cancel_form().await)
}

pub async fn submit_form<R: ServedRecord>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<R>, ApiError> {
    Ok(Json(R::service(&state).submit_form().await?))
}

/// Routes for one record kind, to be nested under its collection path
pub fn entity_routes<R: ServedRecord>() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_records::<R>).post(create_record::<R>))
        .route(
            "/form",
            get(get_form::<R>)
                .put(update_form::<R>)
                .delete(cancel_form::<R>),
        )
        .route("/form/new", post(open_create_form::<R>))
        .route("/form/submit", post(submit_form::<R>))
        .route(
            "/:id",
            get(get_record::<R>)
                .put(update_record::<R>)
                .delete(delete_record::<R>),
        )
        .route("/:id/edit", post(open_edit_form::<R>))
}
