// HTTP routing
use crate::domain::collection_point::CollectionPoint;
use crate::domain::employee::Employee;
use crate::domain::route::Route;
use crate::presentation::app_state::AppState;
use crate::presentation::entity_handlers::entity_routes;
use crate::presentation::handlers::{
    export_report, fit_bounds, get_dashboard, get_map, get_report, health_check, index,
    select_point, zoom_in, zoom_out,
};
use crate::presentation::xml_handlers::{
    clear_imports, export_xml, import_xml, list_imports, preview_export, sample, schema,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/", get(index))
        .route("/dashboard", get(get_dashboard))
        .nest("/collection-points", entity_routes::<CollectionPoint>())
        .nest("/employees", entity_routes::<Employee>())
        .nest("/routes", entity_routes::<Route>())
        .route("/map", get(get_map))
        .route("/map/zoom-in", post(zoom_in))
        .route("/map/zoom-out", post(zoom_out))
        .route("/map/fit-bounds", post(fit_bounds))
        .route("/map/select/:id", post(select_point))
        .route("/reports", get(get_report))
        .route("/reports/export", get(export_report))
        .route("/xml/export", get(export_xml))
        .route("/xml/export/preview", get(preview_export))
        .route("/xml/import", post(import_xml))
        .route("/xml/imports", get(list_imports).delete(clear_imports))
        .route("/xml/sample", get(sample))
        .route("/xml/schema", get(schema));

    Router::new()
        .route("/healthz", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::fixtures;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::seeded(&fixtures::server_config(), fixtures::dashboard_config());
        build_router(Arc::new(state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, bytes) = send(app, request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn multipart_upload(file_name: &str, contents: &str) -> Request<Body> {
        let boundary = "wastehub-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: text/xml\r\n\r\n{c}\r\n--{b}--\r\n",
            b = boundary,
            f = file_name,
            c = contents
        );
        Request::builder()
            .method("POST")
            .uri("/api/xml/import")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let app = app();
        let (status, body) = send(&app, Request::get("/healthz").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");

        let (status, index) = call(&app, "GET", "/api", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(index["tabs"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_filtered_lists() {
        let app = app();

        let (_, view) = call(&app, "GET", "/api/collection-points?zone=Zone%20A", None).await;
        assert_eq!(view["shown"], 2);
        assert_eq!(view["total"], 3);
        assert_eq!(view["zones"], json!(["Zone A", "Zone B"]));

        let (_, view) = call(&app, "GET", "/api/employees?availability=On%20Route", None).await;
        assert_eq!(view["items"][0]["name"], "Maria Garcia");

        let (_, view) = call(&app, "GET", "/api/routes?search=nobody", None).await;
        assert_eq!(view["shown"], 0);
        assert_eq!(view["emptyMessage"], "No routes found");
    }

    #[tokio::test]
    async fn test_create_update_delete_point() {
        let app = app();
        let draft = json!({
            "name": "Point C1",
            "zone": "Zone C",
            "type": "Metal",
            "fill": 20,
            "status": "Active",
            "location": "48.8500, 2.3400"
        });

        let (status, created) = call(&app, "POST", "/api/collection-points", Some(draft)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 4);

        let (status, updated) = call(
            &app,
            "PUT",
            "/api/collection-points/4",
            Some(json!({ "name": "Point C1", "zone": "Zone C", "fill": 75 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["fill"], 75);

        let (status, outcome) = call(&app, "DELETE", "/api/collection-points/4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["deleted"], false);

        let (_, outcome) = call(&app, "DELETE", "/api/collection-points/4?confirm=true", None).await;
        assert_eq!(outcome["deleted"], true);

        let (status, error) = call(&app, "GET", "/api/collection-points/4", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], "collection point 4 not found");
    }

    #[tokio::test]
    async fn test_form_flow() {
        let app = app();

        let (status, _) = call(&app, "POST", "/api/routes/form/submit", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, form) = call(&app, "POST", "/api/routes/2/edit", None).await;
        assert_eq!(form["open"], true);
        assert_eq!(form["editingId"], 2);
        assert_eq!(form["draft"]["name"], "Route B-1");

        let mut draft = form["draft"].clone();
        draft["status"] = json!("Completed");
        let (status, _) = call(&app, "PUT", "/api/routes/form", Some(draft)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, route) = call(&app, "POST", "/api/routes/form/submit", None).await;
        assert_eq!(route["id"], 2);
        assert_eq!(route["status"], "Completed");

        let (_, form) = call(&app, "GET", "/api/routes/form", None).await;
        assert_eq!(form["open"], false);
    }

    #[tokio::test]
    async fn test_dashboard_reflects_store() {
        let app = app();
        call(&app, "DELETE", "/api/routes/2?confirm=true", None).await;

        let (_, dashboard) = call(&app, "GET", "/api/dashboard", None).await;
        assert_eq!(dashboard["live"]["routes"], 1);
        assert_eq!(dashboard["live"]["routesInProgress"], 0);
        assert_eq!(dashboard["stats"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_map_endpoints() {
        let app = app();

        let (_, view) = call(&app, "POST", "/api/map/zoom-in", None).await;
        assert_eq!(view["viewport"]["zoom"], 14);

        let (_, view) = call(&app, "POST", "/api/map/fit-bounds", None).await;
        assert_eq!(view["viewport"]["zoom"], 15);

        let (_, view) = call(&app, "POST", "/api/map/select/2", None).await;
        assert_eq!(view["selected"]["name"], "Point A2");

        let (status, _) = call(&app, "POST", "/api/map/select/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reports() {
        let app = app();

        let (_, report) = call(&app, "GET", "/api/reports?range=year", None).await;
        assert_eq!(report["range"], "year");
        assert_eq!(report["charts"].as_array().unwrap().len(), 3);

        let (status, _) = call(&app, "GET", "/api/reports?range=decade", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(Request::get("/api/reports/export").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"waste-report-"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).starts_with("Waste Management Report - "));
    }

    #[tokio::test]
    async fn test_xml_export() {
        let app = app();

        let response = app
            .clone()
            .oneshot(Request::get("/api/xml/export?type=points").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/xml");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("waste_management_points_"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&body).matches("<point id=").count(), 3);

        let (_, preview) = call(&app, "GET", "/api/xml/export/preview?type=routes", None).await;
        assert!(preview["downloadUri"]
            .as_str()
            .unwrap()
            .starts_with("data:text/xml;charset=utf-8,"));

        let response = app
            .clone()
            .oneshot(Request::get("/api/xml/sample").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/xml");

        let (status, _) = call(&app, "GET", "/api/xml/export?type=vehicles", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_xml_import_and_log() {
        let app = app();
        let (_, sample) = send(&app, Request::get("/api/xml/sample").body(Body::empty()).unwrap()).await;
        let sample = String::from_utf8(sample).unwrap();

        let (status, bytes) = send(&app, multipart_upload("sample.xml", &sample)).await;
        assert_eq!(status, StatusCode::OK);
        let entry: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(entry["status"], "success");
        assert_eq!(entry["count"], 4);

        let (_, points) = call(&app, "GET", "/api/collection-points", None).await;
        assert_eq!(points["total"], 5);

        let (status, bytes) = send(&app, multipart_upload("broken.xml", "<waste_management>")).await;
        assert_eq!(status, StatusCode::OK);
        let entry: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(entry["status"], "error");
        assert_eq!(entry["message"], "Error: Invalid XML format");

        let (status, bytes) = send(&app, multipart_upload("points.csv", "a,b")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["error"], "Please upload an XML file");

        let (_, log) = call(&app, "GET", "/api/xml/imports", None).await;
        assert_eq!(log.as_array().unwrap().len(), 2);
        assert_eq!(log[0]["status"], "error");

        let (status, _) = call(&app, "DELETE", "/api/xml/imports", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, log) = call(&app, "GET", "/api/xml/imports", None).await;
        assert_eq!(log, json!([]));

        let (_, schema) = call(&app, "GET", "/api/xml/schema", None).await;
        assert_eq!(schema[0]["element"], "point");
    }
}
