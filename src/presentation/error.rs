// API error type and its JSON rendering
use crate::application::entity_repository::StoreError;
use crate::application::map_service::MapError;
use crate::infrastructure::xml_codec::XmlError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Status(StatusCode),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound { .. }) | ApiError::Map(_) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::FormClosed { .. }) => StatusCode::CONFLICT,
            ApiError::Xml(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Status(status) => *status,
        }
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        ApiError::Status(status)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(StoreError::NotFound { kind: "route", id: 7 }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::FormClosed { kind: "employee" }).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(XmlError::InvalidExtension("a.csv".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::from(MapError::UnknownPoint(9)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(StatusCode::INTERNAL_SERVER_ERROR).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(StoreError::NotFound { kind: "route", id: 7 }).to_string(),
            "route 7 not found"
        );
        assert_eq!(
            ApiError::from(XmlError::InvalidExtension("a.csv".to_string())).to_string(),
            "Please upload an XML file"
        );
    }
}
