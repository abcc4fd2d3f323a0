use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by the metadata engine
///
/// Everything else (unknown sort/group fields, malformed choices, odd filter
/// shapes) degrades to a fallback instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),
}

/// Error returned by HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Engine(EngineError::UnknownEntityType(_)) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_entity_maps_to_not_found() {
        let response = ApiError::from(EngineError::UnknownEntityType("widgets".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_message() {
        let err = EngineError::UnknownEntityType("widgets".into());
        assert_eq!(err.to_string(), "unknown entity type: widgets");
    }
}
