use std::collections::HashMap;

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::dropdown::UiContext;
use contracts::shared::forms::{FieldDefinition, FormMode};
use contracts::shared::metadata::ModelMetadata;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::shared::dropdown::build_ui_context;
use crate::shared::error::ApiError;
use crate::shared::forms::{build_form_schema, validate_submission};
use crate::shared::query::parse_query_string;

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub mode: Option<String>,
}

impl FormQuery {
    /// `full` when absent; anything but `full` or `partial` is rejected
    pub fn form_mode(&self) -> Result<FormMode, ApiError> {
        match self.mode.as_deref().map(str::trim) {
            None | Some("") => Ok(FormMode::default()),
            Some(mode) if mode.eq_ignore_ascii_case("full") => Ok(FormMode::Full),
            Some(mode) if mode.eq_ignore_ascii_case("partial") => Ok(FormMode::Partial),
            Some(mode) => Err(ApiError::BadRequest(format!(
                "unknown form mode '{}', expected 'full' or 'partial'",
                mode
            ))),
        }
    }
}

/// GET /api/metadata
pub async fn list_all(State(state): State<AppState>) -> Json<serde_json::Value> {
    let entities: Vec<serde_json::Value> = state
        .registry
        .list_names()
        .into_iter()
        .filter_map(|name| {
            let meta = state.registry.get_metadata(&name).ok()?;
            Some(json!({
                "name": name,
                "entity_name": meta.entity_name,
                "display_name": meta.display_name_singular,
                "display_name_plural": meta.display_name_plural,
                "api_endpoint": meta.api_endpoint,
                "icon": meta.entity_ref.info.ui.icon,
            }))
        })
        .collect();
    Json(json!({ "entities": entities }))
}

/// GET /api/metadata/:entity
pub async fn get_metadata(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> Result<Json<ModelMetadata>, ApiError> {
    let meta = state.registry.get_metadata(&entity)?;
    Ok(Json(meta.as_ref().clone()))
}

/// GET /api/metadata/:entity/form?mode=full|partial
pub async fn get_form(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<FormQuery>,
) -> Result<Json<Vec<FieldDefinition>>, ApiError> {
    let mode = query.form_mode()?;
    let meta = state.registry.get_metadata(&entity)?;
    Ok(Json(build_form_schema(&meta, mode)))
}

/// POST /api/metadata/:entity/form/validate?mode=full|partial
///
/// 200 with `{"valid": true}` or 422 with the per-field errors.
pub async fn validate(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<FormQuery>,
    Json(values): Json<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let mode = query.form_mode()?;
    let meta = state.registry.get_metadata(&entity)?;
    let schema = build_form_schema(&meta, mode);
    let response = match validate_submission(&schema, &values) {
        Ok(()) => Json(json!({ "valid": true })).into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "valid": false, "errors": errors.errors })),
        )
            .into_response(),
    };
    Ok(response)
}

/// GET /api/metadata/:entity/ui?group_by=..&sort_by=..
pub async fn get_ui_context(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Json<UiContext>, ApiError> {
    let meta = state.registry.get_metadata(&entity)?;
    let params = parse_query_string(raw.as_deref().unwrap_or(""));
    Ok(Json(build_ui_context(&meta, &params)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(mode: Option<&str>) -> FormQuery {
        FormQuery {
            mode: mode.map(str::to_string),
        }
    }

    #[test]
    fn test_form_mode() {
        assert_eq!(query(None).form_mode().unwrap(), FormMode::Full);
        assert_eq!(query(Some("")).form_mode().unwrap(), FormMode::Full);
        assert_eq!(query(Some("Partial")).form_mode().unwrap(), FormMode::Partial);
    }

    #[test]
    fn test_unknown_form_mode_is_bad_request() {
        let err = query(Some("modal")).form_mode().unwrap_err();
        assert!(matches!(&err, ApiError::BadRequest(msg) if msg.contains("modal")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
