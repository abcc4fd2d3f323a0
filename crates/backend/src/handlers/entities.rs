use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use contracts::shared::metadata::ModelMetadata;
use contracts::shared::query::NormalizedParams;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;

use super::AppState;
use crate::domain::{a001_company, a002_stakeholder, a003_opportunity, a004_task};
use crate::shared::dropdown::build_ui_context;
use crate::shared::error::{ApiError, EngineError};
use crate::shared::query::parse_query_string;

/// GET /api/entities/:entity?group_by=..&sort_by=..&sort_direction=..&q=..&<field>=..
///
/// Grouped list together with the UI context for the same parameters.
pub async fn list_grouped(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Json<serde_json::Value>, ApiError> {
    let meta = state.registry.get_metadata(&entity)?;
    let params = parse_query_string(raw.as_deref().unwrap_or(""));
    tracing::debug!("Listing {} with {:?}", meta.entity_name, params);

    let result = grouped_list(&state.db, &meta, &params).await?;
    Ok(Json(json!({
        "entity": meta.api_endpoint,
        "params": params,
        "result": result,
        "ui": build_ui_context(&meta, &params),
    })))
}

/// Run the entity type's list service and serialize its grouped result
pub async fn grouped_list(
    db: &DatabaseConnection,
    meta: &ModelMetadata,
    params: &NormalizedParams,
) -> Result<serde_json::Value, ApiError> {
    match meta.api_endpoint.as_str() {
        "companies" => to_json(a001_company::service::list_grouped(db, meta, params).await?),
        "stakeholders" => to_json(a002_stakeholder::service::list_grouped(db, meta, params).await?),
        "opportunities" => to_json(a003_opportunity::service::list_grouped(db, meta, params).await?),
        "tasks" => to_json(a004_task::service::list_grouped(db, meta, params).await?),
        other => Err(EngineError::UnknownEntityType(other.to_string()).into()),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.into()))
}
