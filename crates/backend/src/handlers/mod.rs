pub mod entities;
pub mod metadata;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::shared::metadata::MetadataRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MetadataRegistry>,
    pub db: DatabaseConnection,
}
