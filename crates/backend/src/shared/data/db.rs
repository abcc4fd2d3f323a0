use std::path::Path;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
};

use crate::domain::{a001_company, a002_stakeholder, a003_opportunity, a004_task};

/// Open (or create) the SQLite database at `db_file` and bootstrap the schema
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let mut options = ConnectOptions::new(db_url);
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;

    create_tables(&conn).await?;
    tracing::info!("Database ready at {}", absolute_path.display());
    Ok(conn)
}

/// Single-connection in-memory database; every pooled connection would get
/// its own empty database otherwise
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    create_tables(&conn).await?;
    Ok(conn)
}

/// Create missing tables; referenced tables first
pub async fn create_tables(conn: &DatabaseConnection) -> anyhow::Result<()> {
    create_table(conn, a001_company::repository::Entity).await?;
    create_table(conn, a002_stakeholder::repository::Entity).await?;
    create_table(conn, a003_opportunity::repository::Entity).await?;
    create_table(conn, a004_task::repository::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(conn: &DatabaseConnection, entity: E) -> anyhow::Result<()> {
    let table = entity.table_name().to_string();
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    conn.execute(backend.build(&statement)).await?;
    tracing::debug!("Ensured table {}", table);
    Ok(())
}
