/// Entity persistence and relation tests against an in-memory database
pub mod entity_tests;

/// Validation helpers living next to the entities
pub mod validation_tests;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with all migrations applied.
///
/// A single pooled connection keeps the in-memory database alive for the
/// duration of the test.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
