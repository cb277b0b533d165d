use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connect without running migrations.
///
/// In-memory SQLite databases live per connection, so their pool is pinned
/// to a single connection.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(database_url.to_owned());
    if is_in_memory_sqlite(database_url) {
        opts.max_connections(1).min_connections(1);
    }
    opts.sqlx_logging(false);

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Connect and apply pending migrations.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}
