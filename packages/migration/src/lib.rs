//! Schema migrations for the todo backend.
//!
//! The backend applies `Up` on startup; `migration-cli` exposes every
//! command.

pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    /// Apply every pending migration.
    Up,
    /// Roll back every applied migration.
    Down,
    /// Drop all tables, then apply everything.
    Fresh,
    /// Roll back everything.
    Reset,
    /// Roll back everything, then apply everything.
    Refresh,
    /// Print applied and pending migrations.
    Status,
}

impl MigrationCommand {
    const fn changes_schema(self) -> bool {
        !matches!(self, MigrationCommand::Status)
    }
}

/// Where a connection points and how far its schema has been migrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSnapshot {
    pub backend: String,
    pub database: String,
    pub applied: usize,
    pub defined: usize,
}

impl SchemaSnapshot {
    pub fn is_current(&self) -> bool {
        self.applied == self.defined
    }
}

/// Run `command` against an already-open connection.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = snapshot(db).await?;
    tracing::info!(
        ?command,
        backend = %before.backend,
        database = %before.database,
        applied = before.applied,
        defined = before.defined,
        "running migration command"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(?command, error = %e, "migration command failed");
        return Err(e);
    }

    if command.changes_schema() {
        let after = snapshot(db).await?;
        tracing::info!(
            ?command,
            applied = after.applied,
            defined = after.defined,
            "migration command succeeded"
        );
    }
    Ok(())
}

/// Describe the connection and its migration state.
pub async fn snapshot(db: &DatabaseConnection) -> Result<SchemaSnapshot, DbErr> {
    let backend = db.get_database_backend();
    Ok(SchemaSnapshot {
        backend: format!("{backend:?}"),
        database: database_name(db, backend).await?,
        applied: count_applied_migrations(db).await.unwrap_or(0),
        defined: Migrator::migrations().len(),
    })
}

async fn database_name(db: &DatabaseConnection, backend: DatabaseBackend) -> Result<String, DbErr> {
    let sql = match backend {
        DatabaseBackend::Postgres => "SELECT current_database() AS name",
        DatabaseBackend::Sqlite => "SELECT file AS name FROM pragma_database_list WHERE name = 'main'",
        _ => return Ok("<unsupported>".to_string()),
    };

    let row = db.query_one(Statement::from_string(backend, sql)).await?;
    let name = row
        .and_then(|row| row.try_get::<String>("", "name").ok())
        .unwrap_or_else(|| "<unknown>".to_string());

    // SQLite reports an empty file name for in-memory databases.
    Ok(if name.is_empty() { ":memory:".to_string() } else { name })
}

/// Number of applied migrations; 0 before the bookkeeping table exists.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the newest applied migration, if any.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
