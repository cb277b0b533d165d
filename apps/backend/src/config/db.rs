use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Resolve the database URL for a profile.
///
/// `DATABASE_URL` wins when set; otherwise the URL is composed from the
/// `POSTGRES_*`, `PROD_DB`/`TEST_DB` and `APP_DB_*` variables. The test
/// profile refuses any database whose name does not end with `_test`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        if profile == DbProfile::Test {
            ensure_test_db_name(database_name(&url))?;
        }
        return Ok(url);
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(profile)?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            ensure_test_db_name(&db_name)?;
            Ok(db_name)
        }
    }
}

/// Last path segment of a database URL, without query parameters.
fn database_name(url: &str) -> &str {
    let tail = url.rsplit('/').next().unwrap_or(url);
    tail.split('?').next().unwrap_or(tail)
}

fn ensure_test_db_name(db_name: &str) -> Result<(), AppError> {
    if !db_name.ends_with("_test") {
        return Err(AppError::config(format!(
            "Test profile requires database name to end with '_test', but got: '{db_name}'"
        )));
    }
    Ok(())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
