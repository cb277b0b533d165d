//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::users_sea as users_adapter;
use crate::adapters::users_sea::UserCreate;
use crate::errors::domain::{DomainError, NotFoundKind};

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: OffsetDateTime,
    pub last_login_at: Option<OffsetDateTime>,
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

/// Insert a user; a taken email surfaces as `ConflictKind::UniqueEmail`.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    hashed_password: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, UserCreate::new(email, hashed_password)).await?;
    Ok(User::from(user))
}

pub async fn record_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    at: OffsetDateTime,
) -> Result<User, DomainError> {
    let model = users_adapter::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))?;
    let user = users_adapter::touch_last_login(conn, model, at).await?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            hashed_password: model.hashed_password,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
        }
    }
}
