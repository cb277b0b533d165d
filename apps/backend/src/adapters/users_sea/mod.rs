//! SeaORM adapter for user repository.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id.to_string()).one(conn).await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(dto.email),
        hashed_password: Set(dto.hashed_password),
        created_at: Set(OffsetDateTime::now_utc()),
        last_login_at: Set(None),
    };

    user_active.insert(conn).await
}

pub async fn touch_last_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: users::Model,
    at: OffsetDateTime,
) -> Result<users::Model, sea_orm::DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.last_login_at = Set(Some(at));
    active.update(conn).await
}
