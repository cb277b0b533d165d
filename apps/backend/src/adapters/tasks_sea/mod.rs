//! SeaORM adapter for task repository.
//!
//! Every query here is filtered by `user_id`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    NotSet, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use time::OffsetDateTime;

use crate::entities::tasks;

pub mod dto;

pub use dto::{SortDirection, TaskCreate, TaskListQuery, TaskOrderField, TaskUpdate};

fn owned_by(user_id: &str, completed: Option<bool>) -> Condition {
    let mut cond = Condition::all().add(tasks::Column::UserId.eq(user_id));
    if let Some(completed) = completed {
        cond = cond.add(tasks::Column::Completed.eq(completed));
    }
    cond
}

fn order_column(field: TaskOrderField) -> tasks::Column {
    match field {
        TaskOrderField::Position => tasks::Column::Position,
        TaskOrderField::CreatedAt => tasks::Column::CreatedAt,
        TaskOrderField::UpdatedAt => tasks::Column::UpdatedAt,
    }
}

fn listing(user_id: &str, query: &TaskListQuery) -> Select<tasks::Entity> {
    tasks::Entity::find()
        .filter(owned_by(user_id, query.completed))
        .order_by(order_column(query.order_by), query.direction.into())
        .order_by_asc(tasks::Column::Id)
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    query: &TaskListQuery,
) -> Result<Vec<tasks::Model>, sea_orm::DbErr> {
    listing(user_id, query)
        .limit(query.limit)
        .offset(query.offset)
        .all(conn)
        .await
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    completed: Option<bool>,
) -> Result<u64, sea_orm::DbErr> {
    tasks::Entity::find()
        .filter(owned_by(user_id, completed))
        .count(conn)
        .await
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<Option<tasks::Model>, sea_orm::DbErr> {
    tasks::Entity::find_by_id(task_id)
        .filter(tasks::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn max_position<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Option<i32>, sea_orm::DbErr> {
    let top = tasks::Entity::find()
        .filter(tasks::Column::UserId.eq(user_id))
        .order_by_desc(tasks::Column::Position)
        .one(conn)
        .await?;
    Ok(top.map(|t| t.position))
}

pub async fn create_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TaskCreate,
) -> Result<tasks::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let task_active = tasks::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        description: Set(dto.description),
        completed: Set(false),
        position: Set(dto.position),
        created_at: Set(now),
        updated_at: Set(now),
    };

    task_active.insert(conn).await
}

/// Apply a partial update and bump `updated_at`.
pub async fn update_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task: tasks::Model,
    dto: TaskUpdate,
) -> Result<tasks::Model, sea_orm::DbErr> {
    let mut active: tasks::ActiveModel = task.into();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(description) = dto.description {
        active.description = Set(Some(description));
    }
    if let Some(completed) = dto.completed {
        active.completed = Set(completed);
    }
    if let Some(position) = dto.position {
        active.position = Set(position);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = tasks::Entity::delete_many()
        .filter(tasks::Column::Id.eq(task_id))
        .filter(tasks::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
