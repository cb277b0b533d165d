//! Task repository functions for domain layer (generic over ConnectionTrait).
//!
//! Every function takes the owning user id; rows of other users are invisible.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::tasks_sea as tasks_adapter;
pub use crate::adapters::tasks_sea::{
    SortDirection, TaskCreate, TaskListQuery, TaskOrderField, TaskUpdate,
};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Task domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i32,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub position: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

fn task_not_found(task_id: i32) -> DomainError {
    DomainError::not_found(NotFoundKind::Task, format!("Task {task_id} not found"))
}

pub async fn list_tasks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    query: &TaskListQuery,
) -> Result<Vec<Task>, DomainError> {
    let rows = tasks_adapter::list_for_user(conn, user_id, query).await?;
    Ok(rows.into_iter().map(Task::from).collect())
}

pub async fn count_tasks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    completed: Option<bool>,
) -> Result<u64, DomainError> {
    Ok(tasks_adapter::count_for_user(conn, user_id, completed).await?)
}

pub async fn find_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<Option<Task>, DomainError> {
    let row = tasks_adapter::find_for_user(conn, user_id, task_id).await?;
    Ok(row.map(Task::from))
}

pub async fn require_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<Task, DomainError> {
    find_task(conn, user_id, task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))
}

/// One past the user's highest position; the first task gets 1.
pub async fn next_position<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<i32, DomainError> {
    let max = tasks_adapter::max_position(conn, user_id).await?;
    Ok(max.unwrap_or(0).saturating_add(1))
}

pub async fn create_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TaskCreate,
) -> Result<Task, DomainError> {
    let row = tasks_adapter::create_task(conn, dto).await?;
    Ok(Task::from(row))
}

pub async fn update_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
    dto: TaskUpdate,
) -> Result<Task, DomainError> {
    let row = tasks_adapter::find_for_user(conn, user_id, task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    let row = tasks_adapter::update_task(conn, row, dto).await?;
    Ok(Task::from(row))
}

pub async fn delete_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<(), DomainError> {
    match tasks_adapter::delete_for_user(conn, user_id, task_id).await? {
        0 => Err(task_not_found(task_id)),
        _ => Ok(()),
    }
}

impl From<crate::entities::tasks::Model> for Task {
    fn from(model: crate::entities::tasks::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
