//! Task use cases. Every call is scoped to the verified user id.

use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{debug, info};

use crate::error::AppError;
use crate::repos::tasks::{self, Task, TaskCreate, TaskListQuery, TaskUpdate};
use crate::validation::{
    validate_description, validate_limit, validate_position, validate_title,
};

/// One page of a user's tasks.
#[derive(Debug, Clone)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl TaskPage {
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total
    }
}

/// Raw task fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub position: Option<i32>,
}

/// Raw partial update as received from a client.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub position: Option<i32>,
}

/// Desired position of one task in a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    pub id: i32,
    pub position: i32,
}

pub async fn list_tasks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    query: TaskListQuery,
) -> Result<TaskPage, AppError> {
    validate_limit(query.limit)?;

    let rows = tasks::list_tasks(conn, user_id, &query).await?;
    let total = tasks::count_tasks(conn, user_id, query.completed).await?;
    debug!(user_id, returned = rows.len(), total, "Listed tasks");

    Ok(TaskPage {
        tasks: rows,
        total,
        limit: query.limit,
        offset: query.offset,
    })
}

pub async fn get_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<Task, AppError> {
    Ok(tasks::require_task(conn, user_id, task_id).await?)
}

pub async fn create_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    new_task: NewTask,
) -> Result<Task, AppError> {
    let title = validate_title(&new_task.title)?;
    let description = validate_description(new_task.description)?;
    let position = match validate_position(new_task.position)? {
        Some(position) => position,
        None => tasks::next_position(conn, user_id).await?,
    };

    let task = tasks::create_task(
        conn,
        TaskCreate {
            user_id: user_id.to_string(),
            title,
            description,
            position,
        },
    )
    .await?;

    info!(user_id, task_id = task.id, "Task created");
    Ok(task)
}

pub async fn update_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
    changes: TaskChanges,
) -> Result<Task, AppError> {
    let update = TaskUpdate {
        title: changes.title.as_deref().map(validate_title).transpose()?,
        description: validate_description(changes.description)?,
        completed: changes.completed,
        position: validate_position(changes.position)?,
    };

    let task = tasks::update_task(conn, user_id, task_id, update).await?;
    debug!(user_id, task_id, "Task updated");
    Ok(task)
}

pub async fn toggle_completion<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<Task, AppError> {
    let current = tasks::require_task(conn, user_id, task_id).await?;
    let update = TaskUpdate {
        completed: Some(!current.completed),
        ..TaskUpdate::default()
    };
    Ok(tasks::update_task(conn, user_id, task_id, update).await?)
}

pub async fn delete_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    task_id: i32,
) -> Result<(), AppError> {
    tasks::delete_task(conn, user_id, task_id).await?;
    info!(user_id, task_id, "Task deleted");
    Ok(())
}

/// Apply all position changes or none of them.
///
/// A task id the user does not own aborts the transaction with 404.
pub async fn reorder_tasks<C: TransactionTrait>(
    db: &C,
    user_id: &str,
    changes: &[PositionChange],
) -> Result<(), AppError> {
    for change in changes {
        validate_position(Some(change.position))?;
    }

    let txn = db
        .begin()
        .await
        .map_err(|e| AppError::db(format!("failed to begin reorder transaction: {e}")))?;

    for change in changes {
        let update = TaskUpdate {
            position: Some(change.position),
            ..TaskUpdate::default()
        };
        // Dropping `txn` on the error path rolls the batch back.
        tasks::update_task(&txn, user_id, change.id, update).await?;
    }

    txn.commit()
        .await
        .map_err(|e| AppError::db(format!("failed to commit reorder: {e}")))?;

    info!(user_id, count = changes.len(), "Tasks reordered");
    Ok(())
}
