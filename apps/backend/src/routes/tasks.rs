//! Task routes under `/api/{user_id}/tasks`.
//!
//! The isolation gate has already matched `{user_id}` against the token;
//! handlers scope by `CurrentUser::id`, never by the path segment.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, TaskId, ValidatedJson};
use crate::repos::tasks::{SortDirection, Task, TaskListQuery, TaskOrderField};
use crate::services::tasks::{self as task_service, NewTask, PositionChange, TaskChanges, TaskPage};
use crate::state::app_state::AppState;
use crate::validation::ValidationErrorKind;

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub position: i32,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            position: task.position,
            user_id: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub data: Vec<TaskResponse>,
    pub pagination: Pagination,
}

impl From<TaskPage> for TaskListResponse {
    fn from(page: TaskPage) -> Self {
        let pagination = Pagination {
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more(),
        };
        Self {
            data: page.tasks.into_iter().map(TaskResponse::from).collect(),
            pagination,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub completed: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
}

fn parse_order_field(raw: Option<&str>) -> Result<TaskOrderField, ValidationErrorKind> {
    match raw {
        None | Some("position") => Ok(TaskOrderField::Position),
        Some("createdAt" | "created_at") => Ok(TaskOrderField::CreatedAt),
        Some("updatedAt" | "updated_at") => Ok(TaskOrderField::UpdatedAt),
        Some(_) => Err(ValidationErrorKind::UnknownOrderField),
    }
}

fn parse_direction(raw: Option<&str>) -> Result<SortDirection, ValidationErrorKind> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") => Ok(SortDirection::Asc),
        Some("desc") => Ok(SortDirection::Desc),
        Some(_) => Err(ValidationErrorKind::UnknownOrderDirection),
    }
}

impl ListParams {
    fn into_query(self) -> Result<TaskListQuery, ValidationErrorKind> {
        let defaults = TaskListQuery::default();
        Ok(TaskListQuery {
            completed: self.completed,
            order_by: parse_order_field(self.order_by.as_deref())?,
            direction: parse_direction(self.order_direction.as_deref())?,
            limit: self.limit.unwrap_or(defaults.limit),
            offset: self.offset.unwrap_or(defaults.offset),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderItem {
    pub id: i32,
    pub position: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub tasks: Vec<ReorderItem>,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

/// GET /api/{user_id}/tasks
async fn list_tasks(
    user: CurrentUser,
    params: web::Query<ListParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query()?;
    let db = require_db(&app_state)?;
    let page = task_service::list_tasks(db, &user.id, query).await?;
    Ok(HttpResponse::Ok().json(TaskListResponse::from(page)))
}

/// POST /api/{user_id}/tasks
async fn create_task(
    user: CurrentUser,
    body: ValidatedJson<CreateTaskRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let db = require_db(&app_state)?;
    let task = task_service::create_task(
        db,
        &user.id,
        NewTask {
            title: body.title,
            description: body.description,
            position: body.position,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

/// GET /api/{user_id}/tasks/{task_id}
async fn get_task(
    user: CurrentUser,
    task_id: TaskId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TaskResponse>, AppError> {
    let db = require_db(&app_state)?;
    let task = task_service::get_task(db, &user.id, task_id.0).await?;
    Ok(web::Json(task.into()))
}

/// PUT /api/{user_id}/tasks/{task_id}
async fn update_task(
    user: CurrentUser,
    task_id: TaskId,
    body: ValidatedJson<UpdateTaskRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TaskResponse>, AppError> {
    let body = body.into_inner();
    let db = require_db(&app_state)?;
    let task = task_service::update_task(
        db,
        &user.id,
        task_id.0,
        TaskChanges {
            title: body.title,
            description: body.description,
            completed: body.completed,
            position: body.position,
        },
    )
    .await?;
    Ok(web::Json(task.into()))
}

/// DELETE /api/{user_id}/tasks/{task_id}
async fn delete_task(
    user: CurrentUser,
    task_id: TaskId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    task_service::delete_task(db, &user.id, task_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /api/{user_id}/tasks/{task_id}/complete
async fn toggle_task(
    user: CurrentUser,
    task_id: TaskId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TaskResponse>, AppError> {
    let db = require_db(&app_state)?;
    let task = task_service::toggle_completion(db, &user.id, task_id.0).await?;
    Ok(web::Json(task.into()))
}

/// PUT /api/{user_id}/tasks/reorder
async fn reorder_tasks(
    user: CurrentUser,
    body: ValidatedJson<ReorderRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let changes: Vec<PositionChange> = body
        .tasks
        .iter()
        .map(|item| PositionChange {
            id: item.id,
            position: item.position,
        })
        .collect();
    let db = require_db(&app_state)?;
    task_service::reorder_tasks(db, &user.id, &changes).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // `reorder` must be registered before `{task_id}`.
    cfg.service(
        web::resource(["", "/"])
            .route(web::get().to(list_tasks))
            .route(web::post().to(create_task)),
    )
    .service(web::resource("/reorder").route(web::put().to(reorder_tasks)))
    .service(
        web::resource("/{task_id}")
            .route(web::get().to(get_task))
            .route(web::put().to(update_task))
            .route(web::delete().to(delete_task)),
    )
    .service(web::resource("/{task_id}/complete").route(web::patch().to(toggle_task)));
}
