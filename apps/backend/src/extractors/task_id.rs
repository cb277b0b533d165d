use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Task id taken from the `{task_id}` path segment; must be a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i32);

fn parse_task_id(raw: Option<&str>) -> Result<TaskId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidTaskId, "Missing task_id parameter")
    })?;

    let id = raw.parse::<i32>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidTaskId, format!("Invalid task id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidTaskId,
            format!("Task id must be positive, got: {id}"),
        ));
    }

    Ok(TaskId(id))
}

impl FromRequest for TaskId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_task_id(req.match_info().get("task_id")))
    }
}
