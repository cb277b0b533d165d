//! The request pipeline, declared once.
//!
//! Outermost first:
//! `RequestTrace` > `TraceSpan` > `StructuredLogger` > `SecurityHeaders` >
//! `Cors` > `IsolationGate` > routes.
//!
//! Actix applies the last `.wrap()` first, so the calls below are listed
//! innermost first. CORS answers preflight requests before the gate runs.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};

use crate::error::{json_error_handler, path_error_handler, query_error_handler, AppError};
use crate::errors::ErrorCode;
use crate::middleware::{
    cors_middleware, IsolationGate, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use crate::routes;
use crate::state::app_state::AppState;

async fn not_found() -> Result<web::Json<()>, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}

/// Build the full application around `state`.
pub fn build_app(
    state: web::Data<AppState>,
    cors_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(routes::configure)
        .default_service(web::to(not_found))
        .wrap(IsolationGate::default())
        .wrap(cors_middleware(cors_origins))
        .wrap(SecurityHeaders)
        .wrap(StructuredLogger)
        .wrap(TraceSpan)
        .wrap(RequestTrace)
}
