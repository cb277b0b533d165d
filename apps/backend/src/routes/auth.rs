use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::auth::{self, AuthSession};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub jwt_token: String,
    pub expires_in: u64,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserResponse {
                id: session.user.id,
                email: session.user.email,
                created_at: session.user.created_at,
            },
            jwt_token: session.token,
            expires_in: session.expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

/// POST /auth/signup
async fn signup(
    body: ValidatedJson<SignupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let session = auth::sign_up(
        db,
        &app_state.security,
        &body.email,
        &body.password,
        &body.confirm_password,
    )
    .await?;

    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// POST /auth/signin
async fn signin(
    body: ValidatedJson<SigninRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let session = auth::sign_in(db, &app_state.security, &body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse::from(session)))
}

/// POST /auth/signout. Tokens are discarded client-side.
async fn signout() -> HttpResponse {
    HttpResponse::Ok().json(SuccessResponse { success: true })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup))
        .route("/signin", web::post().to(signin))
        .route("/signout", web::post().to(signout));
}
