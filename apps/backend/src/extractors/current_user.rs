use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::authenticator::{AuthError, Authenticate, Authenticator};
use crate::auth::bearer::bearer_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// The caller, re-derived from the bearer token on every request.
///
/// Handlers scope data by `id`, never by the user id in the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

fn current_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState missing from request"))?;

    let token = bearer_token(req.headers())
        .ok_or(AppError::invalid_credential(AuthError::MissingCredential))?;

    let identity = Authenticator::new(&state.security)
        .authenticate(token)
        .map_err(AppError::invalid_credential)?;

    Ok(CurrentUser {
        id: identity.subject,
        email: identity.email,
    })
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(current_user(req))
    }
}
