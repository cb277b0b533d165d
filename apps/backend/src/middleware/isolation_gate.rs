//! User-isolation gate.
//!
//! Runs before every handler. For a path inside the identity-scoped
//! namespace (`/api/<user_id>/...`) it requires a bearer token whose subject
//! equals `<user_id>`; everything else passes through untouched.
//!
//! Decision order, single pass:
//! 1. path not identity-scoped -> allow
//! 2. no bearer credential -> 403 `FORBIDDEN`
//! 3. authenticator rejects the token -> 401
//! 4. subject differs from the path identity -> 403 `FORBIDDEN_USER_MISMATCH`
//! 5. allow, with the verified `Identity` in request extensions
//!
//! The path inspected is the routing path (`match_info`), so `/%61pi/u1`
//! is classified exactly as the router will see it.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::authenticator::{AuthError, Authenticate, Authenticator, Identity};
use crate::auth::bearer::bearer_token;
use crate::auth::path_identity::PathIdentityExtractor;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDenial {
    MissingCredential,
    InvalidCredential(AuthError),
    IdentityMismatch,
}

impl GateDenial {
    pub const fn reason_code(&self) -> &'static str {
        match self {
            GateDenial::MissingCredential => "missing_credential",
            GateDenial::InvalidCredential(reason) => reason.reason_code(),
            GateDenial::IdentityMismatch => "identity_mismatch",
        }
    }
}

impl From<GateDenial> for AppError {
    fn from(denial: GateDenial) -> Self {
        match denial {
            GateDenial::MissingCredential => AppError::MissingCredential,
            GateDenial::InvalidCredential(reason) => AppError::invalid_credential(reason),
            GateDenial::IdentityMismatch => AppError::IdentityMismatch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Carries the verified identity for identity-scoped paths.
    Allow(Option<Identity>),
    Deny(GateDenial),
}

/// Pure gate decision. `bearer` is the token from the Authorization header,
/// `None` when no bearer credential was sent.
pub fn decide<A>(
    path: &str,
    bearer: Option<&str>,
    extractor: &PathIdentityExtractor,
    authenticator: &A,
) -> GateDecision
where
    A: Authenticate + ?Sized,
{
    let Some(claimed) = extractor.extract_claimed_identity(path) else {
        return GateDecision::Allow(None);
    };

    let Some(token) = bearer else {
        return GateDecision::Deny(GateDenial::MissingCredential);
    };

    let identity = match authenticator.authenticate(token) {
        Ok(identity) => identity,
        Err(reason) => return GateDecision::Deny(GateDenial::InvalidCredential(reason)),
    };

    if identity.subject != claimed {
        return GateDecision::Deny(GateDenial::IdentityMismatch);
    }

    GateDecision::Allow(Some(identity))
}

/// Middleware factory; holds the extractor for the scoped namespace.
#[derive(Debug, Clone, Default)]
pub struct IsolationGate {
    extractor: Rc<PathIdentityExtractor>,
}

impl IsolationGate {
    pub fn new(extractor: PathIdentityExtractor) -> Self {
        Self {
            extractor: Rc::new(extractor),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for IsolationGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IsolationGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IsolationGateMiddleware {
            service: Rc::new(service),
            extractor: Rc::clone(&self.extractor),
        }))
    }
}

pub struct IsolationGateMiddleware<S> {
    service: Rc<S>,
    extractor: Rc<PathIdentityExtractor>,
}

impl<S, B> Service<ServiceRequest> for IsolationGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let extractor = Rc::clone(&self.extractor);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AppError::internal("AppState not configured for isolation gate");
                return Ok(req.error_response(err).map_into_right_body());
            };

            // Classify the path the router will match (percent-decoded),
            // not the raw request URI.
            let decision = decide(
                req.match_info().as_str(),
                bearer_token(req.headers()),
                &extractor,
                &Authenticator::new(&state.security),
            );

            match decision {
                GateDecision::Allow(identity) => {
                    if let Some(identity) = identity {
                        req.extensions_mut().insert(identity);
                    }
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                GateDecision::Deny(denial) => {
                    security::access_denied(req.path(), denial.reason_code());
                    Ok(req
                        .error_response(AppError::from(denial))
                        .map_into_right_body())
                }
            }
        })
    }
}
