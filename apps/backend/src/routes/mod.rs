use actix_web::web;

pub mod auth;
pub mod health;
pub mod tasks;

/// Register every route. Middleware is applied by `pipeline::build_app`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health and root: /, /health
    cfg.configure(health::configure_routes);

    // Auth routes: /auth/**
    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    // Task routes: /api/{user_id}/tasks/**
    cfg.service(web::scope("/api/{user_id}/tasks").configure(tasks::configure_routes));
}
