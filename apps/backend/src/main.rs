use actix_web::{web, HttpServer};
use backend::config::app::AppConfig;
use backend::infra::state::build_state;
use backend::pipeline::build_app;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: env_file in docker-compose
    // - Local dev: source an env file first (set -a; . ./.env; set +a)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db_url(config.database_url.clone())
        .with_security(config.security())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "Starting todo backend");

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || build_app(data.clone(), &cors_origins))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
