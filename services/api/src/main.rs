use sea_orm::Database;
use tracing::info;

use safereturn_api::config::ApiConfig;
use safereturn_api::router::build_router;
use safereturn_api::state::AppState;
use safereturn_core::config::Config;

#[tokio::main]
async fn main() {
    safereturn_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        upload_dir: config.upload_dir,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
