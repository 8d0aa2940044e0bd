use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, tts_job::TtsJobController};
use crate::infrastructure::auth::{auth_middleware, request_id_middleware};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::UserRepository;

/// Build the application router with all routes and layers
pub fn build_router(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_repo: Arc<UserRepository>,
    tts_job_controller: Arc<TtsJobController>,
) -> Router {
    // TTS job routes (require authentication)
    let tts_job_routes = Router::new()
        .route(
            "/api/tts/jobs",
            get(TtsJobController::list_jobs).post(TtsJobController::create_job),
        )
        .route(
            "/api/tts/jobs/:id",
            get(TtsJobController::get_job).patch(TtsJobController::update_job),
        )
        .with_state(tts_job_controller)
        .layer(middleware::from_fn_with_state(
            (user_repo, config),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(tts_job_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_repo: Arc<UserRepository>,
    tts_job_controller: Arc<TtsJobController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, config.clone(), user_repo, tts_job_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
