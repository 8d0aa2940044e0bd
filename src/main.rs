use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_jobs_backend::controllers::tts_job::TtsJobController;
use tts_jobs_backend::domain::tts_job::TtsJobService;
use tts_jobs_backend::infrastructure::config::{Config, LogFormat};
use tts_jobs_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use tts_jobs_backend::infrastructure::http::start_http_server;
use tts_jobs_backend::infrastructure::repositories::{PostgresTtsJobRepository, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting TTS jobs backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    if config.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    } else {
        tracing::info!("Skipping database migrations");
    }

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories (inject db pool)
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let tts_job_repo = Arc::new(PostgresTtsJobRepository::new(pool.clone()));

    // 2. Services (inject repositories)
    let tts_job_service = Arc::new(TtsJobService::new(tts_job_repo));

    // 3. Controllers (inject services)
    let tts_job_controller = Arc::new(TtsJobController::new(tts_job_service));

    start_http_server(pool, config, user_repo, tts_job_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tts_jobs_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
