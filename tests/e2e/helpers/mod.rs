use axum::Router;
use once_cell::sync::Lazy;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use tts_jobs_backend::infrastructure::config::{Config, Environment, LogFormat};
use uuid::Uuid;

pub mod assertions;

use api_client::TestClient;
use db_pool::{DatabasePool, PooledDatabase};
use fixtures::TestFixtures;

// Docker client for test containers
static DOCKER: Lazy<Cli> = Lazy::new(Cli::default);

// Shared PostgreSQL container for all tests
static SHARED_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

// Global database pool
static DB_POOL: Lazy<DatabasePool> = Lazy::new(|| DatabasePool::new(SHARED_CONTAINER.port));

/// Shared container that lives for the duration of all tests
struct SharedContainer {
    _container: Container<'static, Postgres>,
    port: u16,
}

impl SharedContainer {
    fn new() -> Self {
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        println!("Started shared PostgreSQL container on port {}", port);

        Self {
            _container: container,
            port,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub config: Config,
    pub fixtures: TestFixtures,
    _db: PooledDatabase,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let pooled_db = DB_POOL
                .get_database()
                .await
                .expect("Failed to get database from pool");

            let config = Config {
                database_url: pooled_db.database_url.clone(),
                database_max_connections: 5,
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                jwt_secret: "test-jwt-secret-key-for-testing-only".to_string(),
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                run_migrations: false, // The pool migrates each database once
            };

            let app = create_app(config.clone(), pooled_db.pool.clone());

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            let client = TestClient::new(&base_url);
            let fixtures = TestFixtures::new(pooled_db.pool.clone());

            Self {
                client,
                config,
                fixtures,
                _db: pooled_db,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Database cleanup happens automatically via Drop on PooledDatabase
        }
    }
}

impl TestContext {
    /// Insert a user and mint a bearer token for it
    pub async fn signed_in_user(&self, email: &str) -> (Uuid, String) {
        let user = self
            .fixtures
            .create_user(email)
            .await
            .expect("Failed to create user");
        let token = generate_test_jwt_with_email(&user.id, email, &self.config.jwt_secret);
        (user.id, token)
    }
}

/// Wire the real router against the test database
fn create_app(config: Config, pool: PgPool) -> Router {
    use tts_jobs_backend::{
        controllers::tts_job::TtsJobController,
        domain::tts_job::TtsJobService,
        infrastructure::{
            http::build_router,
            repositories::{PostgresTtsJobRepository, UserRepository},
        },
    };

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let tts_job_repo = Arc::new(PostgresTtsJobRepository::new(pool.clone()));
    let tts_job_service = Arc::new(TtsJobService::new(tts_job_repo));
    let tts_job_controller = Arc::new(TtsJobController::new(tts_job_service));

    build_router(pool, config, user_repo, tts_job_controller)
}

// Helper to generate valid JWT tokens for testing
pub fn generate_test_jwt(user_id: &Uuid, secret: &str) -> String {
    generate_test_jwt_with_email(user_id, "test@example.com", secret)
}

// Helper to generate valid JWT tokens for testing with specific email
pub fn generate_test_jwt_with_email(user_id: &Uuid, email: &str, secret: &str) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: String,
        exp: i64,
        iat: i64,
    }

    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (now + chrono::Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
