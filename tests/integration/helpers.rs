//! Shared test helpers for integration tests.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use bookhub_auth::jwt::encoder::JwtEncoder;
use bookhub_core::config::AppConfig;
use bookhub_database::connection::DatabasePool;
use bookhub_database::repositories::{EventRepository, InterestRepository, ReservationRepository};
use bookhub_directory::{DirectoryService, DirectoryUser, StaticDirectory};
use bookhub_entity::interest::InterestPolicy;
use bookhub_notify::{NoopMailer, NotificationDispatcher};
use bookhub_scheduling::TimeZoneNormalizer;
use bookhub_service::{EventService, SchedulingCoordinator};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Token encoder sharing the app's secret
    encoder: JwtEncoder,
    /// Held for the app's lifetime so tests sharing the database run
    /// one at a time.
    _gate: tokio::sync::OwnedMutexGuard<()>,
}

/// Tests share one physical database; the gate serializes them.
fn db_gate() -> Arc<tokio::sync::Mutex<()>> {
    static GATE: OnceLock<Arc<tokio::sync::Mutex<()>>> = OnceLock::new();
    GATE.get_or_init(|| Arc::new(tokio::sync::Mutex::new(()))).clone()
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let gate = db_gate().lock_owned().await;

        let config = AppConfig::load_file("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        bookhub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = db.into_pool();

        Self::clean_database(&db_pool).await;

        let event_repo = Arc::new(EventRepository::new(db_pool.clone()));
        let reservation_repo = Arc::new(ReservationRepository::new(db_pool.clone()));
        let interest_repo = Arc::new(InterestRepository::new());

        let jwt_decoder = Arc::new(bookhub_auth::jwt::decoder::JwtDecoder::new(&config.auth));
        let encoder = JwtEncoder::new(&config.auth);

        let normalizer =
            TimeZoneNormalizer::from_config(&config.scheduling).expect("Bad test timezone");

        let directory = StaticDirectory::new(&config.directory);
        directory.insert(DirectoryUser {
            sid: "S-1-5-21-1001".to_string(),
            display_name: "User One".to_string(),
            email: "u1@test.com".to_string(),
            groups: vec![],
        });
        let directory: Arc<dyn DirectoryService> = Arc::new(directory);

        let dispatcher =
            NotificationDispatcher::new(Arc::new(NoopMailer), normalizer.zone(), None);

        let event_service = Arc::new(EventService::new(
            db_pool.clone(),
            Arc::clone(&event_repo),
            Arc::clone(&interest_repo),
            InterestPolicy::from_config(&config.scheduling),
            normalizer,
        ));
        let coordinator = Arc::new(SchedulingCoordinator::new(
            db_pool.clone(),
            Arc::clone(&event_repo),
            Arc::clone(&reservation_repo),
            normalizer,
            dispatcher,
            directory,
        ));

        let state = bookhub_api::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_decoder,
            event_service,
            coordinator,
        };
        let router = bookhub_api::build_router(state);

        Self {
            router,
            db_pool,
            config,
            encoder,
            _gate: gate,
        }
    }

    /// Remove all rows between tests. Order respects foreign keys.
    async fn clean_database(pool: &PgPool) {
        let tables = ["interest_entries", "reservations", "events"];
        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Mint a bearer token for a regular user.
    pub fn token(&self, sid: &str) -> String {
        self.encoder
            .generate_token(sid, sid, &format!("{sid}@test.com"), vec![])
            .expect("Failed to mint token")
    }

    /// Mint a bearer token carrying the administrative group.
    pub fn admin_token(&self, sid: &str) -> String {
        self.encoder
            .generate_token(
                sid,
                sid,
                &format!("{sid}@test.com"),
                vec![self.config.auth.admin_group.clone()],
            )
            .expect("Failed to mint admin token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create an event over the API and return its id.
    pub async fn create_event(
        &self,
        title: &str,
        starts_at: &str,
        ends_at: &str,
        duration_minutes: i64,
    ) -> TestResponse {
        self.request(
            "POST",
            "/event",
            Some(serde_json::json!({
                "title": title,
                "location": "Room 1",
                "duration_minutes": duration_minutes,
                "starts_at": starts_at,
                "ends_at": ends_at,
            })),
            None,
        )
        .await
    }

    /// Book a slot for the given token.
    pub async fn book(&self, token: &str, event_id: &str, slot_at: &str) -> TestResponse {
        self.request(
            "POST",
            "/schedule-event",
            Some(serde_json::json!({
                "event_id": event_id,
                "slot_at": slot_at,
            })),
            Some(token),
        )
        .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (Null when empty or not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The machine-readable error code, if present.
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(|v| v.as_str())
    }

    /// The `id` field of the body as a string.
    pub fn id(&self) -> String {
        self.body
            .get("id")
            .and_then(|v| v.as_str())
            .expect("No id in response")
            .to_string()
    }
}
