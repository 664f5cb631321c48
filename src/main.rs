//! BookHub server: slot scheduling and booking service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bookhub_core::config::AppConfig;
use bookhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BOOKHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BookHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = bookhub_database::connection::DatabasePool::connect(&config.database).await?;
    bookhub_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Initialize repositories ──────────────────────────
    let event_repo = Arc::new(bookhub_database::repositories::EventRepository::new(
        db_pool.clone(),
    ));
    let reservation_repo = Arc::new(bookhub_database::repositories::ReservationRepository::new(
        db_pool.clone(),
    ));
    let interest_repo = Arc::new(bookhub_database::repositories::InterestRepository::new());

    // ── Step 3: Auth, directory, and notifications ───────────────
    let jwt_decoder = Arc::new(bookhub_auth::jwt::decoder::JwtDecoder::new(&config.auth));
    let directory: Arc<dyn bookhub_directory::DirectoryService> =
        Arc::new(bookhub_directory::StaticDirectory::new(&config.directory));

    let normalizer = bookhub_scheduling::TimeZoneNormalizer::from_config(&config.scheduling)?;

    let mailer: Arc<dyn bookhub_notify::Mailer> = if config.mail.enabled {
        Arc::new(bookhub_notify::SmtpMailer::new(&config.mail))
    } else {
        Arc::new(bookhub_notify::NoopMailer)
    };
    let group_address = if config.mail.group_address.is_empty() {
        None
    } else {
        Some(config.mail.group_address.clone())
    };
    let dispatcher =
        bookhub_notify::NotificationDispatcher::new(mailer, normalizer.zone(), group_address);

    // ── Step 4: Services ─────────────────────────────────────────
    let interest_policy = bookhub_entity::interest::InterestPolicy::from_config(&config.scheduling);
    let event_service = Arc::new(bookhub_service::EventService::new(
        db_pool.clone(),
        Arc::clone(&event_repo),
        Arc::clone(&interest_repo),
        interest_policy,
        normalizer,
    ));
    let coordinator = Arc::new(bookhub_service::SchedulingCoordinator::new(
        db_pool.clone(),
        Arc::clone(&event_repo),
        Arc::clone(&reservation_repo),
        normalizer,
        dispatcher,
        directory,
    ));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let state = bookhub_api::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_decoder,
        event_service,
        coordinator,
    };
    let app = bookhub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
