use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use userdesk_api::config::{self, ServerConfig};
use userdesk_api::router::build_app_router;
use userdesk_api::state::AppState;
use userdesk_api::usecases::user::UserService;
use userdesk_db::repositories::UserRepo;

#[tokio::main]
async fn main() {
    let profile = config::load_dotenv();

    // --- Configuration ---
    let config = ServerConfig::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"));

    // --- Tracing ---
    // Dropping the guard stops the file writer, so it lives until `main` returns.
    let _log_file_guard = userdesk_api::telemetry::init_tracing(&config)
        .unwrap_or_else(|e| panic!("Failed to open log file: {e}"));

    if let Some(profile) = profile {
        tracing::info!(profile, "Loaded environment profile");
    }
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    if config.log_file.active {
        tracing::info!(
            directory = %config.log_file.directory,
            file_name = %config.log_file.file_name,
            "Writing JSON logs to daily file"
        );
    }

    // --- Database ---
    let pool = userdesk_db::create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    userdesk_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    userdesk_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- App state ---
    let users = UserService::new(UserRepo::new(pool.clone()));
    let config = Arc::new(config);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::clone(&config),
        users: Arc::new(users),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, pool.close()).await.is_err() {
        tracing::warn!(?drain, "Timed out closing database pool");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
