use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wpadmin_api::auth::session::SessionStore;
use wpadmin_api::auth::throttle::LoginThrottle;
use wpadmin_api::config::{AdminConfig, EmailConfig, ServerConfig};
use wpadmin_api::mailer::Mailer;
use wpadmin_api::router::build_app_router;
use wpadmin_api::state::AppState;
use wpadmin_api::background;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wpadmin_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration (fail fast on anything required) ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = config.environment.as_str(),
        "Loaded server configuration"
    );

    let admin = AdminConfig::from_env().expect("admin credentials must be configured");

    let wp_config = wpadmin_wp::WpConfig::from_env()
        .expect("WordPress connection must be configured");
    let wp = wpadmin_wp::WpClient::new(wp_config).expect("Failed to build WordPress client");
    tracing::info!("WordPress gateway ready");

    let mailer = match EmailConfig::from_env() {
        Some(email_config) => {
            let mailer = Mailer::new(email_config).expect("Failed to build email client");
            tracing::info!("Email dispatch enabled");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::warn!("Email dispatch not configured; notification emails disabled");
            None
        }
    };

    // --- Auth state ---
    let sessions = SessionStore::in_memory();
    let throttle = Arc::new(LoginThrottle::new());

    // --- Session reaper ---
    let reaper_cancel = tokio_util::sync::CancellationToken::new();
    let reaper_handle = tokio::spawn(background::session_reaper::run(
        sessions.clone(),
        reaper_cancel.clone(),
    ));

    // --- App state ---
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState {
        config: Arc::new(config.clone()),
        admin: Arc::new(admin),
        sessions,
        throttle,
        wp: Arc::new(wp),
        mailer,
        started_at: Instant::now(),
    };

    let app = build_app_router(state);

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
    tracing::info!("Server stopped accepting connections, cleaning up");

    reaper_cancel.cancel();
    let _ = tokio::time::timeout(shutdown_timeout, reaper_handle).await;
    tracing::info!("Session reaper stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
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
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
