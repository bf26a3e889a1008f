use std::sync::Arc;
use std::time::Instant;

use crate::auth::session::SessionStore;
use crate::auth::throttle::LoginThrottle;
use crate::config::{AdminConfig, ServerConfig};
use crate::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (environment, timeouts).
    pub config: Arc<ServerConfig>,
    /// Admin identity for the credential verifier.
    pub admin: Arc<AdminConfig>,
    /// Process-wide session store (in-memory; see DESIGN.md for the
    /// multi-instance limitation).
    pub sessions: SessionStore,
    /// Per-username failed-login throttle.
    pub throttle: Arc<LoginThrottle>,
    /// WordPress REST gateway.
    pub wp: Arc<wpadmin_wp::WpClient>,
    /// Email dispatcher; `None` when email is not configured.
    pub mailer: Option<Arc<Mailer>>,
    /// Process start time, reported by the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.config.environment.is_production()
    }
}
