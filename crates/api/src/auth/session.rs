//! Process-wide session store backing the `wp-admin-session` cookie.
//!
//! The browser holds only an opaque 256-bit token; the store keeps the
//! metadata keyed by the SHA-256 digest of the token, so a leaked store dump
//! never yields usable cookies. All lookups fail closed: any inconsistency
//! between cookie and store reads as not-authenticated.
//!
//! The default repository is an in-process map. That is a known limitation
//! for horizontal scaling; the [`SessionRepository`] trait is the seam where
//! an external shared store would plug in without changing call sites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "wp-admin-session";

/// Session lifetime.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Metadata stored per session, keyed by token digest.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Storage seam for session records. `digest` keys are SHA-256 hex digests
/// of the plaintext token.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, digest: String, record: SessionRecord);
    async fn find(&self, digest: &str) -> Option<SessionRecord>;
    async fn remove(&self, digest: &str);
    /// Remove every expired record, returning how many were evicted.
    async fn prune_expired(&self, now: DateTime<Utc>) -> usize;
}

/// In-process repository: a `RwLock`-guarded map.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn insert(&self, digest: String, record: SessionRecord) {
        self.sessions.write().await.insert(digest, record);
    }

    async fn find(&self, digest: &str) -> Option<SessionRecord> {
        self.sessions.read().await.get(digest).cloned()
    }

    async fn remove(&self, digest: &str) {
        self.sessions.write().await.remove(digest);
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now));
        before - sessions.len()
    }
}

/// Token issuance and validation on top of a [`SessionRepository`].
#[derive(Clone)]
pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            repo,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionRepository::default()))
    }

    /// Create a fresh session, invalidating `superseded_token` first so a
    /// pre-set token can never survive a login (session fixation).
    ///
    /// Returns the plaintext token for cookie delivery; only its digest is
    /// stored.
    pub async fn create_session(
        &self,
        user_id: &str,
        superseded_token: Option<&str>,
    ) -> String {
        if let Some(old) = superseded_token {
            self.repo.remove(&token_digest(old)).await;
        }

        let token = generate_token();
        let now = Utc::now();
        let record = SessionRecord {
            created_at: now,
            expires_at: now + self.ttl,
            user_id: user_id.to_string(),
        };
        self.repo.insert(token_digest(&token), record).await;

        tracing::info!(user_id, "Session created");
        token
    }

    /// Look up the session for a cookie token. Missing and expired sessions
    /// both read as `None`; expired records are evicted on detection.
    pub async fn authenticate(&self, token: &str) -> Option<SessionRecord> {
        let digest = token_digest(token);
        let record = self.repo.find(&digest).await?;

        if record.is_expired(Utc::now()) {
            self.repo.remove(&digest).await;
            tracing::info!(user_id = %record.user_id, "Expired session evicted on access");
            return None;
        }

        Some(record)
    }

    /// Remove the session for a token (logout).
    pub async fn revoke(&self, token: &str) {
        self.repo.remove(&token_digest(token)).await;
    }

    /// Full scan-and-evict pass, called by the hourly reaper.
    pub async fn purge_expired(&self) -> usize {
        self.repo.prune_expired(Utc::now()).await
    }
}

/// 32 random bytes, hex-encoded: 256 bits of entropy per token.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn token_digest(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    format!("{hash:x}")
}

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::hours(SESSION_TTL_HOURS))
        .path("/")
        .build()
}

/// Build an expired session cookie that deletes the browser's copy.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_authenticate() {
        let store = SessionStore::in_memory();
        let token = store.create_session("admin", None).await;

        let record = store.authenticate(&token).await.expect("session valid");
        assert_eq!(record.user_id, "admin");
        assert!(record.expires_at > record.created_at);
    }

    #[tokio::test]
    async fn tokens_are_unique_and_high_entropy() {
        let store = SessionStore::in_memory();
        let a = store.create_session("admin", None).await;
        let b = store.create_session("admin", None).await;
        assert_ne!(a, b);
        assert_eq!(a.len(), 64, "32 bytes hex-encoded");
    }

    #[tokio::test]
    async fn unknown_token_is_not_authenticated() {
        let store = SessionStore::in_memory();
        assert!(store.authenticate("deadbeef").await.is_none());
    }

    #[tokio::test]
    async fn second_login_supersedes_the_first_session() {
        let store = SessionStore::in_memory();
        let first = store.create_session("admin", None).await;
        let second = store.create_session("admin", Some(&first)).await;

        assert!(store.authenticate(&first).await.is_none());
        assert!(store.authenticate(&second).await.is_some());
    }

    #[tokio::test]
    async fn expired_session_reads_as_not_authenticated() {
        let repo = Arc::new(MemorySessionRepository::default());
        let store = SessionStore::new(repo.clone());
        let token = store.create_session("admin", None).await;

        // Force the stored expiry into the past; the cookie itself would
        // still look fresh to the browser.
        let digest = token_digest(&token);
        let mut record = repo.find(&digest).await.unwrap();
        record.expires_at = Utc::now() - Duration::minutes(1);
        repo.insert(digest.clone(), record).await;

        assert!(store.authenticate(&token).await.is_none());
        // Evicted on detection.
        assert!(repo.find(&digest).await.is_none());
    }

    #[tokio::test]
    async fn revoke_removes_the_session() {
        let store = SessionStore::in_memory();
        let token = store.create_session("admin", None).await;
        store.revoke(&token).await;
        assert!(store.authenticate(&token).await.is_none());
    }

    #[tokio::test]
    async fn purge_evicts_only_expired_records() {
        let repo = Arc::new(MemorySessionRepository::default());
        let store = SessionStore::new(repo.clone());

        let live = store.create_session("admin", None).await;
        let stale = store.create_session("admin", None).await;

        let digest = token_digest(&stale);
        let mut record = repo.find(&digest).await.unwrap();
        record.expires_at = Utc::now() - Duration::hours(1);
        repo.insert(digest, record).await;

        assert_eq!(store.purge_expired().await, 1);
        assert!(store.authenticate(&live).await.is_some());
        assert!(store.authenticate(&stale).await.is_none());
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("token".into(), true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert!(cookie.http_only().unwrap_or(false));
        assert!(cookie.secure().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));

        let cleared = clear_session_cookie();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(time::Duration::seconds(0)));
    }
}
