//! Per-username failed-login throttle.
//!
//! Five consecutive failures lock the username out for fifteen minutes,
//! regardless of credential correctness during the lockout. Counters are
//! per-username only, never per-IP, and live in process memory: a restart
//! clears them (accepted for a single-admin deployment; see DESIGN.md).

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::error::AppError;

/// Failures allowed before the lockout triggers.
pub const MAX_ATTEMPTS: u32 = 5;

/// Lockout window once the threshold is crossed.
pub const LOCKOUT_MINUTES: i64 = 15;

#[derive(Debug, Default)]
struct AttemptRecord {
    count: u32,
    locked_until: Option<DateTime<Utc>>,
}

/// Process-wide login attempt tracker.
#[derive(Debug, Default)]
pub struct LoginThrottle {
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject with [`AppError::AccountLocked`] while a lockout is active.
    /// An expired lockout clears the record so the user starts fresh.
    pub fn check(&self, username: &str) -> Result<(), AppError> {
        self.check_at(username, Utc::now())
    }

    /// Record a failed attempt; crossing the threshold starts the lockout.
    pub fn record_failure(&self, username: &str) {
        self.record_failure_at(username, Utc::now())
    }

    /// Clear the record entirely (successful login).
    pub fn reset(&self, username: &str) {
        let mut records = self.records.lock().expect("throttle mutex poisoned");
        records.remove(username);
    }

    fn check_at(&self, username: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        let mut records = self.records.lock().expect("throttle mutex poisoned");

        if let Some(record) = records.get(username) {
            if let Some(locked_until) = record.locked_until {
                if locked_until > now {
                    let remaining_secs = (locked_until - now).num_seconds();
                    let minutes = (remaining_secs + 59) / 60;
                    tracing::warn!(username, minutes, "Login rejected: account locked");
                    return Err(AppError::AccountLocked { minutes });
                }
                // Lockout expired.
                records.remove(username);
            }
        }

        Ok(())
    }

    fn record_failure_at(&self, username: &str, now: DateTime<Utc>) {
        let mut records = self.records.lock().expect("throttle mutex poisoned");
        let record = records.entry(username.to_string()).or_default();
        record.count += 1;

        if record.count >= MAX_ATTEMPTS && record.locked_until.is_none() {
            record.locked_until = Some(now + Duration::minutes(LOCKOUT_MINUTES));
            tracing::warn!(
                username,
                attempts = record.count,
                lockout_minutes = LOCKOUT_MINUTES,
                "Login throttle engaged"
            );
        }
    }
}
