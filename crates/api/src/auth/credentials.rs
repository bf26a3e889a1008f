//! Credential verifier.
//!
//! Both the username comparison and the password verification always
//! execute, and the results are combined without short-circuiting, so the
//! response time cannot distinguish "bad username" from "bad password".

use constant_time_eq::constant_time_eq;
use wpadmin_core::CoreError;

use crate::auth::password::verify_password;
use crate::config::AdminConfig;
use crate::error::AppError;

/// Usernames are zero-padded to this length before comparison so the
/// comparison time does not leak length information.
const PAD_LEN: usize = 256;

/// Check submitted credentials against the configured admin identity.
///
/// Returns `Ok(true)` only when both the username and the password match.
/// A malformed stored hash is a configuration error, never a silent accept.
pub fn verify_credentials(
    admin: &AdminConfig,
    username: &str,
    password: &str,
) -> Result<bool, AppError> {
    if admin.admin_id.is_empty() || admin.password_hash.is_empty() {
        return Err(AppError::Core(CoreError::Configuration(
            "admin credentials are not configured".into(),
        )));
    }

    // Evaluate both checks unconditionally, then AND the results.
    let username_ok = eq_padded(username.as_bytes(), admin.admin_id.as_bytes());
    let password_ok = verify_password(password, &admin.password_hash).map_err(|e| {
        AppError::Core(CoreError::Configuration(format!(
            "stored admin password hash is invalid: {e}"
        )))
    })?;

    Ok(username_ok & password_ok)
}

/// Constant-time equality over inputs zero-padded to [`PAD_LEN`] bytes.
///
/// Inputs longer than the pad fall back to a direct constant-time compare;
/// a padded comparison also requires equal real lengths so `"admin"` never
/// matches `"admin\0"`.
fn eq_padded(a: &[u8], b: &[u8]) -> bool {
    if a.len() > PAD_LEN || b.len() > PAD_LEN {
        return constant_time_eq(a, b);
    }

    let mut padded_a = [0u8; PAD_LEN];
    let mut padded_b = [0u8; PAD_LEN];
    padded_a[..a.len()].copy_from_slice(a);
    padded_b[..b.len()].copy_from_slice(b);

    constant_time_eq(&padded_a, &padded_b) & (a.len() == b.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;

    fn admin() -> AdminConfig {
        AdminConfig {
            admin_id: "admin".into(),
            password_hash: hash_password("hunter2hunter2").unwrap(),
        }
    }

    #[test]
    fn accepts_matching_credentials() {
        let admin = admin();
        assert!(verify_credentials(&admin, "admin", "hunter2hunter2").unwrap());
    }

    #[test]
    fn rejects_wrong_username() {
        let admin = admin();
        assert!(!verify_credentials(&admin, "root", "hunter2hunter2").unwrap());
    }

    #[test]
    fn rejects_wrong_password() {
        let admin = admin();
        assert!(!verify_credentials(&admin, "admin", "wrong-password").unwrap());
    }

    #[test]
    fn empty_config_is_a_configuration_error() {
        let admin = AdminConfig {
            admin_id: String::new(),
            password_hash: String::new(),
        };
        assert!(verify_credentials(&admin, "admin", "pw").is_err());
    }

    #[test]
    fn malformed_hash_is_a_configuration_error() {
        let admin = AdminConfig {
            admin_id: "admin".into(),
            password_hash: "garbage".into(),
        };
        assert!(verify_credentials(&admin, "admin", "pw").is_err());
    }

    #[test]
    fn padded_eq_distinguishes_prefixes() {
        assert!(eq_padded(b"admin", b"admin"));
        assert!(!eq_padded(b"admin", b"administrator"));
        assert!(!eq_padded(b"admin", b"admi"));
        assert!(!eq_padded(b"admin", b"admin\0"));
    }
}
