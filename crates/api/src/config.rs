use wpadmin_core::CoreError;

/// Deployment environment, read from `APP_ENV`.
///
/// Controls the `Secure` cookie attribute and the HTTPS redirect in the edge
/// gatekeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// | Env Var                 | Default       |
/// |-------------------------|---------------|
/// | `HOST`                  | `0.0.0.0`     |
/// | `PORT`                  | `3000`        |
/// | `APP_ENV`               | `development` |
/// | `REQUEST_TIMEOUT_SECS`  | `30`          |
/// | `SHUTDOWN_TIMEOUT_SECS` | `30`          |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub request_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration with defaults. Malformed numeric values fail fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            environment: Environment::from_env(),
            request_timeout_secs,
            shutdown_timeout_secs,
        }
    }
}

/// Admin identity used by the credential verifier.
///
/// Missing values are a startup error: the login endpoint must never fall
/// back to accepting arbitrary credentials.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Expected admin username (`ADMIN_ID`).
    pub admin_id: String,
    /// Argon2id PHC hash of the admin password (`ADMIN_PASSWORD_HASH`).
    /// Generate with the `hash-password` binary.
    pub password_hash: String,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        let admin_id = required("ADMIN_ID")?;
        let password_hash = required("ADMIN_PASSWORD_HASH")?;

        if !password_hash.starts_with("$argon2") {
            return Err(CoreError::Configuration(
                "ADMIN_PASSWORD_HASH is not an Argon2 PHC string".into(),
            ));
        }

        Ok(Self {
            admin_id,
            password_hash,
        })
    }
}

/// Email dispatch settings. All three values must be present for email to be
/// enabled; otherwise the app runs with email disabled.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    /// Default recipient for notification emails (`NOTIFICATION_EMAIL`).
    pub notification_email: String,
}

impl EmailConfig {
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("EMAIL_API_URL").ok()?;
        let api_key = std::env::var("EMAIL_API_KEY").ok()?;
        let notification_email = std::env::var("NOTIFICATION_EMAIL").ok()?;

        if api_url.is_empty() || api_key.is_empty() || notification_email.is_empty() {
            return None;
        }

        Some(Self {
            api_url,
            api_key,
            notification_email,
        })
    }
}

fn required(name: &str) -> Result<String, CoreError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CoreError::Configuration(format!("{name} is not set"))),
    }
}
