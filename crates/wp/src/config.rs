use wpadmin_core::CoreError;

/// WordPress connection settings loaded from the environment.
///
/// | Env Var                  | Meaning                                  |
/// |--------------------------|------------------------------------------|
/// | `WORDPRESS_URL`          | Site base URL (no trailing slash needed) |
/// | `WORDPRESS_USERNAME`     | Account owning the application password  |
/// | `WORDPRESS_APP_PASSWORD` | Application password (spaces tolerated)  |
#[derive(Debug, Clone)]
pub struct WpConfig {
    pub base_url: String,
    pub username: String,
    /// Application password with the display whitespace stripped, per
    /// WordPress convention (the UI shows it in space-separated groups).
    pub app_password: String,
}

impl WpConfig {
    /// Load and validate the configuration, failing fast when anything
    /// required is missing.
    pub fn from_env() -> Result<Self, CoreError> {
        let base_url = required("WORDPRESS_URL")?;
        let username = required("WORDPRESS_USERNAME")?;
        let app_password = required("WORDPRESS_APP_PASSWORD")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            app_password: app_password.split_whitespace().collect(),
        })
    }
}

fn required(name: &str) -> Result<String, CoreError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CoreError::Configuration(format!("{name} is not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_from_app_password() {
        let config = WpConfig {
            base_url: "https://blog.example".into(),
            username: "admin".into(),
            app_password: "abcd efgh ijkl".split_whitespace().collect(),
        };
        assert_eq!(config.app_password, "abcdefghijkl");
    }
}
