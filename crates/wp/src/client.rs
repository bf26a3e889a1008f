//! HTTP client core shared by the entity APIs.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::WpConfig;
use crate::error::WpError;
use crate::media::MediaApi;
use crate::models::WpPage;
use crate::posts::PostsApi;
use crate::taxonomy::{CategoriesApi, UsersApi};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for a single WordPress site.
///
/// Cheap to clone is not needed here; the HTTP app holds it behind an `Arc`.
/// Writes and draft-including reads carry Basic auth built from the
/// application password; public taxonomy reads go unauthenticated.
pub struct WpClient {
    http: Client,
    config: WpConfig,
}

impl WpClient {
    pub fn new(config: WpConfig) -> Result<Self, WpError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// Entity APIs.
    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(self)
    }

    pub fn media(&self) -> MediaApi<'_> {
        MediaApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/wp-json/wp/v2{}", self.config.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.endpoint(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.endpoint(path))
    }

    /// Attach Basic auth from the application password.
    pub(crate) fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.config.username, Some(&self.config.app_password))
    }

    /// Map a non-2xx response to [`WpError::Api`], preserving the upstream
    /// `{message, code}` payload when one is present.
    pub(crate) async fn expect_success(response: Response) -> Result<Response, WpError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let (mut message, mut code) = (status.to_string(), None);
        if let Ok(body) = response.json::<serde_json::Value>().await {
            if let Some(m) = body.get("message").and_then(|v| v.as_str()) {
                message = m.to_string();
            }
            code = body
                .get("code")
                .and_then(|v| v.as_str())
                .map(str::to_string);
        }

        tracing::warn!(
            status = status.as_u16(),
            code = code.as_deref().unwrap_or("-"),
            "WordPress API returned an error"
        );

        Err(WpError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, WpError> {
        let response = Self::expect_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Read a list body together with the `X-WP-Total` / `X-WP-TotalPages`
    /// pagination headers. Missing headers count as zero.
    pub(crate) async fn read_page<T: DeserializeOwned>(
        response: Response,
    ) -> Result<WpPage<T>, WpError> {
        let response = Self::expect_success(response).await?;

        let total = header_u64(&response, "X-WP-Total");
        let total_pages = header_u64(&response, "X-WP-TotalPages");
        let items = response.json::<Vec<T>>().await?;

        Ok(WpPage {
            items,
            total,
            total_pages,
        })
    }
}

fn header_u64(response: &Response, name: &str) -> u64 {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
