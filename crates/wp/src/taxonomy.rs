//! Category and user directory lookups used by the post editor.

use crate::client::WpClient;
use crate::error::WpError;
use crate::models::{WpCategory, WpUser};

pub struct CategoriesApi<'a> {
    client: &'a WpClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a WpClient) -> Self {
        Self { client }
    }

    /// All categories. The site is small; a single page of 100 covers it.
    pub async fn list(&self) -> Result<Vec<WpCategory>, WpError> {
        let response = self
            .client
            .get("/categories")
            .query(&[("per_page", "100")])
            .send()
            .await?;
        WpClient::read_json(response).await
    }
}

pub struct UsersApi<'a> {
    client: &'a WpClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a WpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<WpUser>, WpError> {
        let response = self
            .client
            .get("/users")
            .query(&[("per_page", "100")])
            .send()
            .await?;
        WpClient::read_json(response).await
    }
}
