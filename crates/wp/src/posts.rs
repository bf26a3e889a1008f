//! Post CRUD against `wp-json/wp/v2/posts`.

use chrono::{SecondsFormat, Utc};

use crate::client::WpClient;
use crate::error::WpError;
use crate::models::{PostFilters, PostInput, WpPage, WpPost};

pub struct PostsApi<'a> {
    client: &'a WpClient,
}

impl<'a> PostsApi<'a> {
    pub(crate) fn new(client: &'a WpClient) -> Self {
        Self { client }
    }

    /// List posts with pagination and filters.
    ///
    /// Requests both published and draft posts (which is why the read is
    /// authenticated) and embeds author details via `_embed=1`.
    pub async fn list(&self, filters: &PostFilters) -> Result<WpPage<WpPost>, WpError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", filters.page.to_string()),
            ("per_page", filters.per_page.to_string()),
            ("status", "publish,draft".to_string()),
            ("_embed", "1".to_string()),
        ];

        let now = Utc::now();
        if let Some(after) = filters.period.after(now) {
            query.push(("after", after.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(before) = filters.period.before(now) {
            query.push(("before", before.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if !filters.categories.is_empty() {
            let ids: Vec<String> =
                filters.categories.iter().map(u64::to_string).collect();
            query.push(("categories", ids.join(",")));
        }
        if let Some(author) = filters.author {
            query.push(("author", author.to_string()));
        }

        let response = self
            .client
            .authed(self.client.get("/posts"))
            .query(&query)
            .send()
            .await?;
        WpClient::read_page(response).await
    }

    /// Fetch a single post, drafts included.
    pub async fn get(&self, id: u64) -> Result<WpPost, WpError> {
        let response = self
            .client
            .authed(self.client.get(&format!("/posts/{id}")))
            .query(&[("_embed", "1")])
            .send()
            .await?;
        WpClient::read_json(response).await
    }

    pub async fn create(&self, input: &PostInput) -> Result<WpPost, WpError> {
        let response = self
            .client
            .authed(self.client.post("/posts"))
            .json(input)
            .send()
            .await?;
        WpClient::read_json(response).await
    }

    /// WordPress updates via POST to the item endpoint.
    pub async fn update(&self, id: u64, input: &PostInput) -> Result<WpPost, WpError> {
        let response = self
            .client
            .authed(self.client.post(&format!("/posts/{id}")))
            .json(input)
            .send()
            .await?;
        WpClient::read_json(response).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), WpError> {
        let response = self
            .client
            .authed(self.client.delete(&format!("/posts/{id}")))
            .send()
            .await?;
        WpClient::expect_success(response).await?;
        Ok(())
    }
}
