//! Media library operations against `wp-json/wp/v2/media`.

use reqwest::multipart::{Form, Part};

use crate::client::WpClient;
use crate::error::WpError;
use crate::models::{MediaFilters, WpMedia, WpPage};

pub struct MediaApi<'a> {
    client: &'a WpClient,
}

impl<'a> MediaApi<'a> {
    pub(crate) fn new(client: &'a WpClient) -> Self {
        Self { client }
    }

    /// List image attachments (the console only manages images).
    pub async fn list(&self, filters: &MediaFilters) -> Result<WpPage<WpMedia>, WpError> {
        let response = self
            .client
            .authed(self.client.get("/media"))
            .query(&[
                ("page", filters.page.to_string()),
                ("per_page", filters.per_page.to_string()),
                ("media_type", "image".to_string()),
            ])
            .send()
            .await?;
        WpClient::read_page(response).await
    }

    /// Upload an image as a multipart form. The caller is responsible for
    /// validating the file beforehand (size, type, magic bytes).
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
        title: &str,
    ) -> Result<WpMedia, WpError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("title", title.to_string());

        let response = self
            .client
            .authed(self.client.post("/media"))
            .multipart(form)
            .send()
            .await?;
        WpClient::read_json(response).await
    }

    /// Delete an attachment. Media has no trash, so `force=true` is required.
    pub async fn delete(&self, id: u64) -> Result<(), WpError> {
        let response = self
            .client
            .authed(self.client.delete(&format!("/media/{id}")))
            .query(&[("force", "true")])
            .send()
            .await?;
        WpClient::expect_success(response).await?;
        Ok(())
    }
}
