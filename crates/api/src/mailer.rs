//! Notification email dispatch over an HTTP email API.
//!
//! Post-creation notifications are fire-and-forget: a send failure is
//! logged and never rolls back or fails the post mutation it accompanies.
//! The standalone send-email operation surfaces a generic failure message;
//! detail stays server-side.

use std::time::Duration;

use serde::Serialize;

use crate::config::EmailConfig;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email API returned status {status}")]
    Api { status: u16 },

    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    to: &'a str,
    title: &'a str,
    content: &'a str,
}

pub struct Mailer {
    http: reqwest::Client,
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// Default recipient for post notifications.
    pub fn notification_recipient(&self) -> &str {
        &self.config.notification_email
    }

    /// POST `{to, title, content}` to the email API with the `api_key`
    /// header. Logs outcome without recipient contents.
    pub async fn send(&self, to: &str, title: &str, content: &str) -> Result<(), MailerError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .header("api_key", &self.config.api_key)
            .json(&SendEmailBody { to, title, content })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Email API rejected the send");
            return Err(MailerError::Api {
                status: status.as_u16(),
            });
        }

        tracing::info!("Notification email sent");
        Ok(())
    }
}
