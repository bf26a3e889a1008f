//! Standalone notification email flow, anchored to a post.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use wpadmin_core::text::{strip_html_tags, truncate_text};
use wpadmin_core::validation::validate_email_input;
use wpadmin_core::CoreError;

use crate::auth::csrf;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::routes::require_csrf;
use crate::state::AppState;

const EXCERPT_CHARS: usize = 200;

#[derive(Serialize)]
struct ComposeContext {
    post_id: u64,
    post_title: String,
    /// Plain-text excerpt of the post for prefilling the body.
    excerpt: String,
    csrf_token: String,
}

#[derive(Deserialize)]
struct EmailForm {
    title: String,
    content: String,
    csrf_token: Option<String>,
}

#[derive(Serialize)]
struct SendResult {
    sent: bool,
}

/// GET /send-email/{id} -- compose context built from the post.
async fn compose_page(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<DataResponse<ComposeContext>>)> {
    let post = state.wp.posts().get(id).await?;
    let (csrf_token, jar) = csrf::current_token(jar, state.secure_cookies());

    Ok((
        jar,
        Json(DataResponse {
            data: ComposeContext {
                post_id: post.id,
                post_title: post.title.rendered,
                excerpt: truncate_text(
                    &strip_html_tags(&post.content.rendered),
                    EXCERPT_CHARS,
                ),
                csrf_token,
            },
        }),
    ))
}

/// POST /send-email/{id} -- validated send to the notification recipient.
async fn send_email(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<EmailForm>,
) -> AppResult<Json<DataResponse<SendResult>>> {
    require_csrf(&jar, form.csrf_token.as_deref())?;
    validate_email_input(&form.title, &form.content)?;

    let mailer = state.mailer.as_ref().ok_or_else(|| {
        CoreError::Configuration("email dispatch is not configured".into())
    })?;

    mailer
        .send(mailer.notification_recipient(), &form.title, &form.content)
        .await
        .map_err(|e| AppError::InternalError(format!("email send failed: {e}")))?;

    tracing::info!(post_id = id, "Notification email dispatched");
    Ok(Json(DataResponse {
        data: SendResult { sent: true },
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/send-email/{id}", get(compose_page).post(send_email))
}
