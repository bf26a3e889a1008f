//! Post list, detail, editor context, and CRUD.

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use wpadmin_core::sanitizer::{is_html_safe, sanitize_html};
use wpadmin_core::text::{strip_html_tags, truncate_text};
use wpadmin_core::validation::validate_post_input;
use wpadmin_core::CoreError;
use wpadmin_wp::{Period, PostFilters, PostInput, WpCategory, WpPost, WpUser};

use crate::auth::csrf;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::routes::require_csrf;
use crate::state::AppState;

const EXCERPT_CHARS: usize = 200;

#[derive(Deserialize)]
struct ListQuery {
    page: Option<u32>,
    period: Option<String>,
    /// Comma-separated category ids.
    categories: Option<String>,
    author: Option<u64>,
}

#[derive(Serialize)]
struct PostSummary {
    id: u64,
    title: String,
    date: String,
    status: String,
    author: u64,
    categories: Vec<u64>,
    excerpt: String,
}

#[derive(Serialize)]
struct PostList {
    items: Vec<PostSummary>,
    total: u64,
    total_pages: u64,
    page: u32,
}

#[derive(Serialize)]
struct PostDetail {
    id: u64,
    title: String,
    /// Sanitized HTML; refused entirely if the safety gate rejects it.
    content: String,
    date: String,
    modified: String,
    status: String,
    author: u64,
    categories: Vec<u64>,
    csrf_token: String,
}

#[derive(Serialize)]
struct EditorContext {
    categories: Vec<WpCategory>,
    users: Vec<WpUser>,
    csrf_token: String,
}

#[derive(Deserialize)]
struct PostForm {
    title: String,
    content: String,
    /// Numeric category id as submitted by the form.
    categories: String,
    /// Numeric author id as submitted by the form.
    author: String,
    status: Option<String>,
    csrf_token: Option<String>,
}

#[derive(Deserialize)]
struct DeleteForm {
    csrf_token: Option<String>,
}

fn summarize(post: &WpPost) -> PostSummary {
    let excerpt_source = post
        .excerpt
        .as_ref()
        .map(|e| e.rendered.as_str())
        .unwrap_or(post.content.rendered.as_str());
    PostSummary {
        id: post.id,
        title: post.title.rendered.clone(),
        date: post.date.clone(),
        status: post.status.clone(),
        author: post.author,
        categories: post.categories.clone(),
        excerpt: truncate_text(&strip_html_tags(excerpt_source), EXCERPT_CHARS),
    }
}

fn parse_category_list(raw: Option<&str>) -> Vec<u64> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    })
    .unwrap_or_default()
}

fn post_input_from_form(form: &PostForm) -> Result<PostInput, CoreError> {
    validate_post_input(&form.title, &form.content, &form.categories, &form.author)?;

    // Numeric per validation above.
    let category: u64 = form
        .categories
        .parse()
        .map_err(|_| CoreError::Validation("Invalid category".into()))?;
    let author: u64 = form
        .author
        .parse()
        .map_err(|_| CoreError::Validation("Invalid author".into()))?;

    Ok(PostInput {
        title: form.title.clone(),
        content: form.content.clone(),
        categories: vec![category],
        author,
        status: form.status.clone().unwrap_or_else(|| "draft".into()),
    })
}

/// GET /posts -- paginated list with period/category/author filters.
async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<PostList>>> {
    let page = query.page.unwrap_or(1).max(1);
    let filters = PostFilters {
        page,
        period: Period::parse(query.period.as_deref().unwrap_or("all")),
        categories: parse_category_list(query.categories.as_deref()),
        author: query.author,
        ..PostFilters::default()
    };

    let result = state.wp.posts().list(&filters).await?;
    Ok(Json(DataResponse {
        data: PostList {
            items: result.items.iter().map(summarize).collect(),
            total: result.total,
            total_pages: result.total_pages,
            page,
        },
    }))
}

/// GET /posts/new -- editor context: categories, authors, CSRF token.
async fn new_post_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<DataResponse<EditorContext>>)> {
    let categories = state.wp.categories().list().await?;
    let users = state.wp.users().list().await?;
    let (csrf_token, jar) = csrf::current_token(jar, state.secure_cookies());

    Ok((
        jar,
        Json(DataResponse {
            data: EditorContext {
                categories,
                users,
                csrf_token,
            },
        }),
    ))
}

/// POST /posts -- create a post (draft by default) and fire the
/// notification email without blocking on it.
async fn create_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> AppResult<Redirect> {
    require_csrf(&jar, form.csrf_token.as_deref())?;
    let input = post_input_from_form(&form)?;

    let post = state.wp.posts().create(&input).await?;
    tracing::info!(post_id = post.id, "Post created");

    // Fire-and-forget: an email failure never affects the created post.
    if let Some(mailer) = state.mailer.clone() {
        let title = form.title.clone();
        let excerpt = truncate_text(&strip_html_tags(&form.content), EXCERPT_CHARS);
        tokio::spawn(async move {
            let subject = format!("New post created: {title}");
            let body =
                format!("A new post was created.\n\nTitle: {title}\n\nContent:\n{excerpt}");
            if let Err(e) = mailer
                .send(mailer.notification_recipient(), &subject, &body)
                .await
            {
                tracing::error!(error = %e, "Post notification email failed");
            }
        });
    }

    Ok(Redirect::to(&format!("/posts/{}", post.id)))
}

/// GET /posts/{id} -- detail with sanitized, safety-checked content.
async fn post_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<DataResponse<PostDetail>>)> {
    let post = state.wp.posts().get(id).await?;

    let content = sanitize_html(&post.content.rendered);
    if !is_html_safe(&content) {
        tracing::warn!(post_id = id, "Post content failed the safety gate");
        return Err(CoreError::UnsafeContent.into());
    }

    let (csrf_token, jar) = csrf::current_token(jar, state.secure_cookies());
    Ok((
        jar,
        Json(DataResponse {
            data: PostDetail {
                id: post.id,
                title: post.title.rendered,
                content,
                date: post.date,
                modified: post.modified,
                status: post.status,
                author: post.author,
                categories: post.categories,
                csrf_token,
            },
        }),
    ))
}

/// POST /posts/{id} -- update.
async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> AppResult<Redirect> {
    require_csrf(&jar, form.csrf_token.as_deref())?;
    let input = post_input_from_form(&form)?;

    state.wp.posts().update(id, &input).await?;
    tracing::info!(post_id = id, "Post updated");
    Ok(Redirect::to(&format!("/posts/{id}")))
}

/// POST /posts/{id}/delete -- delete.
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<DeleteForm>,
) -> AppResult<Redirect> {
    require_csrf(&jar, form.csrf_token.as_deref())?;

    state.wp.posts().delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");
    Ok(Redirect::to("/posts"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/new", get(new_post_page))
        .route("/posts/{id}", get(post_detail).post(update_post))
        .route("/posts/{id}/delete", post(delete_post))
}
