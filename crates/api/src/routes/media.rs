//! Media library: list, upload context, multipart upload, delete.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use wpadmin_core::validation::validate_upload;
use wpadmin_core::CoreError;
use wpadmin_wp::{MediaFilters, WpMedia};

use crate::auth::csrf;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::routes::require_csrf;
use crate::state::AppState;

#[derive(Deserialize)]
struct ListQuery {
    page: Option<u32>,
}

#[derive(Serialize)]
struct MediaList {
    items: Vec<WpMedia>,
    total: u64,
    total_pages: u64,
    page: u32,
}

#[derive(Serialize)]
struct UploadContext {
    csrf_token: String,
}

#[derive(Deserialize)]
struct DeleteForm {
    csrf_token: Option<String>,
}

struct UploadFields {
    file: Option<(String, String, Vec<u8>)>,
    title: String,
    csrf_token: Option<String>,
}

/// GET /media -- paginated image list.
async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<MediaList>>> {
    let page = query.page.unwrap_or(1).max(1);
    let filters = MediaFilters {
        page,
        ..MediaFilters::default()
    };

    let result = state.wp.media().list(&filters).await?;
    Ok(Json(DataResponse {
        data: MediaList {
            items: result.items,
            total: result.total,
            total_pages: result.total_pages,
            page,
        },
    }))
}

/// GET /media/new -- upload form context.
async fn new_media_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<DataResponse<UploadContext>>) {
    let (csrf_token, jar) = csrf::current_token(jar, state.secure_cookies());
    (jar, Json(DataResponse { data: UploadContext { csrf_token } }))
}

async fn read_upload_fields(mut multipart: Multipart) -> AppResult<UploadFields> {
    let mut fields = UploadFields {
        file: None,
        title: String::new(),
        csrf_token: None,
    };

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("").to_string().as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field.bytes().await?.to_vec();
                fields.file = Some((filename, content_type, bytes));
            }
            "title" => fields.title = field.text().await?,
            "csrf_token" => fields.csrf_token = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(fields)
}

/// POST /media -- validated multipart upload forwarded to WordPress.
async fn upload_media(
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let fields = read_upload_fields(multipart).await?;

    // CSRF before any side effect.
    require_csrf(&jar, fields.csrf_token.as_deref())?;

    let (filename, content_type, bytes) = fields
        .file
        .ok_or_else(|| CoreError::Validation("A file is required".into()))?;

    validate_upload(&filename, &content_type, &bytes)?;

    let title = if fields.title.is_empty() {
        filename.clone()
    } else {
        fields.title
    };

    let media = state
        .wp
        .media()
        .upload(&filename, &content_type, bytes, &title)
        .await?;
    tracing::info!(media_id = media.id, "Media uploaded");

    Ok(Redirect::to("/media"))
}

/// POST /media/{id}/delete -- permanent delete.
async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<DeleteForm>,
) -> AppResult<Redirect> {
    require_csrf(&jar, form.csrf_token.as_deref())?;

    state.wp.media().delete(id).await?;
    tracing::info!(media_id = id, "Media deleted");
    Ok(Redirect::to("/media"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/media", get(list_media).post(upload_media))
        .route("/media/new", get(new_media_page))
        .route("/media/{id}/delete", post(delete_media))
}
