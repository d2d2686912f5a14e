use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::pages::{
    render_error_page, render_home_page, render_post_detail_page, FormDraft, HomePageParams,
    PostDetailParams,
};
use super::AppState;
use crate::forum::{self, CommentSubmission, ForumError, PostSubmission, UploadedFile};
use crate::store::PostId;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/post-question", post(create_post))
        .route("/answer/:id", get(answer_form).post(create_comment))
        .route("/api/posts", get(api_posts))
        .route("/api/posts/:id", get(api_post))
        .route("/healthz", get(health))
}

// ========== HTML Routes ==========

async fn home(State(state): State<AppState>) -> Response {
    let posts = forum::list_feed(&state.store).await;
    render_home_page(&HomePageParams::new(&state.config.site_title, &posts)).into_response()
}

async fn create_post(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let submission = match read_post_submission(&mut multipart).await {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "Malformed post submission");
            return (e.status(), e.body_text()).into_response();
        }
    };

    let author = submission.author.clone();
    let text = submission.text.clone();

    match forum::create_post(&state.store, &state.uploads, submission).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e @ (ForumError::Validation(_) | ForumError::InvalidImage(_))) => {
            let message = e.to_string();
            let posts = forum::list_feed(&state.store).await;
            let draft = FormDraft {
                author: Some(&author),
                text: Some(&text),
            };
            let params = HomePageParams::new(&state.config.site_title, &posts).error(&message, draft);
            (StatusCode::BAD_REQUEST, render_home_page(&params)).into_response()
        }
        Err(e) => failure_page(&state, &e),
    }
}

async fn answer_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(post_id) = parse_post_id(&id) else {
        return not_found_page(&state, &id);
    };

    match forum::show_post(&state.store, post_id).await {
        Ok(post) => {
            render_post_detail_page(&PostDetailParams::new(&state.config.site_title, &post))
                .into_response()
        }
        Err(e) => failure_page(&state, &e),
    }
}

#[derive(Debug, Deserialize)]
struct CommentForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    answer: String,
}

async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Response {
    let Some(post_id) = parse_post_id(&id) else {
        return not_found_page(&state, &id);
    };

    let submission = CommentSubmission {
        author: form.username.clone(),
        text: form.answer.clone(),
    };

    match forum::create_comment(&state.store, post_id, submission).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(ForumError::Validation(field)) => {
            let message = ForumError::Validation(field).to_string();
            // The post may not exist either; report that instead.
            let post = match forum::show_post(&state.store, post_id).await {
                Ok(post) => post,
                Err(e) => return failure_page(&state, &e),
            };
            let draft = FormDraft {
                author: Some(&form.username),
                text: Some(&form.answer),
            };
            let params =
                PostDetailParams::new(&state.config.site_title, &post).error(&message, draft);
            (StatusCode::BAD_REQUEST, render_post_detail_page(&params)).into_response()
        }
        Err(e) => failure_page(&state, &e),
    }
}

async fn health() -> &'static str {
    "ok"
}

// ========== JSON API ==========

async fn api_posts(State(state): State<AppState>) -> Response {
    Json(forum::list_feed(&state.store).await).into_response()
}

async fn api_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(post_id) = parse_post_id(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("post {id} not found") })),
        )
            .into_response();
    };

    match forum::show_post(&state.store, post_id).await {
        Ok(post) => Json(post).into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

// ========== Helpers ==========

/// Collect the `username`, `question` and optional `image` fields.
///
/// Unknown fields are skipped; missing text fields stay empty and are
/// rejected later by validation.
async fn read_post_submission(
    multipart: &mut Multipart,
) -> Result<PostSubmission, MultipartError> {
    let mut submission = PostSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => submission.author = field.text().await?,
            "question" => submission.text = field.text().await?,
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                submission.image = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn parse_post_id(raw: &str) -> Option<PostId> {
    raw.parse().ok()
}

fn not_found_page(state: &AppState, id: &str) -> Response {
    let message = format!("post {id} not found");
    (
        StatusCode::NOT_FOUND,
        render_error_page(&state.config.site_title, "Not Found", &message),
    )
        .into_response()
}

/// Turn a failed board operation into an error page.
fn failure_page(state: &AppState, err: &ForumError) -> Response {
    let (status, heading, message) = match err {
        ForumError::Validation(_) | ForumError::InvalidImage(_) => {
            (StatusCode::BAD_REQUEST, "Bad Request", err.to_string())
        }
        ForumError::OutOfRange { .. } => (StatusCode::NOT_FOUND, "Not Found", err.to_string()),
        // Storage details stay in the log.
        ForumError::Persistence(_) | ForumError::Upload(_) => {
            error!(error = %err, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something Went Wrong",
                "Your submission could not be saved. Please try again.".to_string(),
            )
        }
    };

    (
        status,
        render_error_page(&state.config.site_title, heading, &message),
    )
        .into_response()
}
