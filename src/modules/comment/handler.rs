use std::sync::Arc;
use axum::{Extension, Router, http::StatusCode, routing::post};
use log::{debug, info, warn};
use serde_json::Value;
use crate::{
    AppState,
    dto::{HttpResult, Reply, StatusResponse},
    error::{BodyParser, ErrorMessage, HttpError},
    github::{ContentStore, UpstreamResponse},
    modules::comment::{dto::CommentSubmission, model::CommentRecord},
};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your comment has been received and will be published shortly :)";

pub fn comment_router() -> Router {
    Router::new()
        .route("/post", post(comment_post))
}

async fn comment_post(
    Extension(app_state): Extension<Arc<AppState>>,
    BodyParser(body): BodyParser<CommentSubmission>
) -> Reply {
    let status = submit_comment(app_state.content_store.as_ref(), &body).await
        .unwrap_or_else(StatusResponse::from);
    Reply::new(status, app_state.env.mirror_status_code)
}

/// Validates the submission, writes one file through `store` and turns the
/// outcome into the `{statusCode, msg}` the form expects. Never retries.
pub async fn submit_comment(store: &dyn ContentStore, submission: &CommentSubmission) -> HttpResult<StatusResponse> {
    submission.validate().map_err(|e| {
        debug!("Rejected comment for {:?}: {}", submission.slug, e);
        HttpError::from(e)
    })?;
    let record = CommentRecord::new(submission);
    let path = record.storage_path(&submission.slug);
    let request = record.commit_request(&submission.slug)
        .map_err(|e| HttpError::server_error(format!("{} {}", ErrorMessage::ProcessingFailed, e)))?;
    let response = store.create_file(&path, &request).await
        .map_err(|e| {
            warn!("Content API request for {} failed: {}", path, e);
            HttpError::server_error(format!("{} {}", ErrorMessage::ProcessingFailed, e))
        })?;
    let result = interpret_response(response);
    match &result {
        Ok(_) => info!("Comment {} stored at {}", record.id, path),
        Err(e) => warn!("Comment {} was not stored: {}", record.id, e),
    }
    result
}

// A created file comes back with `content` and `commit`; a failed commit carries `status` instead.
fn interpret_response(response: UpstreamResponse) -> HttpResult<StatusResponse> {
    if !(200..300).contains(&response.status) {
        let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(HttpError::new(status, ErrorMessage::FailedReachApi.to_string()));
    }
    let data: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);
    if data.get("commit").is_some() {
        return Ok(StatusResponse::new(StatusCode::OK.as_u16(), SUCCESS_MESSAGE));
    }
    let message = match data.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(status) => status.to_string(),
        None => ErrorMessage::ProcessingFailed.to_string(),
    };
    Err(HttpError::unprocessable_entity(message))
}
