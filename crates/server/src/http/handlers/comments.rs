use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use adapter::{actions::create_comment_action, ActionError};
use domain::{Comment, CommentForm, PostId};
use serde_json::json;

use crate::http::session::SessionToken;
use crate::state::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, (StatusCode, String)> {
    let post_id = PostId::new(post_id).map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let comments = state
        .backend
        .comments_for_post(&post_id)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(Json(comments))
}

pub async fn post_comment(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Json(form): Json<CommentForm>,
) -> Response {
    match create_comment_action(state.backend.as_ref(), token, &form).await {
        Ok(comment) => Json(comment).into_response(),
        Err(ActionError::Invalid(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        )
            .into_response(),
        Err(_) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "Failed to create comment" })),
        )
            .into_response(),
    }
}
