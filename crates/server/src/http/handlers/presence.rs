use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::{PostId, PresenceEntry};

use crate::http::session::CurrentViewer;
use crate::state::AppState;

type ApiError = (StatusCode, String);

fn room(raw: String) -> Result<PostId, ApiError> {
    PostId::new(raw).map_err(|e| (StatusCode::BAD_REQUEST, e))
}

pub async fn heartbeat(
    State(state): State<AppState>,
    Path(raw_room): Path<String>,
    viewer: CurrentViewer,
) -> Result<StatusCode, ApiError> {
    let room = room(raw_room)?;
    let viewer = viewer
        .viewer
        .ok_or((StatusCode::UNAUTHORIZED, "Sign in to join presence".to_string()))?;

    state
        .presence
        .announce(&room, &viewer)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn leave(
    State(state): State<AppState>,
    Path(raw_room): Path<String>,
    viewer: CurrentViewer,
) -> Result<StatusCode, ApiError> {
    let room = room(raw_room)?;
    let viewer = viewer
        .viewer
        .ok_or((StatusCode::UNAUTHORIZED, "Not signed in".to_string()))?;

    state
        .presence
        .leave(&room, &viewer.user_id)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_present(
    State(state): State<AppState>,
    Path(raw_room): Path<String>,
) -> Result<Json<Vec<PresenceEntry>>, ApiError> {
    let room = room(raw_room)?;
    let present = state
        .presence
        .present(&room)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;
    Ok(Json(present))
}
