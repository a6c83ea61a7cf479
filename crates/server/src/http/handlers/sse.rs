use std::sync::Arc;

use adapter::BlogBackend;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use domain::{LiveEvent, PostId, PresenceEntry};
use futures::{future, stream, Stream, StreamExt};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::state::AppState;

const KEEP_ALIVE_SECS: u64 = 15;

fn json_event<T: serde::Serialize>(name: &str, data: &T) -> Result<Event, axum::Error> {
    Event::default().event(name).json_data(data).map_err(|e| {
        tracing::error!("SSE serialization error: {}", e);
        axum::Error::new(e)
    })
}

async fn comments_snapshot(
    backend: &dyn BlogBackend,
    post_id: &PostId,
) -> anyhow::Result<Result<Event, axum::Error>> {
    let comments = backend.comments_for_post(post_id).await?;
    Ok(json_event("comments", &comments))
}

pub async fn comments_stream(
    State(state): State<AppState>,
    Path(raw_post_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, (StatusCode, String)> {
    let post_id = PostId::new(raw_post_id).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    // 1. subscribe before the snapshot so no comment slips between the two
    let rx = state.tx_live.subscribe();
    // 2. full list first
    let initial = comments_snapshot(state.backend.as_ref(), &post_id)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;
    tracing::info!("comment stream opened: post={}", post_id);

    // 3. live tail; a lagged receiver gets the full list again
    let backend: Arc<dyn BlogBackend> = state.backend.clone();
    let live = BroadcastStream::new(rx).filter_map(move |result| {
        let backend = backend.clone();
        let post_id = post_id.clone();
        async move {
            match result {
                Ok(LiveEvent::CommentCreated {
                    post_id: event_post_id,
                    comment,
                }) if event_post_id == post_id => Some(json_event("new_comment", &comment)),
                Ok(_) => None,
                Err(BroadcastStreamRecvError::Lagged(missed)) => {
                    tracing::warn!(
                        "comment stream lagged by {} for post {}, resending list",
                        missed,
                        post_id
                    );
                    match comments_snapshot(backend.as_ref(), &post_id).await {
                        Ok(event) => Some(event),
                        Err(e) => {
                            tracing::error!("comment resync failed for {}: {:#}", post_id, e);
                            None
                        }
                    }
                }
            }
        }
    });
    let stream = stream::once(future::ready(initial)).chain(live);

    Ok(Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(std::time::Duration::from_secs(KEEP_ALIVE_SECS))))
}

/// Current viewers of a room, then every change to that set.
pub async fn presence_stream(
    State(state): State<AppState>,
    Path(raw_room): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, (StatusCode, String)> {
    let room = PostId::new(raw_room).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let rx = state.tx_live.subscribe();
    let initial: Vec<PresenceEntry> = state
        .presence
        .present(&room)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    let presence = state.presence.clone();
    let live = BroadcastStream::new(rx).filter_map(move |result| {
        let presence = presence.clone();
        let room = room.clone();
        async move {
            match result {
                Ok(LiveEvent::PresenceChanged { room_id, present }) if room_id == room => {
                    Some(json_event("presence", &present))
                }
                Ok(_) => None,
                Err(BroadcastStreamRecvError::Lagged(_)) => {
                    tracing::warn!("presence stream lagged for room {}, resending list", room);
                    match presence.present(&room).await {
                        Ok(present) => Some(json_event("presence", &present)),
                        Err(e) => {
                            tracing::error!("presence resync failed for {}: {:#}", room, e);
                            None
                        }
                    }
                }
            }
        }
    });
    let stream = stream::once(future::ready(json_event("presence", &initial))).chain(live);

    Ok(Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(std::time::Duration::from_secs(KEEP_ALIVE_SECS))))
}
