use super::handlers::{assets, auth, comments, pages, presence, sse};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(allowed_origins: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if allowed_origins == "*" {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
        base.allow_origin(Any)
    } else {
        tracing::info!("CORS enabled for origins: {:?}", origins);
        base.allow_origin(origins)
    }
}

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let api = Router::new()
        .route("/comments", post(comments::post_comment))
        .route("/posts/:post_id/comments", get(comments::list_comments))
        .route("/posts/:post_id/comments/stream", get(sse::comments_stream))
        .route("/presence/:post_id", get(presence::list_present))
        .route("/presence/:post_id/heartbeat", post(presence::heartbeat))
        .route("/presence/:post_id/leave", post(presence::leave))
        .route("/presence/:post_id/stream", get(sse::presence_stream))
        .layer(cors_layer(allowed_origins));

    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(pages::blog_index))
        .route("/blog/:post_id", get(pages::post_detail))
        .route("/blog/:post_id/comments", post(pages::post_comment_form))
        .route("/auth/login", get(auth::login_form).post(auth::login_submit))
        .route("/auth/sign-up", get(auth::sign_up_form).post(auth::sign_up_submit))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/static/app.js", get(assets::app_js))
        .route("/static/app.css", get(assets::app_css))
        .route("/static/default_post_bg.svg", get(assets::default_post_bg))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
