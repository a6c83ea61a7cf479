use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use adapter::actions::{load_post_page, submit_comment};
use domain::{AuthToken, CommentComposer, CommentForm, Notice, PostId, Toast, ToastKind};
use tracing::error;

use super::{chrome, NoticeQuery};
use crate::http::session::{CurrentViewer, SessionToken};
use crate::state::AppState;
use crate::views::{self, PostView};

pub async fn home(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Query(q): Query<NoticeQuery>,
) -> Html<String> {
    Html(views::home_page(&chrome(&state, viewer.is_authenticated(), q.toast())))
}

pub async fn blog_index(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Query(q): Query<NoticeQuery>,
) -> Response {
    match state.backend.list_posts().await {
        Ok(posts) => {
            let chrome = chrome(&state, viewer.is_authenticated(), q.toast());
            Html(views::list_page(&chrome, &posts)).into_response()
        }
        Err(e) => {
            error!("list posts failed: {:#}", e);
            let toast = Some(Toast::error("Failed to load posts"));
            (
                StatusCode::BAD_GATEWAY,
                Html(views::list_page(&chrome(&state, viewer.is_authenticated(), toast), &[])),
            )
                .into_response()
        }
    }
}

async fn render_post(
    state: &AppState,
    token: Option<AuthToken>,
    raw_post_id: &str,
    composer: Option<CommentComposer>,
    toast: Option<Toast>,
    status: StatusCode,
) -> Response {
    let page = match load_post_page(state.backend.as_ref(), raw_post_id, token).await {
        Ok(page) => page,
        Err(e) => {
            error!(post_id = raw_post_id, "load post failed: {:#}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Html(views::not_found_page(&chrome(
                    state,
                    false,
                    Some(Toast::error("Failed to load post")),
                ))),
            )
                .into_response();
        }
    };
    let signed_in = page.viewer_id.is_some();

    let Some(post) = page.post else {
        return (
            StatusCode::NOT_FOUND,
            Html(views::not_found_page(&chrome(state, signed_in, toast))),
        )
            .into_response();
    };

    let composer = composer.unwrap_or_else(|| CommentComposer::new(post.id.clone()));
    let html = views::post_page(
        &chrome(state, signed_in, toast),
        PostView {
            post: &post,
            comments: &page.comments,
            viewer_id: page.viewer_id.as_ref(),
            composer: &composer,
            heartbeat_secs: state.site.heartbeat_interval_secs,
        },
    );
    (status, Html(html)).into_response()
}

pub async fn post_detail(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    SessionToken(token): SessionToken,
    Query(q): Query<NoticeQuery>,
) -> Response {
    render_post(&state, token, &post_id, None, q.toast(), StatusCode::OK).await
}

/// Plain form post for clients without scripting.
pub async fn post_comment_form(
    State(state): State<AppState>,
    Path(raw_post_id): Path<String>,
    SessionToken(token): SessionToken,
    Form(form): Form<CommentForm>,
) -> Response {
    let Ok(post_id) = PostId::new(raw_post_id.as_str()) else {
        return render_post(&state, token, &raw_post_id, None, None, StatusCode::NOT_FOUND).await;
    };

    let mut composer = CommentComposer::with_body(post_id.clone(), form.body);
    let toast = submit_comment(state.backend.as_ref(), token.clone(), &mut composer).await;

    if toast.kind == ToastKind::Success {
        return Redirect::to(&format!(
            "/blog/{}?notice={}",
            post_id,
            Notice::CommentPosted.code()
        ))
        .into_response();
    }

    let status = if composer.errors().is_empty() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    render_post(&state, token, post_id.as_str(), Some(composer), Some(toast), status).await
}
