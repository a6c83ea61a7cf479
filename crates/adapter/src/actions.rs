//! Server-side shims: validate, then forward to the backend or auth
//! service. Remote failures are logged and collapsed into
//! [`ActionError::Failed`] / [`ActionError::Auth`].

use domain::{
    AuthToken, Comment, CommentComposer, CommentForm, LoginForm, Post, PostId, Session,
    SignUpForm, SubmitOutcome, Toast, UserId,
};
use tracing::warn;

use crate::error::ActionError;
use crate::traits::{AuthService, BlogBackend};

pub async fn create_comment_action(
    backend: &dyn BlogBackend,
    token: Option<AuthToken>,
    form: &CommentForm,
) -> Result<Comment, ActionError> {
    let valid = form.parse()?;
    backend
        .create_comment(token, &valid.post_id, &valid.body)
        .await
        .map_err(|e| {
            warn!(post_id = %valid.post_id, "create comment failed: {:#}", e);
            ActionError::Failed
        })
}

pub async fn submit_comment(
    backend: &dyn BlogBackend,
    token: Option<AuthToken>,
    composer: &mut CommentComposer,
) -> Toast {
    let outcome = match create_comment_action(backend, token, &composer.draft()).await {
        Ok(_) => SubmitOutcome::Posted,
        Err(ActionError::Invalid(errors)) => SubmitOutcome::Invalid(errors),
        Err(_) => SubmitOutcome::Failed,
    };
    composer.settle(outcome)
}

pub async fn sign_in_action(
    auth: &dyn AuthService,
    form: &LoginForm,
) -> Result<Session, ActionError> {
    form.check()?;
    auth.sign_in(&form.email, &form.password)
        .await
        .map_err(|e| {
            warn!("sign-in failed: {}", e);
            e.into()
        })
}

pub async fn sign_up_action(
    auth: &dyn AuthService,
    form: &SignUpForm,
) -> Result<Session, ActionError> {
    form.check()?;
    auth.sign_up(&form.name, &form.email, &form.password)
        .await
        .map_err(|e| {
            warn!("sign-up failed: {}", e);
            e.into()
        })
}

pub async fn sign_out_action(auth: &dyn AuthService, token: &AuthToken) -> Result<(), ActionError> {
    auth.sign_out(token).await.map_err(|e| {
        warn!("sign-out failed: {}", e);
        e.into()
    })
}

#[derive(Debug)]
pub struct PostPage {
    pub post: Option<Post>,
    pub comments: Vec<Comment>,
    pub viewer_id: Option<UserId>,
}

pub async fn load_post_page(
    backend: &dyn BlogBackend,
    raw_post_id: &str,
    token: Option<AuthToken>,
) -> anyhow::Result<PostPage> {
    let viewer = async {
        // a broken auth lookup only hides the presence widget
        backend.viewer_id(token).await.unwrap_or_else(|e| {
            warn!("viewer lookup failed: {:#}", e);
            None
        })
    };

    let Ok(post_id) = PostId::new(raw_post_id) else {
        return Ok(PostPage {
            post: None,
            comments: Vec::new(),
            viewer_id: viewer.await,
        });
    };

    let (post, comments, viewer_id) = tokio::join!(
        backend.get_post(&post_id),
        backend.comments_for_post(&post_id),
        viewer,
    );

    let post = post?;
    if post.is_none() {
        return Ok(PostPage {
            post: None,
            comments: Vec::new(),
            viewer_id,
        });
    }

    Ok(PostPage {
        post,
        comments: comments?,
        viewer_id,
    })
}
