use anyhow::Result;
use async_trait::async_trait;
use domain::{AuthToken, Comment, Post, PostId, PresenceEntry, Session, UserId, Viewer};

use crate::error::AuthError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogBackend: Send + Sync {
    async fn get_post(&self, post_id: &PostId) -> Result<Option<Post>>;

    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Current comment set for a post; seeds the live list.
    async fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>>;

    async fn create_comment(
        &self,
        token: Option<AuthToken>,
        post_id: &PostId,
        body: &str,
    ) -> Result<Comment>;

    async fn viewer_id(&self, token: Option<AuthToken>) -> Result<Option<UserId>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, name: &str, email: &str, password: &str)
        -> Result<Session, AuthError>;

    async fn sign_out(&self, token: &AuthToken) -> Result<(), AuthError>;

    async fn session(&self, token: &AuthToken) -> Result<Option<Viewer>, AuthError>;
}

/// "Who is here" channel; rooms are keyed by post id.
#[async_trait]
pub trait PresenceChannel: Send + Sync {
    async fn announce(&self, room: &PostId, viewer: &Viewer) -> Result<()>;

    async fn leave(&self, room: &PostId, user_id: &UserId) -> Result<()>;

    async fn present(&self, room: &PostId) -> Result<Vec<PresenceEntry>>;
}
