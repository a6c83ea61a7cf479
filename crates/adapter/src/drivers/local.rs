use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use domain::{AuthToken, Comment, LiveEvent, Post, PostId, UserId};
use storage::Db;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::traits::{AuthService, BlogBackend};

pub struct LocalBackend {
    db: Db,
    auth: Arc<dyn AuthService>,
    tx_live: broadcast::Sender<LiveEvent>,
}

impl LocalBackend {
    pub fn new(db: Db, auth: Arc<dyn AuthService>, tx_live: broadcast::Sender<LiveEvent>) -> Self {
        Self { db, auth, tx_live }
    }
}

#[async_trait]
impl BlogBackend for LocalBackend {
    async fn get_post(&self, post_id: &PostId) -> Result<Option<Post>> {
        self.db.get_post(post_id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.db.list_posts().await
    }

    async fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        self.db.list_comments(post_id).await
    }

    async fn create_comment(
        &self,
        token: Option<AuthToken>,
        post_id: &PostId,
        body: &str,
    ) -> Result<Comment> {
        // 1. author comes from the session
        let token = token.ok_or_else(|| anyhow!("Unauthenticated"))?;
        let author = self
            .auth
            .session(&token)
            .await?
            .ok_or_else(|| anyhow!("Unauthenticated"))?;

        // 2. post must exist
        if !self.db.post_exists(post_id).await? {
            bail!("Post {} not found", post_id);
        }

        // 3. persist, then fan out
        let comment = self.db.insert_comment(post_id, &author, body).await?;
        info!(post_id = %post_id, comment_id = %comment.id, "comment created");

        // no live subscribers is not an error
        if self
            .tx_live
            .send(LiveEvent::CommentCreated {
                post_id: post_id.clone(),
                comment: comment.clone(),
            })
            .is_err()
        {
            debug!("no live subscribers for new comment on {}", post_id);
        }

        Ok(comment)
    }

    async fn viewer_id(&self, token: Option<AuthToken>) -> Result<Option<UserId>> {
        let Some(token) = token else {
            return Ok(None);
        };
        Ok(self.auth.session(&token).await?.map(|v| v.user_id))
    }
}
