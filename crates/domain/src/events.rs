use crate::models::{Comment, PostId, PresenceEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LiveEvent {
    CommentCreated {
        post_id: PostId,
        comment: Comment,
    },
    PresenceChanged {
        room_id: PostId,
        present: Vec<PresenceEntry>,
    },
}
