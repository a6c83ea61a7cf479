mod composer;
mod events;
pub mod forms;
mod models;
mod notice;

pub use composer::{CommentComposer, SubmitOutcome, COMMENT_FAILED, COMMENT_POSTED};
pub use events::LiveEvent;
pub use forms::{CommentForm, FormErrors, LoginForm, SignUpForm, ValidComment};
pub use models::{
    initials, AuthToken, Comment, Post, PostId, PresenceEntry, Session, UserId, Viewer,
};
pub use notice::{Notice, Toast, ToastKind};
