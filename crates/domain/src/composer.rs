use crate::forms::{CommentForm, FormErrors};
use crate::models::PostId;
use crate::notice::Toast;

pub const COMMENT_POSTED: &str = "Comment Posted";
pub const COMMENT_FAILED: &str = "Failed To Comment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted,
    Invalid(FormErrors),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentComposer {
    post_id: PostId,
    body: String,
    errors: FormErrors,
}

impl CommentComposer {
    pub fn new(post_id: PostId) -> Self {
        Self {
            post_id,
            body: String::new(),
            errors: FormErrors::default(),
        }
    }

    pub fn with_body(post_id: PostId, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::new(post_id)
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn draft(&self) -> CommentForm {
        CommentForm {
            body: self.body.clone(),
            post_id: self.post_id.to_string(),
        }
    }

    /// Success resets the body; anything else keeps it.
    pub fn settle(&mut self, outcome: SubmitOutcome) -> Toast {
        match outcome {
            SubmitOutcome::Posted => {
                self.body.clear();
                self.errors = FormErrors::default();
                Toast::success(COMMENT_POSTED)
            }
            SubmitOutcome::Invalid(errors) => {
                self.errors = errors;
                Toast::error(COMMENT_FAILED)
            }
            SubmitOutcome::Failed => {
                self.errors = FormErrors::default();
                Toast::error(COMMENT_FAILED)
            }
        }
    }
}
