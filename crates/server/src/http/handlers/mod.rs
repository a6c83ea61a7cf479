pub mod assets;
pub mod auth;
pub mod comments;
pub mod pages;
pub mod presence;
pub mod sse;

use domain::{Notice, Toast};
use serde::Deserialize;

use crate::state::AppState;
use crate::views::Chrome;

#[derive(Deserialize, Default)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub fn toast(&self) -> Option<Toast> {
        self.notice
            .as_deref()
            .and_then(Notice::from_code)
            .map(Notice::toast)
    }
}

pub fn chrome(state: &AppState, signed_in: bool, toast: Option<Toast>) -> Chrome<'_> {
    Chrome {
        site_title: &state.site.title,
        signed_in,
        toast,
    }
}
