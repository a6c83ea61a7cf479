use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Outcomes carried across a redirect as `?notice=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoggedIn,
    AccountCreated,
    LoggedOut,
    CommentPosted,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::LoggedIn => "logged-in",
            Notice::AccountCreated => "account-created",
            Notice::LoggedOut => "logged-out",
            Notice::CommentPosted => "comment-posted",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "logged-in" => Some(Notice::LoggedIn),
            "account-created" => Some(Notice::AccountCreated),
            "logged-out" => Some(Notice::LoggedOut),
            "comment-posted" => Some(Notice::CommentPosted),
            _ => None,
        }
    }

    pub fn toast(self) -> Toast {
        match self {
            Notice::LoggedIn => Toast::success("Logged in successfully"),
            Notice::AccountCreated => Toast::success("Account created successfully"),
            Notice::LoggedOut => Toast::success("Logged out successfully"),
            Notice::CommentPosted => Toast::success("Comment Posted"),
        }
    }
}
