use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.is_empty() {
            return Err("Post ID is required.".to_string());
        }
        if s.len() > 64 {
            return Err("Post ID is too long (max 64 chars).".to_string());
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err("Post ID contains invalid characters.".to_string());
        }
        Ok(Self(s))
    }

    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque bearer credential issued by the auth service.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Post {
    pub fn display_title(&self) -> String {
        let mut chars = self.title.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: AuthToken,
    pub viewer: Viewer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    pub user_id: UserId,
    pub name: String,
    pub last_seen: NaiveDateTime,
}

/// Up to two upper-cased leading characters, used as avatar fallback.
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_accepts_backend_style_ids() {
        assert!(PostId::new("p1").is_ok());
        assert!(PostId::new("jd7f2k9x_01-a").is_ok());
    }

    #[test]
    fn post_id_rejects_bad_input() {
        assert!(PostId::new("").is_err());
        assert!(PostId::new("../etc").is_err());
        assert!(PostId::new("a b").is_err());
        assert!(PostId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn display_title_capitalizes_first_char() {
        let post = Post {
            id: PostId::new_unchecked("p1".into()),
            title: "hello world".into(),
            body: String::new(),
            image_url: None,
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        };
        assert_eq!(post.display_title(), "Hello world");
    }

    #[test]
    fn auth_token_debug_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert!(!format!("{:?}", token).contains("secret"));
    }

    #[test]
    fn initials_take_two_chars() {
        assert_eq!(initials("ferris"), "FE");
        assert_eq!(initials("x"), "X");
    }
}
