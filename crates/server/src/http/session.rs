use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::{AuthToken, Viewer};
use tracing::warn;

use crate::state::{AppState, SiteConfig};

/// Token from `Authorization: Bearer ...`, falling back to the session
/// cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<AuthToken> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(AuthToken::new(token));
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value_trimmed())
        .filter(|v| !v.is_empty())
        .map(AuthToken::new)
}

fn base_cookie(site: &SiteConfig, value: String) -> Cookie<'static> {
    Cookie::build((site.cookie_name.clone(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(site.secure_cookie)
        .build()
}

pub fn session_cookie(site: &SiteConfig, token: &AuthToken) -> Cookie<'static> {
    let mut cookie = base_cookie(site, token.expose().to_string());
    cookie.set_max_age(time::Duration::seconds(site.cookie_max_age_secs as i64));
    cookie
}

pub fn clear_session_cookie(site: &SiteConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(site, String::new());
    cookie.make_removal();
    cookie
}

pub struct SessionToken(pub Option<AuthToken>);

#[async_trait]
impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(session_token(&parts.headers, &state.site.cookie_name)))
    }
}

/// The caller's token and, when the auth service recognises it, who they
/// are. Never rejects: anonymous requests get `None`s.
pub struct CurrentViewer {
    pub token: Option<AuthToken>,
    pub viewer: Option<Viewer>,
}

impl CurrentViewer {
    pub fn is_authenticated(&self) -> bool {
        self.viewer.is_some()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.site.cookie_name);
        let viewer = match &token {
            Some(t) => state.auth.session(t).await.unwrap_or_else(|e| {
                warn!("session lookup failed: {}", e);
                None
            }),
            None => None,
        };
        Ok(Self { token, viewer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "Bloggy".into(),
            cookie_name: "bloggy.session_token".into(),
            cookie_max_age_secs: 60,
            secure_cookie: true,
            heartbeat_interval_secs: 10,
        }
    }

    #[test]
    fn token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; bloggy.session_token=abc123; other=1"),
        );
        let token = session_token(&headers, "bloggy.session_token").unwrap();
        assert_eq!(token.expose(), "abc123");
    }

    #[test]
    fn bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("bloggy.session_token=abc123"),
        );
        assert_eq!(
            session_token(&headers, "bloggy.session_token").unwrap().expose(),
            "xyz"
        );
    }

    #[test]
    fn empty_or_missing_cookie_is_anonymous() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers, "bloggy.session_token").is_none());
        headers.insert(header::COOKIE, HeaderValue::from_static("bloggy.session_token="));
        assert!(session_token(&headers, "bloggy.session_token").is_none());
    }

    #[test]
    fn quoted_cookie_value_is_unwrapped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("bloggy.session_token=\"abc123\""),
        );
        assert_eq!(
            session_token(&headers, "bloggy.session_token").unwrap().expose(),
            "abc123"
        );
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie(&site(), &AuthToken::new("t"));
        assert_eq!(cookie.name(), "bloggy.session_token");
        assert_eq!(cookie.value(), "t");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));

        let cleared = clear_session_cookie(&site());
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
        assert!(cleared.to_string().contains("Max-Age=0"));
    }
}
