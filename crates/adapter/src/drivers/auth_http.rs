use async_trait::async_trait;
use domain::{AuthToken, Session, Viewer};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::traits::AuthService;

/// Email/password auth service client rooted at `base_url`.
#[derive(Clone)]
pub struct HttpAuthService {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SessionBody {
    token: String,
    user: Viewer,
}

#[derive(Deserialize)]
struct GetSessionBody {
    user: Viewer,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpAuthService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn rejection(resp: Response) -> AuthError {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(ErrorBody {
                message: Some(message),
            }) => AuthError::Rejected(message),
            _ => AuthError::Rejected(format!("Request failed ({})", status)),
        }
    }

    async fn read_session(resp: Response) -> Result<Session, AuthError> {
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        let body: SessionBody = resp
            .json()
            .await
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;
        Ok(Session {
            token: AuthToken::new(body.token),
            viewer: body.user,
        })
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let resp = self
            .client
            .post(self.url("/sign-in/email"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::read_session(resp).await
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let resp = self
            .client
            .post(self.url("/sign-up/email"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        Self::read_session(resp).await
    }

    async fn sign_out(&self, token: &AuthToken) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.url("/sign-out"))
            .bearer_auth(token.expose())
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(())
    }

    async fn session(&self, token: &AuthToken) -> Result<Option<Viewer>, AuthError> {
        let resp = self
            .client
            .get(self.url("/get-session"))
            .bearer_auth(token.expose())
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("session token rejected by auth service");
                return Ok(None);
            }
            s if !s.is_success() => {
                warn!("get-session failed with status {}", s);
                return Err(Self::rejection(resp).await);
            }
            _ => {}
        }

        let body: Option<GetSessionBody> = resp
            .json()
            .await
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;
        Ok(body.map(|b| b.user))
    }
}
