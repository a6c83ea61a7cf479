use domain::FormErrors;

const GENERIC_AUTH_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service refused the request; the message is meant for the user.
    #[error("{0}")]
    Rejected(String),
    #[error("auth service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected auth response: {0}")]
    Unexpected(String),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(msg) => msg.clone(),
            _ => GENERIC_AUTH_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error("remote call failed")]
    Failed,
    #[error(transparent)]
    Auth(#[from] AuthError),
}
