use reqwest::StatusCode;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything that can go wrong between the user pressing a key and the
/// server's answer landing in the cache.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or completed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Client-side required-field violation, caught before submission.
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// True when the server rejected the credentials or the bearer token.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }

    /// Message shown on the auth screen: the server's own words when it
    /// provided any, a fixed connection error otherwise.
    pub fn auth_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Validation(message) => message.clone(),
            _ => String::from("Error de conexión"),
        }
    }
}
