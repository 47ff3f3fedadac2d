use thiserror::Error;

/// Failures while authenticating a request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed Authorization header (expected Bearer)")]
    MalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::MalformedHeader => 1002,
            AuthError::InvalidToken(_) => 1003,
            AuthError::TokenError(_) => 1102,
        }
    }
}
