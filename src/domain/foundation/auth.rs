//! Authentication types for the domain layer.
//!
//! These types represent a caller resolved from a session token. They carry
//! no provider dependencies; any `SessionValidator` adapter can populate them.

use super::UserId;
use thiserror::Error;

/// Caller identity resolved by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user the session belongs to.
    pub id: UserId,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token is well formed but no active session backs it.
    #[error("No session for token")]
    SessionNotFound,

    /// The session store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_messages() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
        assert_eq!(
            AuthError::service_unavailable("timeout").to_string(),
            "Auth service unavailable: timeout"
        );
    }
}
