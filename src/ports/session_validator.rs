//! Session validation ports.
//!
//! `SessionValidator` turns a bearer token into a caller identity. It is
//! provider-agnostic: the JWT adapter and the test mock both implement it.
//!
//! `SessionStore` is the lookup a validator uses to confirm that a signed
//! token still has a live session behind it.
//!
//! # Example Implementation
//!
//! ```ignore
//! #[async_trait]
//! impl SessionValidator for JwtSessionValidator {
//!     async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
//!         // 1. Verify signature and decode the userId claim
//!         // 2. Confirm the session exists for this token
//!         // 3. Map to AuthenticatedUser
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, UserId};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::SessionNotFound` for tokens without a session
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix) and return the caller.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Lookup of issued sessions by token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user owning the session for `token`, if one exists.
    async fn find_user_by_token(&self, token: &str) -> Result<Option<UserId>, DomainError>;
}
