//! JWT session validator.
//!
//! Accepts HS256 tokens signed with the shared secret of the sign-in service.
//! A token is only honored while its session row still exists, so signing
//! out revokes it even though the signature stays valid.
//!
//! # Token format
//!
//! ```json
//! { "userId": 42, "iat": 1700000000 }
//! ```
//!
//! `exp` is optional; when present it is enforced.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{SessionStore, SessionValidator};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Signs a non-expiring session token for `user_id` with the shared secret.
///
/// The token is only accepted once it is also registered in the session store.
pub fn issue_session_token(secret: &SecretString, user_id: UserId) -> Result<String, AuthError> {
    let claims = SessionClaims {
        user_id: user_id.value(),
        iat: Some(chrono::Utc::now().timestamp().max(0) as u64),
        exp: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AuthError::service_unavailable(format!("Failed to sign token: {}", e)))
}

/// Production `SessionValidator`: signature check plus session lookup.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    sessions: Arc<dyn SessionStore>,
}

impl JwtSessionValidator {
    pub fn new(secret: &SecretString, sessions: Arc<dyn SessionStore>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Sign-in tokens are not required to expire.
        validation.set_required_spec_claims::<&str>(&[]);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
            sessions,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;

        let user_id = UserId::new(claims.user_id).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.user_id);
            AuthError::InvalidToken
        })?;

        let session_user = self
            .sessions
            .find_user_by_token(token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Session lookup failed");
                AuthError::service_unavailable(e.to_string())
            })?
            .ok_or(AuthError::SessionNotFound)?;

        if session_user != user_id {
            tracing::warn!(%user_id, %session_user, "Session belongs to another user");
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthenticatedUser::new(user_id))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    const SECRET: &str = "test-signing-secret";

    fn sign(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_for(user_id: i32) -> SessionClaims {
        SessionClaims {
            user_id,
            iat: Some(1_700_000_000),
            exp: None,
        }
    }

    fn validator(store: &InMemoryStore) -> JwtSessionValidator {
        JwtSessionValidator::new(
            &SecretString::new(SECRET.to_string()),
            Arc::new(store.clone()),
        )
    }

    fn user(id: i32) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn accepts_signed_token_with_live_session() {
        let store = InMemoryStore::new();
        let token = sign(&claims_for(7), SECRET);
        store.add_session(token.clone(), user(7)).await;

        let caller = validator(&store).validate(&token).await.unwrap();

        assert_eq!(caller.id, user(7));
    }

    #[tokio::test]
    async fn issued_token_validates_once_registered() {
        let store = InMemoryStore::new();
        let secret = SecretString::new(SECRET.to_string());
        let token = issue_session_token(&secret, user(9)).unwrap();

        assert_eq!(
            validator(&store).validate(&token).await,
            Err(AuthError::SessionNotFound)
        );

        store.add_session(token.clone(), user(9)).await;
        let caller = validator(&store).validate(&token).await.unwrap();

        assert_eq!(caller.id, user(9));
    }

    #[tokio::test]
    async fn rejects_token_signed_with_other_secret() {
        let store = InMemoryStore::new();
        let token = sign(&claims_for(7), "other-secret");
        store.add_session(token.clone(), user(7)).await;

        let result = validator(&store).validate(&token).await;

        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let store = InMemoryStore::new();

        let result = validator(&store).validate("not-a-jwt").await;

        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_token_without_session() {
        let store = InMemoryStore::new();
        let token = sign(&claims_for(7), SECRET);

        let result = validator(&store).validate(&token).await;

        assert_eq!(result, Err(AuthError::SessionNotFound));
    }

    #[tokio::test]
    async fn rejects_session_owned_by_another_user() {
        let store = InMemoryStore::new();
        let token = sign(&claims_for(7), SECRET);
        store.add_session(token.clone(), user(8)).await;

        let result = validator(&store).validate(&token).await;

        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let store = InMemoryStore::new();
        let claims = SessionClaims {
            user_id: 7,
            iat: Some(1_000_000_000),
            exp: Some(1_000_000_100),
        };
        let token = sign(&claims, SECRET);
        store.add_session(token.clone(), user(7)).await;

        let result = validator(&store).validate(&token).await;

        assert_eq!(result, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn rejects_non_positive_user_id_claim() {
        let store = InMemoryStore::new();
        let token = sign(&claims_for(0), SECRET);

        let result = validator(&store).validate(&token).await;

        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[test]
    fn debug_output_hides_key_material() {
        let store = InMemoryStore::new();
        let debug = format!("{:?}", validator(&store));
        assert!(!debug.contains(SECRET));
    }
}
