//! PostgreSQL implementation of SessionStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::SessionStore;

use super::{database_error, stored_id};

/// Looks up login sessions issued by the sign-in service.
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn find_user_by_token(&self, token: &str) -> Result<Option<UserId>, DomainError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT user_id FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to fetch session", e))?;

        row.map(|(user_id,)| stored_id(user_id, "sessions.user_id"))
            .transpose()
    }
}
