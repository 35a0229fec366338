//! Repository for the `user_tokens` table.

use sqlx::PgPool;
use tracing::debug;

use tokenward_core::result::AppResult;
use tokenward_entity::token::TokenRecord;

use crate::connection::map_sqlx_error;

const SELECT_RECORD: &str = "SELECT subject_id, token_id, access_token, refresh_token, \
     created_at AS issued_at FROM user_tokens WHERE token_id = $1 ORDER BY id ASC LIMIT 1";

/// Row-level access to issued token pairs.
///
/// Every query filters on `token_id`; the table has no unique constraint on it,
/// so lookups take the oldest matching row.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly issued pair.
    pub async fn insert(&self, record: &TokenRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_tokens (subject_id, token_id, access_token, refresh_token, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.subject_id)
        .bind(&record.token_id)
        .bind(&record.access_token)
        .bind(&record.refresh_token)
        .bind(record.issued_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert token", e))?;

        debug!(token_id = %record.token_id, "Inserted token row");
        Ok(())
    }

    /// Find the pair with the given token id.
    pub async fn find_by_token_id(&self, token_id: &str) -> AppResult<Option<TokenRecord>> {
        sqlx::query_as::<_, TokenRecord>(SELECT_RECORD)
            .bind(token_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find token", e))
    }

    /// Overwrite the token strings of a pair. Returns `false` if no row matched.
    pub async fn update_tokens(
        &self,
        token_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE user_tokens SET access_token = $2, refresh_token = $3 WHERE token_id = $1",
        )
        .bind(token_id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update token", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a pair. Returns the number of rows removed.
    pub async fn delete_by_token_id(&self, token_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE token_id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete token", e))?;

        Ok(result.rows_affected())
    }

    /// Check that the table is reachable.
    pub async fn ping(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| map_sqlx_error("Token store health check failed", e))
    }
}
