use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};

/// Resolves bearer tokens issued by the identity provider.
///
/// Tokens are stored as SHA-256 digests only.
pub struct AccessTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccessTokenRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// User behind an unexpired token, or `NotFound`
    pub async fn resolve(&self, token: &str) -> Result<Uuid> {
        sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM access_tokens
            WHERE token_hash = $1 AND expires_at > (NOW() AT TIME ZONE 'UTC')
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}

pub fn hash_token(token: &str) -> Vec<u8> {
    Sha256::digest(token.as_bytes()).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_sized() {
        let a = hash_token("opaque-token");
        let b = hash_token("opaque-token");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert_ne!(a, hash_token("other-token"));
    }
}
