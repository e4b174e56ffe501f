use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};

use warden_core::{
    UserId, VerificationCode, VerificationCodeId, VerificationCodeKind, VerificationCodeStore,
    VerificationCodeStoreError,
};

pub struct PostgresVerificationCodeStore {
    pool: PgPool,
}

impl PostgresVerificationCodeStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresVerificationCodeStore { pool }
    }
}

fn unexpected<E: std::fmt::Display>(error: E) -> VerificationCodeStoreError {
    VerificationCodeStoreError::UnexpectedError(error.to_string())
}

fn map_code_row(row: &PgRow) -> Result<VerificationCode, VerificationCodeStoreError> {
    let id: uuid::Uuid = row.try_get("id").map_err(unexpected)?;
    let user_id: uuid::Uuid = row.try_get("user_id").map_err(unexpected)?;
    let kind: String = row.try_get("kind").map_err(unexpected)?;
    let created_at = row.try_get("created_at").map_err(unexpected)?;
    let expires_at = row.try_get("expires_at").map_err(unexpected)?;

    Ok(VerificationCode {
        id: VerificationCodeId::from(id),
        user_id: UserId::from(user_id),
        kind: VerificationCodeKind::from_str(&kind).map_err(unexpected)?,
        created_at,
        expires_at,
    })
}

#[async_trait::async_trait]
impl VerificationCodeStore for PostgresVerificationCodeStore {
    #[tracing::instrument(name = "Adding verification code to PostgreSQL", skip_all)]
    async fn add_code(&self, code: VerificationCode) -> Result<(), VerificationCodeStoreError> {
        sqlx::query(
            r#"
                INSERT INTO verification_codes (id, user_id, kind, created_at, expires_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(code.id.as_uuid())
        .bind(code.user_id.as_uuid())
        .bind(code.kind.as_str())
        .bind(code.created_at)
        .bind(code.expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Looking up valid verification code in PostgreSQL", skip_all)]
    async fn find_valid_code(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
    ) -> Result<VerificationCode, VerificationCodeStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, user_id, kind, created_at, expires_at
                FROM verification_codes
                WHERE id = $1 AND kind = $2 AND expires_at > $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(kind.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(VerificationCodeStoreError::CodeNotFound);
        };

        map_code_row(&row)
    }

    #[tracing::instrument(name = "Deleting verification code from PostgreSQL", skip_all)]
    async fn delete_code(&self, id: VerificationCodeId) -> Result<(), VerificationCodeStoreError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(VerificationCodeStoreError::CodeNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Counting recent verification codes in PostgreSQL", skip_all)]
    async fn count_codes_created_since(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError> {
        let row = sqlx::query(
            r#"
                SELECT COUNT(*) AS count
                FROM verification_codes
                WHERE user_id = $1 AND kind = $2 AND created_at > $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(kind.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        let count: i64 = row.try_get("count").map_err(unexpected)?;
        Ok(count.max(0) as u64)
    }
}
