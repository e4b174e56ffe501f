use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};

use warden_core::{Session, SessionId, SessionStore, SessionStoreError, UserId};

pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresSessionStore { pool }
    }
}

fn unexpected<E: std::fmt::Display>(error: E) -> SessionStoreError {
    SessionStoreError::UnexpectedError(error.to_string())
}

fn map_session_row(row: &PgRow) -> Result<Session, SessionStoreError> {
    let id: uuid::Uuid = row.try_get("id").map_err(unexpected)?;
    let user_id: uuid::Uuid = row.try_get("user_id").map_err(unexpected)?;
    let user_agent: Option<String> = row.try_get("user_agent").map_err(unexpected)?;
    let created_at = row.try_get("created_at").map_err(unexpected)?;
    let expires_at = row.try_get("expires_at").map_err(unexpected)?;

    Ok(Session {
        id: SessionId::from(id),
        user_id: UserId::from(user_id),
        user_agent,
        created_at,
        expires_at,
    })
}

#[async_trait::async_trait]
impl SessionStore for PostgresSessionStore {
    #[tracing::instrument(name = "Adding session to PostgreSQL", skip_all)]
    async fn add_session(&self, session: Session) -> Result<(), SessionStoreError> {
        sqlx::query(
            r#"
                INSERT INTO sessions (id, user_id, user_agent, created_at, expires_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving session from PostgreSQL", skip_all)]
    async fn get_session(&self, id: SessionId) -> Result<Session, SessionStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, user_id, user_agent, created_at, expires_at
                FROM sessions
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(SessionStoreError::SessionNotFound);
        };

        map_session_row(&row)
    }

    #[tracing::instrument(name = "Extending session expiry in PostgreSQL", skip_all)]
    async fn extend_session(
        &self,
        id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE sessions
                SET expires_at = $2
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(SessionStoreError::SessionNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting session from PostgreSQL", skip_all)]
    async fn delete_session(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(SessionStoreError::SessionNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting all sessions for user in PostgreSQL", skip_all)]
    async fn delete_sessions_for_user(&self, user_id: UserId) -> Result<u64, SessionStoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(result.rows_affected())
    }
}
