use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};

use warden_core::{Email, User, UserId, UserStore, UserStoreError};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

fn unexpected<E: std::fmt::Display>(error: E) -> UserStoreError {
    UserStoreError::UnexpectedError(error.to_string())
}

fn map_user_row(row: &PgRow) -> Result<User, UserStoreError> {
    let id: uuid::Uuid = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let verified: bool = row.try_get("verified").map_err(unexpected)?;
    let created_at = row.try_get("created_at").map_err(unexpected)?;
    let updated_at = row.try_get("updated_at").map_err(unexpected)?;

    let email = Email::try_from(Secret::from(email)).map_err(unexpected)?;

    Ok(User::parse(
        UserId::from(id),
        email,
        Secret::from(password_hash),
        verified,
        created_at,
        updated_at,
    ))
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, verified, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().expose_secret())
        .bind(user.verified())
        .bind(user.created_at())
        .bind(user.updated_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, verified, created_at, updated_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        map_user_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, verified, created_at, updated_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        map_user_row(&row)
    }

    #[tracing::instrument(name = "Marking user verified in PostgreSQL", skip_all)]
    async fn mark_verified(&self, id: UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE users
                SET verified = TRUE, updated_at = $2
                WHERE id = $1
                RETURNING id, email, password_hash, verified, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(chrono::Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        map_user_row(&row)
    }

    #[tracing::instrument(name = "Setting new password hash in PostgreSQL", skip_all)]
    async fn set_password_hash(
        &self,
        id: UserId,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, email, password_hash, verified, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(password_hash.expose_secret())
        .bind(chrono::Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        map_user_row(&row)
    }
}
