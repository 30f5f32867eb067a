/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - UserRepo trait で永続化を差し替え可能にする (テストは in-memory fake)
 * - 不在は Ok(None)、email 重複は RepoError::Conflict で返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    pub email: String,
    pub name: Option<String>,

    #[sqlx(rename = "firstName")]
    pub first_name: Option<String>,

    #[sqlx(rename = "lastName")]
    pub last_name: Option<String>,

    // Service-internal. Never serialized into a response DTO.
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserRepo: Send + Sync + 'static {
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> RepoResult<UserRow>;

    async fn find_by_id(&self, user_id: Uuid) -> RepoResult<Option<UserRow>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#""userId", email, name, "firstName", "lastName", "passwordHash", "createdAt", "updatedAt""#;

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, "passwordHash", name)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_id(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE "userId" = $1
            "#,
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#,
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                "firstName" = COALESCE($3, "firstName"),
                "lastName" = COALESCE($4, "lastName"),
                "updatedAt" = NOW()
            WHERE "userId" = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(name)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
