/*
 * Responsibility
 * - contents テーブル向け CRUD
 * - authorId の FK は DB 側の制約に任せる (アプリ側では検証しない)
 * - read-by-author は作成日時の新しい順で返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    #[sqlx(rename = "contentId")]
    pub content_id: i64,

    pub title: String,
    pub body: Option<String>,
    pub published: bool,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait ContentRepo: Send + Sync + 'static {
    async fn create(
        &self,
        title: &str,
        body: Option<&str>,
        published: bool,
        author_id: Uuid,
    ) -> RepoResult<ContentRow>;

    async fn find_by_id(&self, content_id: i64) -> RepoResult<Option<ContentRow>>;

    /// Newest-created-first. An author with no records yields an empty vec.
    async fn list_by_author(&self, author_id: Uuid) -> RepoResult<Vec<ContentRow>>;

    async fn update(
        &self,
        content_id: i64,
        title: Option<&str>,
        body: Option<Option<&str>>,
        published: Option<bool>,
    ) -> RepoResult<Option<ContentRow>>;

    async fn delete(&self, content_id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgContentRepo {
    pool: PgPool,
}

impl PgContentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CONTENT_COLUMNS: &str =
    r#""contentId", title, body, published, "authorId", "createdAt", "updatedAt""#;

#[async_trait]
impl ContentRepo for PgContentRepo {
    async fn create(
        &self,
        title: &str,
        body: Option<&str>,
        published: bool,
        author_id: Uuid,
    ) -> RepoResult<ContentRow> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            INSERT INTO contents (title, body, published, "authorId")
            VALUES ($1, $2, $3, $4)
            RETURNING {CONTENT_COLUMNS}
            "#,
        ))
        .bind(title)
        .bind(body)
        .bind(published)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, content_id: i64) -> RepoResult<Option<ContentRow>> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            SELECT {CONTENT_COLUMNS}
            FROM contents
            WHERE "contentId" = $1
            "#,
        ))
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_author(&self, author_id: Uuid) -> RepoResult<Vec<ContentRow>> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            SELECT {CONTENT_COLUMNS}
            FROM contents
            WHERE "authorId" = $1
            ORDER BY "createdAt" DESC
            "#,
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(
        &self,
        content_id: i64,
        title: Option<&str>,
        body: Option<Option<&str>>,
        published: Option<bool>,
    ) -> RepoResult<Option<ContentRow>> {
        // body: Some(Some(v)) -> set to v
        // body: Some(None)    -> set to NULL
        // body: None          -> do not update
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            UPDATE contents
            SET
                title = COALESCE($2, title),
                body = CASE
                    WHEN $3 = false THEN body
                    ELSE $4
                END,
                published = COALESCE($5, published),
                "updatedAt" = NOW()
            WHERE "contentId" = $1
            RETURNING {CONTENT_COLUMNS}
            "#,
        ))
        .bind(content_id)
        .bind(title)
        .bind(body.is_some()) // $3: flag to set body
        .bind(body.flatten()) // $4: new body value
        .bind(published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, content_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM contents
            WHERE "contentId" = $1
            "#,
        )
        .bind(content_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;

    /// In-memory stand-in for the Postgres repo. Creation timestamps are
    /// strictly increasing so ordering assertions are deterministic.
    #[derive(Default)]
    pub struct InMemoryContentRepo {
        rows: Mutex<Vec<ContentRow>>,
        next_id: AtomicI64,
    }

    impl InMemoryContentRepo {
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn timestamp(n: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + n, 0).unwrap()
    }

    #[async_trait]
    impl ContentRepo for InMemoryContentRepo {
        async fn create(
            &self,
            title: &str,
            body: Option<&str>,
            published: bool,
            author_id: Uuid,
        ) -> RepoResult<ContentRow> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = timestamp(id);
            let row = ContentRow {
                content_id: id,
                title: title.to_string(),
                body: body.map(str::to_string),
                published,
                author_id,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn find_by_id(&self, content_id: i64) -> RepoResult<Option<ContentRow>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.content_id == content_id).cloned())
        }

        async fn list_by_author(&self, author_id: Uuid) -> RepoResult<Vec<ContentRow>> {
            let rows = self.rows.lock().unwrap();
            let mut found: Vec<ContentRow> = rows
                .iter()
                .filter(|r| r.author_id == author_id)
                .cloned()
                .collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(found)
        }

        async fn update(
            &self,
            content_id: i64,
            title: Option<&str>,
            body: Option<Option<&str>>,
            published: Option<bool>,
        ) -> RepoResult<Option<ContentRow>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|r| r.content_id == content_id) else {
                return Ok(None);
            };
            if let Some(title) = title {
                row.title = title.to_string();
            }
            if let Some(body) = body {
                row.body = body.map(str::to_string);
            }
            if let Some(published) = published {
                row.published = published;
            }
            Ok(Some(row.clone()))
        }

        async fn delete(&self, content_id: i64) -> RepoResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.content_id != content_id);
            Ok(rows.len() < before)
        }
    }
}
