use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::content_repo::{ContentRepo, ContentRow};

/// Content CRUD rules.
///
/// Thin by design: the repo does the persistence work, this layer adds the
/// domain-event logging for every mutation. No caller-identity check is
/// performed here (see DESIGN.md).
#[derive(Clone)]
pub struct ContentService {
    content: Arc<dyn ContentRepo>,
}

impl ContentService {
    pub fn new(content: Arc<dyn ContentRepo>) -> Self {
        Self { content }
    }

    pub async fn create(
        &self,
        title: &str,
        body: Option<&str>,
        published: bool,
        author_id: Uuid,
    ) -> Result<ContentRow, AppError> {
        let row = self
            .content
            .create(title, body, published, author_id)
            .await?;

        info!(content_id = row.content_id, author_id = %author_id, "content created");
        Ok(row)
    }

    pub async fn get(&self, content_id: i64) -> Result<Option<ContentRow>, AppError> {
        Ok(self.content.find_by_id(content_id).await?)
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<ContentRow>, AppError> {
        Ok(self.content.list_by_author(author_id).await?)
    }

    pub async fn update(
        &self,
        content_id: i64,
        title: Option<&str>,
        body: Option<Option<&str>>,
        published: Option<bool>,
    ) -> Result<Option<ContentRow>, AppError> {
        let row = self
            .content
            .update(content_id, title, body, published)
            .await?;

        if row.is_some() {
            info!(content_id, "content updated");
        }
        Ok(row)
    }

    pub async fn delete(&self, content_id: i64) -> Result<bool, AppError> {
        let deleted = self.content.delete(content_id).await?;
        if deleted {
            info!(content_id, "content deleted");
        }
        Ok(deleted)
    }
}
