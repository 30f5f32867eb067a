use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::user_repo::{UserRepo, UserRow};

/// Profile lookups and partial profile updates.
///
/// Shares the user repo with `AuthService`; absence is `Ok(None)` and the
/// handler decides that it is a 404.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepo>,
}

/// Profile projection returned to handlers. No password hash.
#[derive(Clone, Debug)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.user_id,
            email: row.email,
            name: row.name,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let row = self.users.find_by_id(user_id).await?;
        Ok(row.map(Into::into))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Option<UserProfile>, AppError> {
        let row = self
            .users
            .update_profile(user_id, name, first_name, last_name)
            .await?;

        if let Some(row) = &row {
            info!(user_id = %row.user_id, "user profile updated");
        }
        Ok(row.map(Into::into))
    }
}
