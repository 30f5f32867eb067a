use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserRepo, UserRow};
use crate::services::auth::password;

/// Service that owns credential checks and account registration.
///
/// - login never reveals whether an email exists: unknown email and wrong
///   password fail with the same `Unauthorized` value.
/// - register treats an existing email as a `Conflict`, distinct from
///   generic persistence failure.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
}

/// Service-level return type to keep handlers thin.
///
/// Handlers map this into the HTTP DTO (`{user: {...}}`). The password
/// hash stays behind in the row.
#[derive(Clone, Debug)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.user_id,
            email: row.email,
            name: row.name,
        }
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!(email, "login rejected: unknown email");
            return Err(AppError::Unauthorized);
        };

        let matches = password::verify(&user.password_hash, password).map_err(|e| {
            error!(user_id = %user.user_id, error = %e, "stored password hash could not be verified");
            AppError::Internal
        })?;

        if !matches {
            warn!(user_id = %user.user_id, "login rejected: wrong password");
            return Err(AppError::Unauthorized);
        }

        Ok(user.into())
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<UserAccount, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("email is already registered"));
        }

        let password_hash = password::hash(password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::Internal
        })?;

        // The existence check above races with concurrent registration; the
        // unique index is the real guard, so map its violation too.
        let row = self
            .users
            .create(email, &password_hash, name)
            .await
            .map_err(|e| match e {
                RepoError::Conflict => AppError::conflict("email is already registered"),
                other => other.into(),
            })?;

        info!(user_id = %row.user_id, "user registered");
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::user_repo::testing::InMemoryUserRepo;

    fn service() -> (AuthService, Arc<InMemoryUserRepo>) {
        let repo = Arc::new(InMemoryUserRepo::new());
        (AuthService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let (auth, _) = service();
        let created = auth
            .register("a@b.com", "correctpw", Some("Arezoo"))
            .await
            .unwrap();

        let account = auth.login("a@b.com", "correctpw").await.unwrap();
        assert_eq!(account.id, created.id);
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.name.as_deref(), Some("Arezoo"));
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let (auth, _) = service();
        auth.register("a@b.com", "correctpw", None).await.unwrap();

        let err = auth.register("a@b.com", "otherpw", None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let (auth, _) = service();
        auth.register("a@b.com", "correctpw", None).await.unwrap();

        let unknown = auth.login("nobody@b.com", "correctpw").await.unwrap_err();
        let mismatch = auth.login("a@b.com", "wrong-pw").await.unwrap_err();

        assert!(matches!(unknown, AppError::Unauthorized));
        assert!(matches!(mismatch, AppError::Unauthorized));
        assert_eq!(unknown.to_string(), mismatch.to_string());
    }
}
