/*
 * Responsibility
 * - auth 系 request/response DTO
 * - validate() は field 単位の violation を集めて返す (先頭で止めない)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::FieldError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Vec::new();
        check_credentials(&self.email, &self.password, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Vec::new();
        check_credentials(&self.email, &self.password, &mut violations);
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            violations.push(FieldError {
                field: "name",
                message: "cannot be empty",
            });
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_credentials(email: &str, password: &str, violations: &mut Vec<FieldError>) {
    if !is_email(email) {
        violations.push(FieldError {
            field: "email",
            message: "must be a valid email address",
        });
    }
    if password.len() < 6 {
        violations.push(FieldError {
            field: "password",
            message: "must be at least 6 characters",
        });
    }
}

// Format check only. Deliverability is not this layer's problem.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn well_formed_credentials_pass() {
        assert!(login("a@b.com", "correctpw").validate().is_ok());
    }

    #[test]
    fn short_password_is_a_password_violation() {
        let violations = login("a@b.com", "short").validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "password");
    }

    #[test]
    fn bad_email_and_short_password_are_both_reported() {
        let violations = login("not-an-email", "short").validate().unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, ["email", "password"]);
    }

    #[test]
    fn email_format_is_checked_structurally() {
        for bad in ["", "a@", "@b.com", "a@nodot", "a@.com", "a@b.com.", "a b@c.com"] {
            assert!(!is_email(bad), "{bad:?} should be rejected");
        }
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last@sub.example.ir"));
    }

    #[test]
    fn register_rejects_blank_name() {
        let req = RegisterRequest {
            email: "a@b.com".into(),
            password: "correctpw".into(),
            name: Some("   ".into()),
        };
        let violations = req.validate().unwrap_err();
        assert_eq!(violations[0].field, "name");
    }
}
