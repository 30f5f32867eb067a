/*
 * Responsibility
 * - user profile 系 request/response DTO
 * - user_id は String で受けて handler 側で UUID に変換する
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::FieldError;

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ] {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                violations.push(FieldError {
                    field,
                    message: "cannot be empty",
                });
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: ProfileBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_are_each_reported() {
        let req = UpdateProfileRequest {
            user_id: "whatever".into(),
            name: Some(" ".into()),
            first_name: Some("".into()),
            last_name: None,
        };
        let fields: Vec<&str> = req.validate().unwrap_err().iter().map(|v| v.field).collect();
        assert_eq!(fields, ["name", "first_name"]);
    }
}
