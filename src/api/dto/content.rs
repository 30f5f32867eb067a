/*
 * Responsibility
 * - content 系 request/response DTO
 * - response の id は公開 ID (sqids) 化した文字列
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::dto::FieldError;

#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub body: Option<String>,
    pub published: Option<bool>,
    pub author_id: String,
}

impl CreateContentRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(FieldError {
                field: "title",
                message: "is required",
            });
        }
        if self.title.len() > 256 {
            violations.push(FieldError {
                field: "title",
                message: "must be <= 256 chars",
            });
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (set NULL)
    // - Some(Some(v)): set value
    // Plain serde folds a JSON null into the outer None, so the present-
    // but-null case needs its own deserializer.
    #[serde(default, deserialize_with = "present")]
    pub body: Option<Option<String>>,
    pub published: Option<bool>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateContentRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Vec::new();
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                violations.push(FieldError {
                    field: "title",
                    message: "cannot be empty",
                });
            }
            if title.len() > 256 {
                violations.push(FieldError {
                    field: "title",
                    message: "must be <= 256 chars",
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

#[derive(Debug, Deserialize)]
pub struct ListContentQuery {
    pub author_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub published: bool,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_rejected() {
        let req = CreateContentRequest {
            title: "  ".into(),
            body: None,
            published: None,
            author_id: "ignored".into(),
        };
        assert_eq!(req.validate().unwrap_err()[0].field, "title");
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        let req = UpdateContentRequest {
            title: None,
            body: None,
            published: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn body_tri_state_deserializes() {
        let missing: UpdateContentRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(missing.body.is_none());

        let null: UpdateContentRequest = serde_json::from_str(r#"{"body":null}"#).unwrap();
        assert_eq!(null.body, Some(None));

        let set: UpdateContentRequest = serde_json::from_str(r#"{"body":"متن"}"#).unwrap();
        assert_eq!(set.body, Some(Some("متن".to_string())));
    }
}
