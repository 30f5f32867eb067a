/*
 * Responsibility
 * - DTO validation の共通部品 (field 単位の violation)
 * - violation は VALIDATION_ERROR の details にそのまま載る
 */
pub mod auth;
pub mod content;
pub mod risk;
pub mod user;

use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub fn validation_error(violations: Vec<FieldError>) -> AppError {
    AppError::validation("Validation failed", Some(json!(violations)))
}

pub fn single_violation(field: &'static str, message: &'static str) -> AppError {
    validation_error(vec![FieldError { field, message }])
}
