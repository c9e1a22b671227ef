use std::fmt;

use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error("unique constraint violated on {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

/// One rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Structured outcome of entity validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool { self.errors.is_empty() }

    pub fn errors(&self) -> &[FieldError] { &self.errors }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Message of the first failing field, the one surfaced to clients.
    pub fn first_message(&self) -> &str {
        self.errors.first().map(|e| e.message.as_str()).unwrap_or("validation failed")
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message())
    }
}

impl From<ValidationErrors> for ModelError {
    fn from(errs: ValidationErrors) -> Self { ModelError::Invalid(errs) }
}

/// Translate a driver error, surfacing unique-key violations with the column involved.
pub fn map_db_err(err: DbErr, columns: &[&str]) -> ModelError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            ModelError::Conflict(conflicting_field(&detail, columns).to_string())
        }
        _ => ModelError::Db(err.to_string()),
    }
}

/// Best match of a known column name inside a constraint violation message.
pub fn conflicting_field<'a>(detail: &str, columns: &[&'a str]) -> &'a str {
    let lower = detail.to_lowercase();
    // postgres reports "Key (email)=(...)"; index names are the fallback
    columns
        .iter()
        .find(|c| lower.contains(&format!("({})", c)))
        .or_else(|| columns.iter().find(|c| lower.contains(*c)))
        .copied()
        .unwrap_or("id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_is_surfaced() {
        let mut errs = ValidationErrors::new();
        errs.push("nombre", "nombre is required");
        errs.push("telefono", "telefono is too long");
        assert_eq!(errs.first_message(), "nombre is required");
        assert_eq!(errs.to_string(), "nombre is required");
        assert!(errs.has_field("telefono"));
        assert!(!errs.has_field("email"));
    }

    #[test]
    fn empty_errors_pass_value_through() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
        let mut errs = ValidationErrors::new();
        errs.push("id", "bad");
        assert!(errs.into_result(()).is_err());
    }

    #[test]
    fn conflict_field_prefers_key_clause() {
        let detail = "duplicate key value violates unique constraint \"user_email_key\" Key (email)=(a@b.com) already exists.";
        assert_eq!(conflicting_field(detail, &["name", "email"]), "email");
        assert_eq!(conflicting_field("idx_contact_telefono", &["nombre", "telefono"]), "telefono");
        assert_eq!(conflicting_field("something else", &["nombre"]), "id");
    }

    #[test]
    fn serializes_as_list() {
        let mut errs = ValidationErrors::new();
        errs.push("email", "invalid email");
        let json = serde_json::to_value(&errs).unwrap();
        assert_eq!(json, serde_json::json!([{"field": "email", "message": "invalid email"}]));
    }
}
