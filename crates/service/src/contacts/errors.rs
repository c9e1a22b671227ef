use models::errors::{ModelError, ValidationErrors};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ContactError {
    /// The request is malformed before any schema check runs.
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("contact {0} not found")]
    NotFound(Uuid),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ContactError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ContactError::BadRequest(_) => 2001,
            ContactError::Validation(_) => 2002,
            ContactError::NotFound(_) => 2003,
            ContactError::Conflict(_) => 2004,
            ContactError::Repository(_) => 2200,
        }
    }
}

impl From<ModelError> for ContactError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ContactError::BadRequest(msg),
            ModelError::Invalid(errs) => ContactError::Validation(errs),
            ModelError::Conflict(field) => ContactError::Conflict(field),
            ModelError::Db(msg) => ContactError::Repository(msg),
        }
    }
}

impl From<ValidationErrors> for ContactError {
    fn from(errs: ValidationErrors) -> Self {
        ContactError::Validation(errs)
    }
}
