//! Error types for registration forms

use thiserror::Error;

use crate::domain::services::ValidationErrors;
use crate::domain::value_objects::FieldId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormsError {
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("field not found: {0}")]
    FieldNotFound(FieldId),

    #[error("invalid field: {0}")]
    InvalidDraft(String),

    #[error("{} required field(s) unanswered", .0.len())]
    MissingRequiredFields(ValidationErrors),

    #[error("registration closed")]
    RegistrationClosed,
}

pub type Result<T> = std::result::Result<T, FormsError>;
