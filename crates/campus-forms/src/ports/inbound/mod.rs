//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;

use crate::application::dto::{EventSummary, RegistrationOutcome};
use crate::domain::aggregates::{FieldDraft, FormField, FormSchema, RegistrationSession};
use crate::domain::services::ValidationErrors;
use crate::domain::value_objects::{EventId, FieldId};

/// Participant-side registration use cases
#[async_trait]
pub trait RegistrationUseCases: Send + Sync {
    /// Look an event up by its public slug
    async fn find_event(&self, slug: &str) -> Result<EventSummary, UseCaseError>;

    /// Fetch the event's form and start an empty session
    async fn open_session(&self, event_id: EventId) -> Result<RegistrationSession, UseCaseError>;

    /// Validate and, when valid, send the session's answers
    async fn submit(&self, session: &mut RegistrationSession) -> Result<RegistrationOutcome, UseCaseError>;

    /// Whether the current user already registered
    async fn registration_status(&self, event_id: EventId) -> Result<bool, UseCaseError>;
}

/// Organizer-side form editing use cases
#[async_trait]
pub trait FormAuthoringUseCases: Send + Sync {
    async fn schema(&self, event_id: EventId) -> Result<FormSchema, UseCaseError>;

    /// Check the draft against the current form, then store it
    async fn add_field(&self, event_id: EventId, draft: FieldDraft) -> Result<FormField, UseCaseError>;

    async fn remove_field(&self, field_id: FieldId) -> Result<(), UseCaseError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum UseCaseError {
    NotFound(String),
    /// Required visible fields are unanswered; nothing was sent
    Validation(ValidationErrors),
    DomainError(String),
    RepositoryError(String),
    GatewayError(String),
}

impl std::error::Error for UseCaseError {}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(e) => write!(f, "Not found: {}", e),
            Self::Validation(errors) => match errors.first() {
                Some((_, message)) => write!(f, "Validation error: {}", message),
                None => write!(f, "Validation error"),
            },
            Self::DomainError(e) => write!(f, "Domain error: {}", e),
            Self::RepositoryError(e) => write!(f, "Repository error: {}", e),
            Self::GatewayError(e) => write!(f, "{}", e),
        }
    }
}
