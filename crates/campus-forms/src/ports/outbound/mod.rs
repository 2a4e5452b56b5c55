//! Outbound ports
//!
//! Hexagonal architecture: the REST backend seen from the form core. The
//! CLI implements these over HTTP, `infrastructure` implements them in memory.

use async_trait::async_trait;

use crate::application::dto::{EventSummary, RegistrationOutcome, RegistrationPayload};
use crate::domain::aggregates::{FieldDraft, FormField, FormSchema};
use crate::domain::value_objects::{EventId, FieldId};

/// Read-only source of registration forms
#[async_trait]
pub trait FormSchemaProvider: Send + Sync {
    /// Normalized, ordered form of an event (empty when it has no questions)
    async fn fetch_schema(&self, event_id: EventId) -> Result<FormSchema, RepositoryError>;
}

/// Public event lookup
#[async_trait]
pub trait EventDirectory: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<EventSummary>, RepositoryError>;
}

/// Organizer-side form editing
#[async_trait]
pub trait FormAuthoring: Send + Sync {
    /// Persist an already checked draft and return the stored field
    async fn create_field(&self, event_id: EventId, draft: &FieldDraft) -> Result<FormField, RepositoryError>;

    async fn delete_field(&self, field_id: FieldId) -> Result<(), RepositoryError>;
}

/// Registration submission endpoint
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    async fn submit(&self, event_id: EventId, payload: &RegistrationPayload) -> Result<RegistrationOutcome, GatewayError>;

    /// Whether the current user already registered for the event
    async fn is_registered(&self, event_id: EventId) -> Result<bool, GatewayError>;
}

/// Repository error type
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryError {
    NotFound,
    ConnectionError(String),
    QueryError(String),
    SerializationError(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Entity not found"),
            Self::ConnectionError(e) => write!(f, "Connection error: {}", e),
            Self::QueryError(e) => write!(f, "Query error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

/// Registration endpoint error type
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The backend refused the registration (quota full, deadline passed,
    /// already registered, ...)
    Rejected { message: String },
    Unauthorized,
    ConnectionError(String),
    SerializationError(String),
}

impl std::error::Error for GatewayError {}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected { message } => write!(f, "Registration rejected: {}", message),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::ConnectionError(e) => write!(f, "Connection error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}
