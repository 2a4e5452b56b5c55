//! Campus Event Registration Forms
//!
//! Conditional registration forms for campus events: organizers build a
//! form out of typed questions, participants fill it in, and only the
//! questions whose condition is met are shown and validated.
//!
//! ## Architecture
//!
//! - **Domain Layer**: form schema, registration session, visibility /
//!   validation / cascade rules, domain events
//! - **Application Layer**: registration use cases, wire DTOs
//! - **Ports Layer**: schema provider, authoring and registration gateway
//! - **Infrastructure Layer**: in-memory adapters
//!
//! ## Conditional fields
//!
//! A field may name a parent `select` field and a value. It is visible only
//! while the parent's answer equals that value, and changing the parent to
//! any other value discards the child's answer. Nesting is one level deep.

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;
pub mod error;

// Re-exports for convenience
pub use domain::aggregates::{FieldDraft, FormField, FormSchema, RegistrationSession};
pub use domain::value_objects::{AnswerSet, EventId, FieldId, FieldType};
pub use domain::services::{
    apply_answer, build_payload, validate, visible_fields, RegistrationWindow, ValidationErrors,
};
pub use domain::events::{DomainEvent, SessionEvent};
pub use application::{FormAuthoringService, RegistrationService, dto::*};
pub use ports::inbound::{FormAuthoringUseCases, RegistrationUseCases, UseCaseError};
pub use ports::outbound::{
    EventDirectory, FormAuthoring, FormSchemaProvider, GatewayError, RegistrationGateway,
    RepositoryError,
};
pub use error::{FormsError, Result};
