//! Command handlers
//!
//! Application services that orchestrate use cases.

use std::sync::Arc;
use async_trait::async_trait;

use crate::application::dto::{EventSummary, RegistrationOutcome};
use crate::domain::aggregates::{FieldDraft, FormField, FormSchema, RegistrationSession};
use crate::domain::value_objects::{EventId, FieldId};
use crate::error::FormsError;
use crate::ports::inbound::{FormAuthoringUseCases, RegistrationUseCases, UseCaseError};
use crate::ports::outbound::{
    EventDirectory, FormAuthoring, FormSchemaProvider, GatewayError, RegistrationGateway,
    RepositoryError,
};

/// Registration application service
pub struct RegistrationService {
    events: Arc<dyn EventDirectory>,
    schemas: Arc<dyn FormSchemaProvider>,
    gateway: Arc<dyn RegistrationGateway>,
}

impl RegistrationService {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        schemas: Arc<dyn FormSchemaProvider>,
        gateway: Arc<dyn RegistrationGateway>,
    ) -> Self {
        Self {
            events,
            schemas,
            gateway,
        }
    }

    /// Session for a looked-up event, carrying its registration deadline
    pub async fn open_event_session(&self, event: &EventSummary) -> Result<RegistrationSession, UseCaseError> {
        let session = self.open_session(event.event_id()).await?;
        Ok(session.with_window(event.window()))
    }
}

#[async_trait]
impl RegistrationUseCases for RegistrationService {
    async fn find_event(&self, slug: &str) -> Result<EventSummary, UseCaseError> {
        self.events.find_by_slug(slug).await
            .map_err(repository_error)?
            .ok_or_else(|| UseCaseError::NotFound(format!("event \"{}\"", slug)))
    }

    async fn open_session(&self, event_id: EventId) -> Result<RegistrationSession, UseCaseError> {
        let schema = self.schemas.fetch_schema(event_id).await
            .map_err(repository_error)?;

        tracing::debug!(event = %event_id, fields = schema.len(), "registration session opened");
        Ok(RegistrationSession::start(schema))
    }

    async fn submit(&self, session: &mut RegistrationSession) -> Result<RegistrationOutcome, UseCaseError> {
        session.window().ensure_open()
            .map_err(domain_error)?;

        // Nothing reaches the gateway while a visible required field is empty
        let payload = session.build_payload()
            .map_err(domain_error)?;

        tracing::info!(
            event = %session.event_id(),
            session = %session.id(),
            answers = payload.len(),
            "submitting registration"
        );

        self.gateway.submit(session.event_id(), &payload).await
            .map_err(gateway_error)
    }

    async fn registration_status(&self, event_id: EventId) -> Result<bool, UseCaseError> {
        self.gateway.is_registered(event_id).await
            .map_err(gateway_error)
    }
}

/// Form authoring application service
pub struct FormAuthoringService {
    schemas: Arc<dyn FormSchemaProvider>,
    authoring: Arc<dyn FormAuthoring>,
}

impl FormAuthoringService {
    pub fn new(schemas: Arc<dyn FormSchemaProvider>, authoring: Arc<dyn FormAuthoring>) -> Self {
        Self { schemas, authoring }
    }
}

#[async_trait]
impl FormAuthoringUseCases for FormAuthoringService {
    async fn schema(&self, event_id: EventId) -> Result<FormSchema, UseCaseError> {
        self.schemas.fetch_schema(event_id).await
            .map_err(repository_error)
    }

    async fn add_field(&self, event_id: EventId, draft: FieldDraft) -> Result<FormField, UseCaseError> {
        let schema = self.schema(event_id).await?;

        let draft = schema.accept(draft)
            .map_err(domain_error)?;

        let field = self.authoring.create_field(event_id, &draft).await
            .map_err(repository_error)?;

        tracing::info!(event = %event_id, field = %field.id, label = %field.label, "form field added");
        Ok(field)
    }

    async fn remove_field(&self, field_id: FieldId) -> Result<(), UseCaseError> {
        self.authoring.delete_field(field_id).await
            .map_err(|e| match e {
                RepositoryError::NotFound => UseCaseError::NotFound(format!("field {}", field_id)),
                other => repository_error(other),
            })?;

        tracing::info!(field = %field_id, "form field removed");
        Ok(())
    }
}

fn domain_error(e: FormsError) -> UseCaseError {
    match e {
        FormsError::MissingRequiredFields(errors) => UseCaseError::Validation(errors),
        FormsError::FieldNotFound(id) => UseCaseError::NotFound(format!("field {}", id)),
        other => UseCaseError::DomainError(other.to_string()),
    }
}

fn repository_error(e: RepositoryError) -> UseCaseError {
    UseCaseError::RepositoryError(e.to_string())
}

fn gateway_error(e: GatewayError) -> UseCaseError {
    UseCaseError::GatewayError(e.to_string())
}
