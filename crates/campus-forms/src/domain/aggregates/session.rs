//! Registration Session Aggregate
//!
//! State of one participant filling in one event's form: the answers typed
//! so far and the inline errors from the last validation. Every transition
//! goes through the pure rules in `domain::services`.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::aggregates::{FormField, FormSchema};
use crate::domain::events::{DomainEvent, SessionEvent};
use crate::domain::services::{self, RegistrationPayload, RegistrationWindow, ValidationErrors};
use crate::domain::value_objects::{AnswerSet, EventId, FieldId};
use crate::error::{FormsError, Result};

#[derive(Clone, Debug)]
pub struct RegistrationSession {
    id: Uuid,
    event_id: EventId,
    fields: Vec<FormField>,
    answers: AnswerSet,
    errors: ValidationErrors,
    window: RegistrationWindow,
    events: Vec<DomainEvent>,
}

impl RegistrationSession {
    /// Start with an empty answer set
    pub fn start(schema: FormSchema) -> Self {
        let orphans = schema.orphans();
        if !orphans.is_empty() {
            tracing::warn!(event = %schema.event_id(), ?orphans, "form has conditional fields without a parent");
        }
        Self {
            id: Uuid::new_v4(),
            event_id: schema.event_id(),
            fields: schema.fields().to_vec(),
            answers: AnswerSet::new(),
            errors: ValidationErrors::new(),
            window: RegistrationWindow::open(),
            events: vec![],
        }
    }

    pub fn with_window(mut self, window: RegistrationWindow) -> Self {
        self.window = window;
        self
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn event_id(&self) -> EventId { self.event_id }
    pub fn fields(&self) -> &[FormField] { &self.fields }
    pub fn answers(&self) -> &AnswerSet { &self.answers }
    pub fn errors(&self) -> &ValidationErrors { &self.errors }
    pub fn window(&self) -> &RegistrationWindow { &self.window }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn error_for(&self, id: FieldId) -> Option<&str> {
        self.errors.get(id)
    }

    pub fn visible_fields(&self) -> Vec<&FormField> {
        services::visible_fields(&self.fields, &self.answers)
    }

    /// Record an answer, applying the cascade-clear rule.
    ///
    /// Returns the children whose answers were discarded.
    pub fn set_answer(&mut self, field_id: FieldId, value: impl Into<String>) -> Result<Vec<FieldId>> {
        if self.field(field_id).is_none() {
            return Err(FormsError::FieldNotFound(field_id));
        }
        let value = value.into();
        let cleared = services::apply_answer(
            &self.fields,
            &mut self.answers,
            &mut self.errors,
            field_id,
            &value,
        );

        tracing::debug!(session = %self.id, field = %field_id, ?cleared, "answer recorded");
        self.raise_event(DomainEvent::Session(SessionEvent::AnswerRecorded {
            field_id,
            recorded_at: Utc::now(),
        }));
        if !cleared.is_empty() {
            self.raise_event(DomainEvent::Session(SessionEvent::BranchCleared {
                parent_id: field_id,
                cleared: cleared.clone(),
            }));
        }
        Ok(cleared)
    }

    /// Re-run validation, replacing the stored inline errors
    pub fn validate(&mut self) -> &ValidationErrors {
        self.errors = services::validate(&self.fields, &self.answers);
        if !self.errors.is_empty() {
            tracing::debug!(session = %self.id, missing = self.errors.len(), "submission blocked");
            self.raise_event(DomainEvent::Session(SessionEvent::SubmissionBlocked {
                event_id: self.event_id,
                missing: self.errors.field_ids(),
            }));
        }
        &self.errors
    }

    /// Whether the form would pass validation now, without touching state
    pub fn is_valid(&self) -> bool {
        services::validate(&self.fields, &self.answers).is_empty()
    }

    /// Validate, then assemble the wire payload
    pub fn build_payload(&mut self) -> Result<RegistrationPayload> {
        if !self.validate().is_empty() {
            return Err(FormsError::MissingRequiredFields(self.errors.clone()));
        }
        let payload = services::build_payload(&self.answers);
        self.raise_event(DomainEvent::Session(SessionEvent::PayloadAssembled {
            event_id: self.event_id,
            answer_count: payload.len(),
        }));
        Ok(payload)
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }
}
