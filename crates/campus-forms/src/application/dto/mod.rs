//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{FormField, FormSchema, RegistrationSession};
use crate::domain::services::RegistrationWindow;
use crate::domain::value_objects::{normalize_options, EventId, FieldId, FieldType};
use crate::error::Result;

pub use crate::domain::services::{AnswerRecord, RegistrationPayload};

// =============================================================================
// Schema (wire)
// =============================================================================

/// A form field as the REST API returns it.
///
/// `options` is either a JSON array or a string holding one, and an empty
/// `conditional_value` means "none".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireFormField {
    pub id: u64,
    #[serde(default)]
    pub event_id: u64,
    pub label: String,
    pub field_type: String,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub parent_field_id: Option<u64>,
    #[serde(default)]
    pub conditional_value: Option<String>,
}

impl WireFormField {
    pub fn normalize(self) -> Result<FormField> {
        let field_type: FieldType = self.field_type.parse()?;
        let options = if field_type.has_options() {
            normalize_options(self.options.as_ref())
        } else {
            vec![]
        };

        Ok(FormField {
            id: FieldId::new(self.id),
            event_id: EventId::new(self.event_id),
            label: self.label,
            field_type,
            options,
            is_required: self.is_required,
            order: self.order,
            parent_field_id: self.parent_field_id.map(FieldId::new),
            conditional_value: self.conditional_value.filter(|v| !v.is_empty()),
        })
    }
}

impl From<&FormField> for WireFormField {
    fn from(field: &FormField) -> Self {
        Self {
            id: field.id.value(),
            event_id: field.event_id.value(),
            label: field.label.clone(),
            field_type: field.field_type.to_string(),
            options: Some(serde_json::Value::from(field.options.clone())),
            is_required: field.is_required,
            order: field.order,
            parent_field_id: field.parent_field_id.map(|p| p.value()),
            conditional_value: field.conditional_value.clone(),
        }
    }
}

/// Normalize a fetched field list into an ordered schema
pub fn normalize_schema(event_id: EventId, fields: Vec<WireFormField>) -> Result<FormSchema> {
    let fields = fields
        .into_iter()
        .map(WireFormField::normalize)
        .collect::<Result<Vec<_>>>()?;
    Ok(FormSchema::new(event_id, fields))
}

// =============================================================================
// Events
// =============================================================================

/// The part of an event a participant needs before registering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub registration_deadline: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub quota: i64,
}

impl EventSummary {
    pub fn event_id(&self) -> EventId {
        EventId::new(self.id)
    }

    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Deadline in the event's own local time
    pub fn window(&self) -> RegistrationWindow {
        match self.registration_deadline {
            Some(deadline) => RegistrationWindow::until(deadline),
            None => RegistrationWindow::open(),
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// What a successful registration led to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// Free event: the committee still has to confirm
    PendingApproval { message: String },
    /// Paid event: pay through the gateway link
    AwaitingPayment {
        message: String,
        redirect_url: String,
        order_id: Option<String>,
    },
    /// Paid event, but no payment link could be created
    PaymentUnavailable { message: String },
}

impl RegistrationOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::PendingApproval { message }
            | Self::AwaitingPayment { message, .. }
            | Self::PaymentUnavailable { message } => message,
        }
    }
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// One row of the rendered form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub id: u64,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub options: Vec<String>,
    pub shown_when: Option<String>,
    pub answer: Option<String>,
    pub error: Option<String>,
}

impl FieldView {
    /// Rows for the fields currently visible in `session`
    pub fn visible_in(session: &RegistrationSession) -> Vec<FieldView> {
        session
            .visible_fields()
            .into_iter()
            .map(|field| FieldView {
                id: field.id.value(),
                label: field.label.clone(),
                field_type: field.field_type,
                required: field.is_required,
                options: field.options.clone(),
                shown_when: condition_text(session.fields(), field),
                answer: session.answers().get(field.id).map(String::from),
                error: session.error_for(field.id).map(String::from),
            })
            .collect()
    }
}

/// `"Datang? = Ya"` for a conditional field, as shown to organizers
pub fn condition_text(fields: &[FormField], field: &FormField) -> Option<String> {
    let parent_id = field.parent_field_id?;
    let value = field.conditional_value.as_deref().unwrap_or_default();
    let parent = fields
        .iter()
        .find(|f| f.id == parent_id)
        .map(|p| p.label.as_str())
        .unwrap_or("<missing field>");
    Some(format!("{parent} = {value}"))
}
