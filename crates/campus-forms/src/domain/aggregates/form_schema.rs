//! Form Schema Aggregate
//!
//! The ordered list of questions of one event's registration form, plus the
//! organizer-side rules for adding and removing questions.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{split_options, EventId, FieldId, FieldType};
use crate::error::{FormsError, Result};

/// One question of a registration form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: FieldId,
    pub event_id: EventId,
    pub label: String,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub is_required: bool,
    pub order: i32,
    pub parent_field_id: Option<FieldId>,
    pub conditional_value: Option<String>,
}

impl FormField {
    pub fn new(id: u64, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: FieldId::new(id),
            event_id: EventId::default(),
            label: label.into(),
            field_type,
            options: vec![],
            is_required: false,
            order: 0,
            parent_field_id: None,
            conditional_value: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Show this field only while `parent` is answered with `value`
    pub fn shown_when(mut self, parent: u64, value: impl Into<String>) -> Self {
        self.parent_field_id = Some(FieldId::new(parent));
        self.conditional_value = Some(value.into());
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.parent_field_id.is_some()
    }

    /// Only top-level select fields may drive conditional fields
    pub fn can_be_parent(&self) -> bool {
        self.field_type == FieldType::Select && !self.is_conditional()
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// Registration form of one event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    event_id: EventId,
    fields: Vec<FormField>,
}

impl FormSchema {
    /// Build a schema, ordering fields by their `order` column (stable)
    pub fn new(event_id: EventId, mut fields: Vec<FormField>) -> Self {
        fields.sort_by_key(|f| f.order);
        Self { event_id, fields }
    }

    pub fn event_id(&self) -> EventId { self.event_id }
    pub fn fields(&self) -> &[FormField] { &self.fields }
    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn children_of(&self, parent: FieldId) -> impl Iterator<Item = &FormField> {
        self.fields
            .iter()
            .filter(move |f| f.parent_field_id == Some(parent))
    }

    /// Fields an author may pick as the parent of a new conditional field
    pub fn parent_candidates(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|f| f.can_be_parent())
    }

    /// Conditional fields whose parent is missing from the schema.
    ///
    /// They can never become visible; this only reports them.
    pub fn orphans(&self) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|f| matches!(f.parent_field_id, Some(p) if self.field(p).is_none()))
            .map(|f| f.id)
            .collect()
    }

    /// Normalize `draft` and check it against the authoring rules.
    ///
    /// The accepted draft is what gets stored; the store assigns its id.
    pub fn accept(&self, draft: FieldDraft) -> Result<FieldDraft> {
        let draft = draft.normalized();
        draft.check_against(self)?;
        Ok(draft)
    }

    /// Remove one field. Its conditional children stay and become orphans.
    pub fn remove_field(&mut self, id: FieldId) -> Result<FormField> {
        let pos = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or(FormsError::FieldNotFound(id))?;
        let removed = self.fields.remove(pos);

        let orphaned: Vec<FieldId> = self.children_of(id).map(|f| f.id).collect();
        if !orphaned.is_empty() {
            tracing::warn!(field = %id, ?orphaned, "removed a parent field; children can no longer be shown");
        }
        Ok(removed)
    }
}

/// A question as typed by an organizer, before it gets an id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDraft {
    pub label: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub parent_field_id: Option<FieldId>,
    #[serde(default)]
    pub conditional_value: Option<String>,
}

impl FieldDraft {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            field_type,
            ..Default::default()
        }
    }

    /// Options typed as `"Ya, Tidak"`
    pub fn with_option_list(mut self, list: &str) -> Self {
        self.options = split_options(list);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.is_required = required;
        self
    }

    pub fn shown_when(mut self, parent: FieldId, value: impl Into<String>) -> Self {
        self.parent_field_id = Some(parent);
        self.conditional_value = Some(value.into());
        self
    }

    /// Trim text, drop blank options, drop options of non-select fields
    pub fn normalized(mut self) -> Self {
        self.label = self.label.trim().to_string();
        self.options = if self.field_type.has_options() {
            self.options
                .iter()
                .map(|o| o.trim())
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect()
        } else {
            vec![]
        };
        self.conditional_value = self
            .conditional_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        self
    }

    /// Authoring rules for a (normalized) draft against the current schema
    pub fn check_against(&self, schema: &FormSchema) -> Result<()> {
        if self.label.is_empty() {
            return Err(FormsError::InvalidDraft("label is required".into()));
        }
        if self.field_type.has_options() && self.options.is_empty() {
            return Err(FormsError::InvalidDraft(
                "select field needs at least one option".into(),
            ));
        }

        match (self.parent_field_id, self.conditional_value.as_deref()) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(FormsError::InvalidDraft(
                "conditional value given without a parent field".into(),
            )),
            (Some(_), None) => Err(FormsError::InvalidDraft(
                "conditional field needs a value to match".into(),
            )),
            (Some(parent_id), Some(value)) => {
                let parent = schema
                    .field(parent_id)
                    .ok_or(FormsError::FieldNotFound(parent_id))?;
                if !parent.can_be_parent() {
                    return Err(FormsError::InvalidDraft(format!(
                        "\"{}\" cannot be a parent: only non-conditional select fields can",
                        parent.label
                    )));
                }
                if !parent.has_option(value) {
                    return Err(FormsError::InvalidDraft(format!(
                        "\"{value}\" is not an option of \"{}\"",
                        parent.label
                    )));
                }
                Ok(())
            }
        }
    }

    pub fn into_field(self, id: FieldId, event_id: EventId) -> FormField {
        FormField {
            id,
            event_id,
            label: self.label,
            field_type: self.field_type,
            options: self.options,
            is_required: self.is_required,
            order: 0,
            parent_field_id: self.parent_field_id,
            conditional_value: self.conditional_value,
        }
    }
}
