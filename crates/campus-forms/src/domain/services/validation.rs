//! Validation engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::aggregates::FormField;
use crate::domain::value_objects::{AnswerSet, FieldId};
use super::visibility::visible_fields;

/// Inline error messages keyed by field id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldId, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FieldId, message: impl Into<String>) {
        self.0.insert(id, message.into());
    }

    pub fn remove(&mut self, id: FieldId) -> Option<String> {
        self.0.remove(&id)
    }

    pub fn get(&self, id: FieldId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn field_ids(&self) -> Vec<FieldId> {
        self.0.keys().copied().collect()
    }

    /// Lowest field id with an error
    pub fn first(&self) -> Option<(FieldId, &str)> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.0.iter().map(|(id, m)| (*id, m.as_str()))
    }
}

pub fn required_message(field: &FormField) -> String {
    format!("{} wajib diisi", field.label)
}

/// Check required fields among the already-resolved visible fields
pub fn validate_visible(visible: &[&FormField], answers: &AnswerSet) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in visible.iter().filter(|f| f.is_required) {
        if answers.is_blank(field.id) {
            errors.insert(field.id, required_message(field));
        }
    }
    errors
}

/// Resolve visibility, then check required fields. Hidden fields are exempt.
pub fn validate(fields: &[FormField], answers: &AnswerSet) -> ValidationErrors {
    validate_visible(&visible_fields(fields, answers), answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new(1, "Nama", FieldType::Text).required(),
            FormField::new(2, "Catatan", FieldType::Text),
        ]
    }

    #[test]
    fn test_blank_required_answers() {
        let fields = fields();
        for blank in ["", "   ", "\t\n"] {
            let answers: AnswerSet = [(FieldId::new(1), blank)].into_iter().collect();
            let errors = validate(&fields, &answers);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(FieldId::new(1)), Some("Nama wajib diisi"));
        }
    }

    #[test]
    fn test_absent_required_answer() {
        let errors = validate(&fields(), &AnswerSet::new());
        assert_eq!(errors.field_ids(), vec![FieldId::new(1)]);
    }

    #[test]
    fn test_filled_required_answer() {
        let answers: AnswerSet = [(FieldId::new(1), "x")].into_iter().collect();
        assert!(validate(&fields(), &answers).is_empty());
    }

    #[test]
    fn test_hidden_required_field_is_exempt() {
        let fields = vec![
            FormField::new(1, "Datang?", FieldType::Select).with_options(["Ya", "Tidak"]),
            FormField::new(2, "Jumlah tamu", FieldType::Number)
                .required()
                .shown_when(1, "Ya"),
        ];
        let answers: AnswerSet = [(FieldId::new(1), "Tidak")].into_iter().collect();
        assert!(validate(&fields, &answers).is_empty());
    }
}
