//! Cascade-clear rule

use crate::domain::aggregates::FormField;
use crate::domain::value_objects::{AnswerSet, FieldId};
use super::validation::ValidationErrors;

/// Record `value` for `field_id` and discard the answers of its children
/// whose condition no longer holds.
///
/// The field's own inline error is cleared, as is the error of every
/// cleared child. Children whose conditional value equals `value` keep
/// their answers. Only direct children are touched. Returns the ids of the
/// children whose answer or error was discarded.
pub fn apply_answer(
    fields: &[FormField],
    answers: &mut AnswerSet,
    errors: &mut ValidationErrors,
    field_id: FieldId,
    value: &str,
) -> Vec<FieldId> {
    answers.set(field_id, value);
    errors.remove(field_id);

    let mut cleared = Vec::new();
    for child in fields.iter().filter(|f| f.parent_field_id == Some(field_id)) {
        if child.conditional_value.as_deref() == Some(value) {
            continue;
        }
        let had_answer = answers.remove(child.id).is_some();
        let had_error = errors.remove(child.id).is_some();
        if had_answer || had_error {
            cleared.push(child.id);
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new(1, "Datang?", FieldType::Select).with_options(["Ya", "Tidak"]),
            FormField::new(2, "Jumlah tamu", FieldType::Number).required().shown_when(1, "Ya"),
            FormField::new(3, "Alasan", FieldType::Text).shown_when(1, "Tidak"),
        ]
    }

    #[test]
    fn test_switching_branch_clears_other_branch() {
        let fields = fields();
        let mut answers = AnswerSet::new();
        let mut errors = ValidationErrors::new();

        apply_answer(&fields, &mut answers, &mut errors, FieldId::new(1), "Ya");
        apply_answer(&fields, &mut answers, &mut errors, FieldId::new(2), "3");

        let cleared = apply_answer(&fields, &mut answers, &mut errors, FieldId::new(1), "Tidak");
        assert_eq!(cleared, vec![FieldId::new(2)]);
        assert_eq!(answers.get(FieldId::new(1)), Some("Tidak"));
        assert!(!answers.contains(FieldId::new(2)));
    }

    #[test]
    fn test_matching_child_keeps_answer() {
        let fields = fields();
        let mut answers: AnswerSet = [(FieldId::new(1), "Ya"), (FieldId::new(2), "3")]
            .into_iter()
            .collect();
        let mut errors = ValidationErrors::new();

        let cleared = apply_answer(&fields, &mut answers, &mut errors, FieldId::new(1), "Ya");
        assert!(cleared.is_empty());
        assert_eq!(answers.get(FieldId::new(2)), Some("3"));
    }

    #[test]
    fn test_clears_own_and_child_errors() {
        let fields = fields();
        let mut answers = AnswerSet::new();
        let mut errors = ValidationErrors::new();
        errors.insert(FieldId::new(1), "Datang? wajib diisi");
        errors.insert(FieldId::new(2), "Jumlah tamu wajib diisi");

        let cleared = apply_answer(&fields, &mut answers, &mut errors, FieldId::new(1), "Tidak");
        assert_eq!(cleared, vec![FieldId::new(2)]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_text_edit_clears_only_own_error() {
        let fields = fields();
        let mut answers = AnswerSet::new();
        let mut errors = ValidationErrors::new();
        errors.insert(FieldId::new(2), "Jumlah tamu wajib diisi");
        errors.insert(FieldId::new(3), "other");

        let cleared = apply_answer(&fields, &mut answers, &mut errors, FieldId::new(2), "4");
        assert!(cleared.is_empty());
        assert_eq!(errors.field_ids(), vec![FieldId::new(3)]);
    }
}
