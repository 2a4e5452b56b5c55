//! Visibility resolver

use crate::domain::aggregates::FormField;
use crate::domain::value_objects::AnswerSet;

/// Whether `field` should currently be shown.
///
/// Top-level fields always are. A conditional field is shown only while its
/// parent's answer equals its conditional value exactly. A parent that is
/// missing, is not a top-level select, or no longer offers the conditional
/// value never shows the child.
pub fn is_visible(field: &FormField, fields: &[FormField], answers: &AnswerSet) -> bool {
    let Some(parent_id) = field.parent_field_id else {
        return true;
    };
    let Some(expected) = field.conditional_value.as_deref() else {
        return false;
    };
    let Some(parent) = fields.iter().find(|f| f.id == parent_id) else {
        return false;
    };
    if !parent.can_be_parent() || !parent.has_option(expected) {
        return false;
    }
    answers.get(parent_id) == Some(expected)
}

/// The fields to render, in schema order
pub fn visible_fields<'a>(fields: &'a [FormField], answers: &AnswerSet) -> Vec<&'a FormField> {
    fields
        .iter()
        .filter(|f| is_visible(f, fields, answers))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{FieldId, FieldType};

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new(1, "Datang?", FieldType::Select).with_options(["Ya", "Tidak"]),
            FormField::new(2, "Jumlah tamu", FieldType::Number).shown_when(1, "Ya"),
            FormField::new(3, "Alasan", FieldType::Text).shown_when(1, "Tidak"),
            FormField::new(4, "Kota", FieldType::Text),
        ]
    }

    fn ids(visible: &[&FormField]) -> Vec<u64> {
        visible.iter().map(|f| f.id.value()).collect()
    }

    fn answered(pairs: &[(u64, &str)]) -> AnswerSet {
        pairs.iter().map(|(id, v)| (FieldId::new(*id), *v)).collect()
    }

    #[test]
    fn test_unanswered_parent_hides_children() {
        let fields = fields();
        assert_eq!(ids(&visible_fields(&fields, &AnswerSet::new())), vec![1, 4]);
    }

    #[test]
    fn test_matching_answer_shows_branch_in_schema_order() {
        let fields = fields();
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, "Ya")]))), vec![1, 2, 4]);
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, "Tidak")]))), vec![1, 3, 4]);
    }

    #[test]
    fn test_comparison_is_exact() {
        let fields = fields();
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, "ya")]))), vec![1, 4]);
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, " Ya")]))), vec![1, 4]);
    }

    #[test]
    fn test_orphan_is_never_visible() {
        let fields = vec![FormField::new(2, "Jumlah tamu", FieldType::Number).shown_when(1, "Ya")];
        // a stale answer for the missing parent does not help
        let answers = answered(&[(1, "Ya")]);
        assert!(visible_fields(&fields, &answers).is_empty());
    }

    #[test]
    fn test_non_select_parent_never_shows_child() {
        let fields = vec![
            FormField::new(1, "Kota", FieldType::Text),
            FormField::new(2, "Kecamatan", FieldType::Text).shown_when(1, "Bandung"),
        ];
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, "Bandung")]))), vec![1]);
    }

    #[test]
    fn test_removed_option_never_shows_child() {
        let fields = vec![
            FormField::new(1, "Datang?", FieldType::Select).with_options(["Tidak"]),
            FormField::new(2, "Jumlah tamu", FieldType::Number).shown_when(1, "Ya"),
        ];
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, "Ya")]))), vec![1]);
    }

    #[test]
    fn test_second_level_is_never_visible() {
        let fields = vec![
            FormField::new(1, "Datang?", FieldType::Select).with_options(["Ya", "Tidak"]),
            FormField::new(2, "Bawa anak?", FieldType::Select)
                .with_options(["Ya", "Tidak"])
                .shown_when(1, "Ya"),
            FormField::new(3, "Jumlah anak", FieldType::Number).shown_when(2, "Ya"),
        ];
        let answers = answered(&[(1, "Ya"), (2, "Ya")]);
        assert_eq!(ids(&visible_fields(&fields, &answers)), vec![1, 2]);
    }

    #[test]
    fn test_missing_conditional_value_is_hidden() {
        let mut child = FormField::new(2, "Jumlah tamu", FieldType::Number);
        child.parent_field_id = Some(FieldId::new(1));
        let fields = vec![
            FormField::new(1, "Datang?", FieldType::Select).with_options(["Ya"]),
            child,
        ];
        assert_eq!(ids(&visible_fields(&fields, &answered(&[(1, "Ya")]))), vec![1]);
    }
}
