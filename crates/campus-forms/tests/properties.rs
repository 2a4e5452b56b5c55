use campus_forms::*;
use proptest::prelude::*;

const CHOICES: [&str; 3] = ["Ya", "Tidak", "Mungkin"];

fn field_strategy(id: u64) -> impl Strategy<Value = FormField> {
    (
        prop_oneof![
            Just(FieldType::Text),
            Just(FieldType::Number),
            Just(FieldType::Select),
            Just(FieldType::Date),
        ],
        any::<bool>(),
        prop::option::of((1u64..=12, prop::sample::select(CHOICES.to_vec()))),
    )
        .prop_map(move |(field_type, required, condition)| {
            let mut field = FormField::new(id, format!("Pertanyaan {id}"), field_type);
            if field_type == FieldType::Select {
                field = field.with_options(["Ya", "Tidak"]);
            }
            if required {
                field = field.required();
            }
            match condition {
                Some((parent, value)) if parent != id => field.shown_when(parent, value),
                _ => field,
            }
        })
}

fn schema_strategy() -> impl Strategy<Value = Vec<FormField>> {
    (1usize..=12).prop_flat_map(|n| {
        (1..=n as u64)
            .map(field_strategy)
            .collect::<Vec<_>>()
    })
}

fn answers_strategy() -> impl Strategy<Value = AnswerSet> {
    prop::collection::btree_map(
        1u64..=12,
        prop_oneof![
            prop::sample::select(CHOICES.to_vec()).prop_map(String::from),
            Just(String::new()),
            Just("   ".to_string()),
            "[a-z0-9]{1,6}",
        ],
        0..12,
    )
    .prop_map(|m| m.into_iter().map(|(id, v)| (FieldId::new(id), v)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn visibility_is_pure(fields in schema_strategy(), given in answers_strategy()) {
        let first: Vec<FieldId> = visible_fields(&fields, &given).iter().map(|f| f.id).collect();
        let second: Vec<FieldId> = visible_fields(&fields, &given).iter().map(|f| f.id).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unconditional_fields_always_visible(fields in schema_strategy(), given in answers_strategy()) {
        let visible: Vec<FieldId> = visible_fields(&fields, &given).iter().map(|f| f.id).collect();
        for field in fields.iter().filter(|f| f.parent_field_id.is_none()) {
            prop_assert!(visible.contains(&field.id));
        }
    }

    #[test]
    fn errors_only_for_visible_required_fields(fields in schema_strategy(), given in answers_strategy()) {
        let visible: Vec<FieldId> = visible_fields(&fields, &given).iter().map(|f| f.id).collect();
        let errors = validate(&fields, &given);
        for (id, _) in errors.iter() {
            prop_assert!(visible.contains(&id));
            prop_assert!(given.is_blank(id));
        }
    }

    #[test]
    fn payload_mirrors_answers(given in answers_strategy()) {
        let payload = build_payload(&given);
        prop_assert_eq!(payload.len(), given.len());
        for record in &payload.answers {
            prop_assert_eq!(given.get(FieldId::new(record.form_field_id)), Some(record.value.as_str()));
        }
    }

    #[test]
    fn changed_parent_leaves_no_stale_child(
        fields in schema_strategy(),
        mut given in answers_strategy(),
        parent in 1u64..=12,
        value in prop::sample::select(CHOICES.to_vec()),
    ) {
        let mut errors = ValidationErrors::new();
        apply_answer(&fields, &mut given, &mut errors, FieldId::new(parent), value);

        for child in fields.iter().filter(|f| f.parent_field_id == Some(FieldId::new(parent))) {
            if child.conditional_value.as_deref() != Some(value) {
                prop_assert!(!given.contains(child.id));
            }
        }
    }
}
