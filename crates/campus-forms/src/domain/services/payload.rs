//! Submission payload assembly

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AnswerSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub form_field_id: u64,
    pub value: String,
}

/// Body of `POST /participant/event/:id/register`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    pub answers: Vec<AnswerRecord>,
}

impl RegistrationPayload {
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// One record per stored answer, in ascending field id order.
///
/// Visibility is not consulted: whatever is still in the answer set is sent.
/// Answers discarded by the cascade rule are simply no longer there.
pub fn build_payload(answers: &AnswerSet) -> RegistrationPayload {
    RegistrationPayload {
        answers: answers
            .iter()
            .map(|(id, value)| AnswerRecord {
                form_field_id: id.value(),
                value: value.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldId;

    #[test]
    fn test_payload_wire_shape() {
        let answers: AnswerSet = [(FieldId::new(3), "Ya"), (FieldId::new(1), "Jakarta")]
            .into_iter()
            .collect();

        let json = serde_json::to_value(build_payload(&answers)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "answers": [
                    {"form_field_id": 1, "value": "Jakarta"},
                    {"form_field_id": 3, "value": "Ya"}
                ]
            })
        );
    }

    #[test]
    fn test_empty_answers_give_empty_payload() {
        assert!(build_payload(&AnswerSet::new()).is_empty());
    }
}
