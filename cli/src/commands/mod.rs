//! CLI Commands

pub mod config;
pub mod form;
pub mod preview;
pub mod register;
pub mod status;

use campus_forms::{FieldId, FieldView, RegistrationSession, UseCaseError};
use colored::Colorize;

use crate::output::{AnswerRow, OutputFormat};

/// Parse a `FIELD_ID=VALUE` answer argument
pub fn parse_answer(arg: &str) -> Result<(FieldId, String), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD_ID=VALUE, got \"{}\"", arg))?;
    let id: FieldId = id
        .parse()
        .map_err(|_| format!("\"{}\" is not a field id", id.trim()))?;
    Ok((id, value.to_string()))
}

/// Apply answers in order, so later answers see earlier cascades
pub fn fill(session: &mut RegistrationSession, answers: &[(FieldId, String)]) -> anyhow::Result<()> {
    for (id, value) in answers {
        let cleared = session.set_answer(*id, value.clone())?;
        for child in cleared {
            eprintln!("{} answer for field {} discarded", "note:".yellow(), child);
        }
    }
    Ok(())
}

/// Render the visible part of a session with its inline errors
pub fn print_session(session: &RegistrationSession, format: OutputFormat) {
    let views = FieldView::visible_in(session);
    format.print_rows(&views, |v| AnswerRow::from(v));
}

/// Turn a use case failure into a CLI error, listing missing answers
pub fn use_case_failure(e: UseCaseError) -> anyhow::Error {
    if let UseCaseError::Validation(errors) = &e {
        for (id, message) in errors.iter() {
            eprintln!("  {} {}", format!("[{}]", id).red(), message);
        }
        return anyhow::anyhow!("{} required field(s) unanswered", errors.len());
    }
    anyhow::anyhow!(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("3=Ya"), Ok((FieldId::new(3), "Ya".to_string())));
        assert_eq!(parse_answer(" 4 =a=b"), Ok((FieldId::new(4), "a=b".to_string())));
        assert_eq!(parse_answer("5="), Ok((FieldId::new(5), String::new())));
    }

    #[test]
    fn test_parse_answer_rejects_malformed() {
        assert!(parse_answer("Ya").is_err());
        assert!(parse_answer("x=Ya").is_err());
    }

    #[test]
    fn test_fill_applies_cascade() {
        use campus_forms::{EventId, FieldType, FormField, FormSchema};

        let schema = FormSchema::new(
            EventId::new(1),
            vec![
                FormField::new(1, "Datang?", FieldType::Select).with_options(["Ya", "Tidak"]),
                FormField::new(2, "Jumlah tamu", FieldType::Number).shown_when(1, "Ya"),
            ],
        );
        let mut session = RegistrationSession::start(schema);
        let answers = vec![
            (FieldId::new(1), "Ya".to_string()),
            (FieldId::new(2), "3".to_string()),
            (FieldId::new(1), "Tidak".to_string()),
        ];

        fill(&mut session, &answers).unwrap();
        assert_eq!(session.answers().get(FieldId::new(2)), None);
        assert!(fill(&mut session, &[(FieldId::new(9), "x".to_string())]).is_err());
    }
}
