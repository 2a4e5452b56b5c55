//! Offline form evaluation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use campus_forms::{normalize_schema, EventId, FieldId, RegistrationSession, WireFormField};

use super::{fill, print_session};
use crate::output::OutputFormat;

pub fn handle(schema_file: &Path, answers: &[(FieldId, String)], format: OutputFormat) -> Result<()> {
    let content = fs::read_to_string(schema_file)
        .with_context(|| format!("reading {}", schema_file.display()))?;
    let wire: Vec<WireFormField> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", schema_file.display()))?;

    let event_id = wire.first().map(|f| EventId::new(f.event_id)).unwrap_or_default();
    let mut session = RegistrationSession::start(normalize_schema(event_id, wire)?);
    fill(&mut session, answers)?;

    session.validate();
    print_session(&session, format);

    if session.errors().is_empty() {
        format.print(&session.build_payload()?);
    } else {
        eprintln!("{} required field(s) unanswered", session.errors().len());
    }
    Ok(())
}
