//! Registration commands

use std::sync::Arc;

use anyhow::Result;
use campus_forms::{FieldId, RegistrationOutcome, RegistrationService, RegistrationUseCases};
use colored::Colorize;

use super::{fill, print_session, use_case_failure};
use crate::api::ApiClient;
use crate::output::OutputFormat;

pub async fn handle(
    slug: &str,
    answers: &[(FieldId, String)],
    dry_run: bool,
    client: Arc<ApiClient>,
    format: OutputFormat,
) -> Result<()> {
    let service = RegistrationService::new(client.clone(), client.clone(), client);

    let event = service.find_event(slug).await.map_err(use_case_failure)?;
    let mut session = service.open_event_session(&event).await.map_err(use_case_failure)?;
    fill(&mut session, answers)?;

    if dry_run {
        session.validate();
        print_session(&session, format);
        if !session.errors().is_empty() {
            return Err(anyhow::anyhow!("{} required field(s) unanswered", session.errors().len()));
        }
        format.print(&session.build_payload()?);
        return Ok(());
    }

    let outcome = match service.submit(&mut session).await {
        Ok(outcome) => outcome,
        Err(e) => {
            print_session(&session, format);
            return Err(use_case_failure(e));
        }
    };

    match format {
        OutputFormat::Table => {
            println!("{} {}", "✓".green(), outcome.message());
            if let RegistrationOutcome::AwaitingPayment { redirect_url, .. } = &outcome {
                println!("  Pay at: {}", redirect_url.cyan());
            }
        }
        _ => format.print(&outcome),
    }
    Ok(())
}
