//! Form authoring commands

use std::sync::Arc;

use anyhow::Result;
use campus_forms::{EventId, FieldDraft, FieldId, FormAuthoringService, FormAuthoringUseCases};
use colored::Colorize;

use crate::api::ApiClient;
use crate::output::{FieldRow, OutputFormat};
use crate::FormCommands;

pub async fn handle(action: FormCommands, client: Arc<ApiClient>, format: OutputFormat) -> Result<()> {
    let service = FormAuthoringService::new(client.clone(), client);

    match action {
        FormCommands::Show { event_id } => {
            let schema = service.schema(EventId::new(event_id)).await?;
            format.print_rows(schema.fields(), |f| FieldRow::from_field(schema.fields(), f));

            for orphan in schema.orphans() {
                eprintln!("{} field {} depends on a missing parent and is never shown", "warning:".yellow(), orphan);
            }
        }
        FormCommands::Add { event_id, label, field_type, options, required, parent, value } => {
            let mut draft = FieldDraft::new(label, field_type).required(required);
            if let Some(list) = options {
                draft = draft.with_option_list(&list);
            }
            if let (Some(parent), Some(value)) = (parent, value) {
                draft = draft.shown_when(FieldId::new(parent), value);
            }

            let field = service.add_field(EventId::new(event_id), draft).await?;
            println!("{} field {} ({})", "Added".green(), field.id, field.label);
        }
        FormCommands::Remove { field_id } => {
            service.remove_field(FieldId::new(field_id)).await?;
            println!("{} field {}", "Removed".green(), field_id);
        }
    }
    Ok(())
}
