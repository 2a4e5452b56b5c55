//! Registration status

use std::sync::Arc;

use anyhow::Result;
use campus_forms::{EventId, RegistrationService, RegistrationUseCases};
use colored::Colorize;

use crate::api::ApiClient;

pub async fn handle(event_id: u64, client: Arc<ApiClient>) -> Result<()> {
    let service = RegistrationService::new(client.clone(), client.clone(), client);

    if service.registration_status(EventId::new(event_id)).await? {
        println!("{}", "Anda sudah terdaftar di event ini".green());
    } else {
        println!("{}", "Anda belum terdaftar di event ini".yellow());
    }
    Ok(())
}
