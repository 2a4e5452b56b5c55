//! In-memory adapters for testing and offline use

use std::sync::atomic::{AtomicU64, Ordering};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::dto::{EventSummary, RegistrationOutcome, RegistrationPayload};
use crate::domain::aggregates::{FieldDraft, FormField, FormSchema};
use crate::domain::value_objects::{EventId, FieldId};
use crate::ports::outbound::{
    EventDirectory, FormAuthoring, FormSchemaProvider, GatewayError, RegistrationGateway,
    RepositoryError,
};

/// In-memory events and their forms
#[derive(Default)]
pub struct InMemoryFormStore {
    events: DashMap<String, EventSummary>,
    fields: DashMap<EventId, Vec<FormField>>,
    last_field_id: AtomicU64,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_event(&self, event: EventSummary) {
        self.events.insert(event.slug.clone(), event);
    }

    /// Seed a stored field as-is, bypassing authoring checks
    pub fn insert_field(&self, mut field: FormField, event_id: EventId) {
        field.event_id = event_id;
        self.last_field_id.fetch_max(field.id.value(), Ordering::SeqCst);
        self.fields.entry(event_id).or_default().push(field);
    }

    pub fn field_count(&self, event_id: EventId) -> usize {
        self.fields.get(&event_id).map(|f| f.len()).unwrap_or(0)
    }
}

#[async_trait]
impl FormSchemaProvider for InMemoryFormStore {
    async fn fetch_schema(&self, event_id: EventId) -> Result<FormSchema, RepositoryError> {
        let fields = self
            .fields
            .get(&event_id)
            .map(|f| f.clone())
            .unwrap_or_default();
        Ok(FormSchema::new(event_id, fields))
    }
}

#[async_trait]
impl EventDirectory for InMemoryFormStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<EventSummary>, RepositoryError> {
        Ok(self.events.get(slug).map(|e| e.clone()))
    }
}

#[async_trait]
impl FormAuthoring for InMemoryFormStore {
    async fn create_field(&self, event_id: EventId, draft: &FieldDraft) -> Result<FormField, RepositoryError> {
        let id = FieldId::new(self.last_field_id.fetch_add(1, Ordering::SeqCst) + 1);
        let field = draft.clone().into_field(id, event_id);
        self.fields.entry(event_id).or_default().push(field.clone());
        Ok(field)
    }

    async fn delete_field(&self, field_id: FieldId) -> Result<(), RepositoryError> {
        for mut entry in self.fields.iter_mut() {
            let fields = entry.value_mut();
            if let Some(pos) = fields.iter().position(|f| f.id == field_id) {
                fields.remove(pos);
                return Ok(());
            }
        }
        Err(RepositoryError::NotFound)
    }
}

/// Registration endpoint that records what it receives.
///
/// Mirrors the backend: one registration per event, free events wait for
/// approval, paid events answer with a payment link.
#[derive(Default)]
pub struct InMemoryRegistrationGateway {
    registrations: DashMap<EventId, RegistrationPayload>,
    payment_links: DashMap<EventId, String>,
}

impl InMemoryRegistrationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `event_id` as a paid event paying through `redirect_url`
    pub fn with_payment(self, event_id: EventId, redirect_url: impl Into<String>) -> Self {
        self.payment_links.insert(event_id, redirect_url.into());
        self
    }

    pub fn submitted(&self, event_id: EventId) -> Option<RegistrationPayload> {
        self.registrations.get(&event_id).map(|p| p.clone())
    }

    pub fn submission_count(&self) -> usize {
        self.registrations.len()
    }
}

#[async_trait]
impl RegistrationGateway for InMemoryRegistrationGateway {
    async fn submit(&self, event_id: EventId, payload: &RegistrationPayload) -> Result<RegistrationOutcome, GatewayError> {
        match self.registrations.entry(event_id) {
            Entry::Occupied(_) => {
                return Err(GatewayError::Rejected {
                    message: "Anda sudah terdaftar di event ini!".into(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(payload.clone());
            }
        }

        let outcome = match self.payment_links.get(&event_id) {
            Some(link) => RegistrationOutcome::AwaitingPayment {
                message: "Pendaftaran berhasil! Silakan selesaikan pembayaran.".into(),
                redirect_url: link.clone(),
                order_id: Some(format!("ORDER-{}-{}", event_id, uuid::Uuid::new_v4().simple())),
            },
            None => RegistrationOutcome::PendingApproval {
                message: "Pendaftaran berhasil! Silakan tunggu konfirmasi dari panitia.".into(),
            },
        };
        Ok(outcome)
    }

    async fn is_registered(&self, event_id: EventId) -> Result<bool, GatewayError> {
        Ok(self.registrations.contains_key(&event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;
    use crate::domain::services::AnswerRecord;

    #[tokio::test]
    async fn test_schema_for_unknown_event_is_empty() {
        let store = InMemoryFormStore::new();
        let schema = store.fetch_schema(EventId::new(1)).await.unwrap();
        assert!(schema.is_empty());
    }

    #[tokio::test]
    async fn test_created_ids_follow_seeded_ids() {
        let store = InMemoryFormStore::new();
        store.insert_field(FormField::new(10, "Nama", FieldType::Text), EventId::new(1));

        let field = store
            .create_field(EventId::new(1), &FieldDraft::new("Kota", FieldType::Text))
            .await
            .unwrap();
        assert_eq!(field.id, FieldId::new(11));
        assert_eq!(field.event_id, EventId::new(1));
        assert_eq!(store.field_count(EventId::new(1)), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_field() {
        let store = InMemoryFormStore::new();
        assert_eq!(
            store.delete_field(FieldId::new(3)).await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_second_registration_is_rejected() {
        let gateway = InMemoryRegistrationGateway::new();
        let payload = RegistrationPayload {
            answers: vec![AnswerRecord { form_field_id: 1, value: "Ya".into() }],
        };

        let first = gateway.submit(EventId::new(2), &payload).await.unwrap();
        assert!(matches!(first, RegistrationOutcome::PendingApproval { .. }));
        assert!(gateway.is_registered(EventId::new(2)).await.unwrap());

        let second = gateway.submit(EventId::new(2), &payload).await;
        assert!(matches!(second, Err(GatewayError::Rejected { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_accept_one() {
        let gateway = std::sync::Arc::new(InMemoryRegistrationGateway::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gateway = gateway.clone();
                tokio::spawn(async move {
                    gateway.submit(EventId::new(5), &RegistrationPayload::default()).await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(gateway.submission_count(), 1);
    }

    #[tokio::test]
    async fn test_paid_event_returns_payment_link() {
        let gateway = InMemoryRegistrationGateway::new()
            .with_payment(EventId::new(4), "https://pay.example/abc");

        let outcome = gateway
            .submit(EventId::new(4), &RegistrationPayload::default())
            .await
            .unwrap();
        match outcome {
            RegistrationOutcome::AwaitingPayment { redirect_url, order_id, .. } => {
                assert_eq!(redirect_url, "https://pay.example/abc");
                assert!(order_id.is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
