//! REST adapter for the campus backend
//!
//! Every response is a JSON envelope. Successful ones carry `data`, failed
//! ones carry a `message` meant for the user.

use async_trait::async_trait;
use campus_forms::{
    normalize_schema, EventDirectory, EventId, EventSummary, FieldDraft, FieldId, FormAuthoring,
    FormField, FormSchema, FormSchemaProvider, GatewayError, RegistrationGateway,
    RegistrationOutcome, RegistrationPayload, RepositoryError, WireFormField,
};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why a request did not produce a usable body
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    Status { code: StatusCode, message: String },
    Transport(String),
    Decode(String),
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { code, message } => write!(f, "{} ({})", message, code),
            Self::Transport(e) => write!(f, "Request failed: {}", e),
            Self::Decode(e) => write!(f, "Unexpected response: {}", e),
        }
    }
}

impl From<ApiFailure> for RepositoryError {
    fn from(e: ApiFailure) -> Self {
        match e {
            ApiFailure::Status { code: StatusCode::NOT_FOUND, .. } => RepositoryError::NotFound,
            ApiFailure::Status { message, .. } => RepositoryError::QueryError(message),
            ApiFailure::Transport(e) => RepositoryError::ConnectionError(e),
            ApiFailure::Decode(e) => RepositoryError::SerializationError(e),
        }
    }
}

impl From<ApiFailure> for GatewayError {
    fn from(e: ApiFailure) -> Self {
        match e {
            ApiFailure::Status { code: StatusCode::UNAUTHORIZED, .. } => GatewayError::Unauthorized,
            ApiFailure::Status { message, .. } => GatewayError::Rejected { message },
            ApiFailure::Transport(e) => GatewayError::ConnectionError(e),
            ApiFailure::Decode(e) => GatewayError::SerializationError(e),
        }
    }
}

/// API client
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiFailure> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiFailure> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiFailure> {
        self.send(self.client.delete(self.url(path))).await
    }

    async fn send(&self, mut req: RequestBuilder) -> Result<Value, ApiFailure> {
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| ApiFailure::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiFailure::Transport(e.to_string()))?;
        tracing::debug!(%status, bytes = text.len(), "api response");

        if !status.is_success() {
            return Err(ApiFailure::Status {
                code: status,
                message: error_message(status, &text),
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiFailure::Decode(e.to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

/// `data` member of a response envelope
fn data<T: DeserializeOwned>(body: Value) -> Result<T, ApiFailure> {
    let data = body.get("data").cloned().unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|e| ApiFailure::Decode(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    is_free: bool,
    #[serde(default)]
    payment: Option<PaymentLink>,
    #[serde(default)]
    payment_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentLink {
    redirect_url: String,
    #[serde(default)]
    order_id: Option<String>,
}

impl From<RegisterResponse> for RegistrationOutcome {
    fn from(resp: RegisterResponse) -> Self {
        if resp.is_free {
            return RegistrationOutcome::PendingApproval { message: resp.message };
        }
        match resp.payment {
            Some(link) => RegistrationOutcome::AwaitingPayment {
                message: resp.message,
                redirect_url: link.redirect_url,
                order_id: link.order_id,
            },
            None => {
                if let Some(e) = &resp.payment_error {
                    tracing::warn!(error = %e, "payment link could not be created");
                }
                RegistrationOutcome::PaymentUnavailable { message: resp.message }
            }
        }
    }
}

#[async_trait]
impl FormSchemaProvider for ApiClient {
    async fn fetch_schema(&self, event_id: EventId) -> Result<FormSchema, RepositoryError> {
        let body = self.get(&format!("/forms/event/{}", event_id)).await?;
        let fields: Option<Vec<WireFormField>> = data(body)?;

        normalize_schema(event_id, fields.unwrap_or_default())
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl EventDirectory for ApiClient {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<EventSummary>, RepositoryError> {
        match self.get(&format!("/events/slug/{}", slug)).await {
            Ok(body) => Ok(Some(data(body)?)),
            Err(ApiFailure::Status { code: StatusCode::NOT_FOUND, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FormAuthoring for ApiClient {
    async fn create_field(&self, event_id: EventId, draft: &FieldDraft) -> Result<FormField, RepositoryError> {
        let body = self.post(&format!("/forms/event/{}", event_id), draft).await?;
        let wire: WireFormField = data(body)?;

        wire.normalize()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }

    async fn delete_field(&self, field_id: FieldId) -> Result<(), RepositoryError> {
        self.delete(&format!("/form-fields/{}", field_id)).await?;
        Ok(())
    }
}

#[async_trait]
impl RegistrationGateway for ApiClient {
    async fn submit(&self, event_id: EventId, payload: &RegistrationPayload) -> Result<RegistrationOutcome, GatewayError> {
        let body = self
            .post(&format!("/participant/event/{}/register", event_id), payload)
            .await?;
        let resp: RegisterResponse = serde_json::from_value(body)
            .map_err(|e| GatewayError::SerializationError(e.to_string()))?;
        Ok(resp.into())
    }

    async fn is_registered(&self, event_id: EventId) -> Result<bool, GatewayError> {
        let body = self
            .get(&format!("/registration-status/event/{}", event_id))
            .await?;
        Ok(body.get("registered").and_then(Value::as_bool).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(body: Value) -> RegistrationOutcome {
        serde_json::from_value::<RegisterResponse>(body).unwrap().into()
    }

    #[test]
    fn test_free_event_outcome() {
        let result = outcome(serde_json::json!({
            "success": true,
            "message": "Pendaftaran berhasil! Silakan tunggu konfirmasi dari panitia.",
            "is_free": true
        }));
        assert!(matches!(result, RegistrationOutcome::PendingApproval { .. }));
    }

    #[test]
    fn test_paid_event_outcomes() {
        let result = outcome(serde_json::json!({
            "message": "Pendaftaran berhasil! Silakan selesaikan pembayaran.",
            "is_free": false,
            "payment": {"token": "t", "redirect_url": "https://pay.example/t", "order_id": "ORDER-1"}
        }));
        assert_eq!(
            result,
            RegistrationOutcome::AwaitingPayment {
                message: "Pendaftaran berhasil! Silakan selesaikan pembayaran.".into(),
                redirect_url: "https://pay.example/t".into(),
                order_id: Some("ORDER-1".into()),
            }
        );

        let result = outcome(serde_json::json!({
            "message": "Pendaftaran berhasil, namun gagal membuat link pembayaran.",
            "is_free": false,
            "payment_error": "midtrans down"
        }));
        assert!(matches!(result, RegistrationOutcome::PaymentUnavailable { .. }));
    }

    #[test]
    fn test_missing_is_free_is_paid() {
        let result = outcome(serde_json::json!({
            "message": "Pendaftaran berhasil, namun gagal menyimpan data pembayaran.",
            "success": true
        }));
        assert!(matches!(result, RegistrationOutcome::PaymentUnavailable { .. }));
    }

    #[test]
    fn test_error_message_from_body() {
        let message = error_message(StatusCode::CONFLICT, r#"{"message":"Anda sudah terdaftar di event ini!"}"#);
        assert_eq!(message, "Anda sudah terdaftar di event ini!");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), "Bad Gateway");
    }

    #[test]
    fn test_failure_mapping() {
        let conflict = ApiFailure::Status { code: StatusCode::CONFLICT, message: "sudah".into() };
        assert_eq!(GatewayError::from(conflict), GatewayError::Rejected { message: "sudah".into() });

        let missing = ApiFailure::Status { code: StatusCode::NOT_FOUND, message: "x".into() };
        assert_eq!(RepositoryError::from(missing), RepositoryError::NotFound);
    }

    #[test]
    fn test_envelope_data() {
        let fields: Option<Vec<WireFormField>> = data(serde_json::json!({"success": true, "data": null})).unwrap();
        assert!(fields.is_none());
    }
}
