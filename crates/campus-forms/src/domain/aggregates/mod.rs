//! Aggregates module

pub mod form_schema;
pub mod session;

pub use form_schema::{FieldDraft, FormField, FormSchema};
pub use session::RegistrationSession;
