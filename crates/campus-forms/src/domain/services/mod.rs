//! Domain services
//!
//! Pure rules over a field list and an answer set. None of them hold state;
//! `RegistrationSession` strings them together.

pub mod visibility;
pub mod validation;
pub mod cascade;
pub mod payload;
pub mod window;

pub use visibility::{is_visible, visible_fields};
pub use validation::{validate, validate_visible, ValidationErrors};
pub use cascade::apply_answer;
pub use payload::{build_payload, AnswerRecord, RegistrationPayload};
pub use window::RegistrationWindow;
