//! VIP25 Forms Core
//!
//! Validation rules for the client-service and career forms, the JSON
//! payloads posted to the backend, the career form's skill-tag set, and the
//! interpretation of the backend's reply. Nothing here touches the DOM; the
//! wasm adapter reads field values into [`FormValues`] and renders the
//! resulting [`ValidationReport`].

pub mod error;
pub mod form;
pub mod outcome;
pub mod payload;
pub mod rules;
pub mod skills;

pub use error::FormError;
pub use form::{clears_error, validate, FieldCheck, FormKind, FormValues, ValidationReport};
pub use outcome::SubmitOutcome;
pub use payload::{CareerPayload, ClientPayload, Payload};
pub use rules::{is_valid_email, FieldRule, Rule, CAREER_RULES, CLIENT_RULES};
pub use skills::SkillSet;
