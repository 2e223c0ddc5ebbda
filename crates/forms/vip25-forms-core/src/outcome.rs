//! Interpretation of the backend's reply to a submission.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::FormError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// 2xx with the decoded JSON body.
    Accepted(JsonValue),
    /// Any other status. `message` is the body's `error` field when present.
    Rejected { status: u16, message: Option<String> },
}

impl SubmitOutcome {
    pub fn from_status(status: u16, body: JsonValue) -> Self {
        if (200..300).contains(&status) {
            return SubmitOutcome::Accepted(body);
        }
        let message = body
            .get("error")
            .and_then(JsonValue::as_str)
            .map(str::to_string);
        SubmitOutcome::Rejected { status, message }
    }

    /// Decode a raw body. A successful status must carry JSON; a failed one
    /// may carry anything.
    pub fn from_response(status: u16, body: &str) -> Result<Self, FormError> {
        match serde_json::from_str::<JsonValue>(body) {
            Ok(json) => Ok(Self::from_status(status, json)),
            Err(source) if (200..300).contains(&status) => {
                Err(FormError::Decode { status, source })
            }
            Err(_) => Ok(Self::from_status(status, JsonValue::Null)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn two_hundreds_are_accepted() {
        let out = SubmitOutcome::from_status(201, json!({ "message": "Form submitted successfully" }));
        assert!(out.is_success());
    }

    #[test]
    fn error_field_is_surfaced() {
        let out = SubmitOutcome::from_status(400, json!({ "error": "Database connection not configured." }));
        assert_eq!(
            out,
            SubmitOutcome::Rejected {
                status: 400,
                message: Some("Database connection not configured.".into()),
            }
        );
    }

    #[test]
    fn non_json_bodies() {
        let out = SubmitOutcome::from_response(429, "Too Many Requests").unwrap();
        assert_eq!(
            out,
            SubmitOutcome::Rejected {
                status: 429,
                message: None
            }
        );
        let err = SubmitOutcome::from_response(200, "<html>").unwrap_err();
        assert!(matches!(err, FormError::Decode { status: 200, .. }));
    }
}
