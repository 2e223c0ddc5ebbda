//! JSON bodies posted to the backend.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::form::{FormKind, FormValues};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPayload {
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub skills: String,
    pub portfolio: String,
    pub linkedin: String,
    pub github: String,
    pub project1: String,
    pub project2: String,
    pub project3: String,
    pub message: String,
    pub availability: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Client(ClientPayload),
    Career(CareerPayload),
}

impl Payload {
    /// Text inputs are trimmed; select values and the skills list are sent as-is.
    pub fn from_values(kind: FormKind, v: &FormValues) -> Self {
        match kind {
            FormKind::Client => Payload::Client(ClientPayload {
                name: v.trimmed("cf-name"),
                email: v.trimmed("cf-email"),
                phone: v.trimmed("cf-phone"),
                service: v.get("cf-service").to_string(),
                message: v.trimmed("cf-message"),
            }),
            FormKind::Career => Payload::Career(CareerPayload {
                fullname: v.trimmed("ca-name"),
                email: v.trimmed("ca-email"),
                phone: v.trimmed("ca-phone"),
                experience: v.get("ca-experience").to_string(),
                skills: v.get("ca-skills").to_string(),
                portfolio: v.trimmed("ca-portfolio"),
                linkedin: v.trimmed("ca-linkedin"),
                github: v.trimmed("ca-github"),
                project1: v.trimmed("ca-project1"),
                project2: v.trimmed("ca-project2"),
                project3: v.trimmed("ca-project3"),
                message: v.trimmed("ca-message"),
                availability: v.get("ca-availability").to_string(),
            }),
        }
    }

    pub fn kind(&self) -> FormKind {
        match self {
            Payload::Client(_) => FormKind::Client,
            Payload::Career(_) => FormKind::Career,
        }
    }

    pub fn to_json(&self) -> Result<String, FormError> {
        serde_json::to_string(self).map_err(FormError::Encode)
    }
}
