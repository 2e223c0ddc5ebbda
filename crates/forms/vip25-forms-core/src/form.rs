//! Form definitions and whole-form validation.

use std::fmt;

use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::payload::Payload;
use crate::rules::{FieldRule, CAREER_RULES, CLIENT_RULES};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Client,
    Career,
}

impl FormKind {
    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            FormKind::Client => &CLIENT_RULES,
            FormKind::Career => &CAREER_RULES,
        }
    }

    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Client => "clientForm",
            FormKind::Career => "careerForm",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            FormKind::Client => "/api/client",
            FormKind::Career => "/api/career",
        }
    }

    /// Submit button label while the request is in flight.
    pub fn busy_label(self) -> &'static str {
        match self {
            FormKind::Client => "Sending...",
            FormKind::Career => "Submitting...",
        }
    }

    pub fn success_panel_id(self) -> &'static str {
        match self {
            FormKind::Client => "formSuccess",
            FormKind::Career => "careerFormSuccess",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FormKind::Client => {
                "There was an error submitting your request. Please try again later."
            }
            FormKind::Career => {
                "There was an error submitting your application. Please try again later."
            }
        }
    }

    /// Fields whose error clears while the user types. Only the client form
    /// validates live.
    pub fn live_fields(self) -> &'static [FieldRule] {
        match self {
            FormKind::Client => &CLIENT_RULES,
            FormKind::Career => &[],
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormKind::Client => "client",
            FormKind::Career => "career",
        })
    }
}

/// Raw field values keyed by input id. Missing fields read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn trimmed(&self, field: &str) -> String {
        self.get(field).trim().to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Result of one rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldCheck {
    pub rule: FieldRule,
    pub valid: bool,
}

/// Every rule of a form evaluated in declaration order, so the caller can
/// show failing messages and hide passing ones in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub kind: FormKind,
    pub checks: Vec<FieldCheck>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldRule> {
        self.checks.iter().filter(|c| !c.valid).map(|c| &c.rule)
    }

    /// Build the submission payload, refusing if any rule failed.
    pub fn payload(&self, values: &FormValues) -> Result<Payload, FormError> {
        if !self.is_valid() {
            return Err(FormError::Invalid {
                kind: self.kind,
                fields: self.failures().map(|r| r.field).collect(),
            });
        }
        Ok(Payload::from_values(self.kind, values))
    }
}

pub fn validate(kind: FormKind, values: &FormValues) -> ValidationReport {
    let checks = kind
        .rules()
        .iter()
        .map(|rule| FieldCheck {
            rule: *rule,
            valid: rule.rule.is_satisfied(values.get(rule.field)),
        })
        .collect();
    let report = ValidationReport { kind, checks };
    debug!(
        "{kind} form: {} invalid field(s)",
        report.failures().count()
    );
    report
}

/// Live validation: typing anything non-blank hides the field's error.
pub fn clears_error(raw: &str) -> bool {
    !raw.trim().is_empty()
}
