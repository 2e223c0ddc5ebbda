use thiserror::Error;

use crate::form::FormKind;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{kind} form has invalid fields: {}", fields.join(", "))]
    Invalid {
        kind: FormKind,
        fields: Vec<&'static str>,
    },
    #[error("encode payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("decode response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}
