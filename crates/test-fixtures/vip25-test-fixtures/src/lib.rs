//! JSON fixtures shared by the core crates' tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

/// Fixture name to path relative to `fixtures/`, per category.
#[derive(Debug, Deserialize)]
struct Manifest {
    pages: HashMap<String, String>,
    forms: HashMap<String, String>,
}

fn load_entry<T: DeserializeOwned>(
    map: &HashMap<String, String>,
    kind: &str,
    name: &str,
) -> Result<T> {
    let rel = map
        .get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))?;
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

/// Page markup: node trees with attributes, classes and layout boxes.
pub mod pages {
    use super::*;

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_entry(&MANIFEST.pages, "page", name)
    }
}

/// Form submissions: field id to raw value, as read from the inputs.
pub mod forms {
    use super::*;

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_entry(&MANIFEST.forms, "form", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_is_valid_json() {
        for name in MANIFEST.pages.keys() {
            pages::load::<serde_json::Value>(name).unwrap();
        }
        for name in MANIFEST.forms.keys() {
            forms::load::<serde_json::Value>(name).unwrap();
        }
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = forms::load::<serde_json::Value>("missing").unwrap_err();
        assert_eq!(err.to_string(), "unknown form fixture 'missing'");
    }
}
