//! Engine settings and the typed per-element reveal configuration.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationType;
use crate::document::{RevealDocument, ATTR_ANIMATE, ATTR_DELAY, ATTR_DURATION};
use crate::observer::ObserverOptions;

pub const BASE_DURATION_MS: u32 = 520;
pub const DEFAULT_STAGGER_MS: u32 = 90;
/// Fast-out ease: quick entry, soft landing.
pub const EASING: &str = "cubic-bezier(0.25, 1, 0.5, 1)";
/// Tighter deceleration for the clip and flip types.
pub const EASING_SHARP: &str = "cubic-bezier(0.16, 1, 0.3, 1)";

/// Global timing and observer settings. Missing fields take the site defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub base_duration_ms: u32,
    pub easing: String,
    pub easing_sharp: String,
    pub default_stagger_ms: u32,
    pub observer: ObserverOptions,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            base_duration_ms: BASE_DURATION_MS,
            easing: EASING.to_string(),
            easing_sharp: EASING_SHARP.to_string(),
            default_stagger_ms: DEFAULT_STAGGER_MS,
            observer: ObserverOptions::default(),
        }
    }
}

impl RevealSettings {
    pub fn easing_for(&self, ty: AnimationType) -> &str {
        if ty.is_structural() {
            &self.easing_sharp
        } else {
            &self.easing
        }
    }
}

/// Reveal parameters of one element, resolved from its attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    pub animation_type: AnimationType,
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl RevealConfig {
    /// Resolve raw attribute values with defaults: fade-up, no delay, the base
    /// duration. A zero duration counts as missing.
    pub fn resolve(
        animation_type: Option<&str>,
        delay: Option<&str>,
        duration: Option<&str>,
        settings: &RevealSettings,
    ) -> Self {
        Self {
            animation_type: AnimationType::resolve(animation_type),
            delay_ms: parse_ms(delay).unwrap_or(0),
            duration_ms: parse_ms(duration)
                .filter(|ms| *ms > 0)
                .unwrap_or(settings.base_duration_ms),
        }
    }

    pub fn from_node<D: RevealDocument>(
        document: &D,
        node: &D::Node,
        settings: &RevealSettings,
    ) -> Self {
        let ty = document.attribute(node, ATTR_ANIMATE);
        let delay = document.attribute(node, ATTR_DELAY);
        let duration = document.attribute(node, ATTR_DURATION);
        Self::resolve(ty.as_deref(), delay.as_deref(), duration.as_deref(), settings)
    }
}

/// Lenient millisecond parse: skips leading whitespace, accepts an optional
/// `+`, then takes the leading decimal digits (`"150ms"` is 150). Negative
/// values, values without digits and values beyond `u32` yield `None`.
pub fn parse_ms(raw: Option<&str>) -> Option<u32> {
    let s = raw?.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}
