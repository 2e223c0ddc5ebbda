//! Inline style batches for the hidden and visible states.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationType;
use crate::config::{RevealConfig, RevealSettings};

pub const NEUTRAL_TRANSFORM: &str =
    "translateY(0) translateX(0) scale(1) perspective(500px) rotateX(0deg)";
pub const NEUTRAL_FILTER: &str = "blur(0)";
pub const REVEALED_CLIP: &str = "inset(0% 0 0 0)";
pub const COMPOSITING_HINT: &str = "transform, opacity";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Transition,
    Opacity,
    Transform,
    Filter,
    ClipPath,
    WillChange,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Transition => "transition",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Transform => "transform",
            StyleProperty::Filter => "filter",
            StyleProperty::ClipPath => "clip-path",
            StyleProperty::WillChange => "will-change",
        }
    }
}

/// Ordered list of inline style writes applied together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBatch {
    writes: Vec<(StyleProperty, String)>,
}

impl StyleBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) -> &mut Self {
        self.writes.push((property, value.into()));
        self
    }

    /// Last value written for `property`, if any.
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find_map(|(p, v)| (*p == property).then_some(v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.writes.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Instant snap to the type's hidden state. `transition: none` comes first so
/// the snap itself is not animated.
pub fn hidden_styles(ty: AnimationType) -> StyleBatch {
    let state = ty.hidden_state();
    let mut batch = StyleBatch::new();
    batch
        .set(StyleProperty::Transition, "none")
        .set(StyleProperty::Opacity, state.opacity)
        .set(StyleProperty::Transform, state.transform)
        .set(StyleProperty::Filter, state.filter)
        .set(StyleProperty::ClipPath, state.clip_path)
        .set(StyleProperty::WillChange, COMPOSITING_HINT);
    batch
}

/// Transition plus resting values. Clip-up only animates its clip-path; the
/// other types reset transform and filter to neutral.
pub fn visible_styles(config: &RevealConfig, settings: &RevealSettings) -> StyleBatch {
    let ty = config.animation_type;
    let transition = format!(
        "{} {}ms {} {}ms",
        ty.transition_properties(),
        config.duration_ms,
        settings.easing_for(ty),
        config.delay_ms
    );

    let mut batch = StyleBatch::new();
    batch
        .set(StyleProperty::Transition, transition)
        .set(StyleProperty::Opacity, "1");
    if ty == AnimationType::ClipUp {
        batch.set(StyleProperty::ClipPath, REVEALED_CLIP);
    } else {
        batch
            .set(StyleProperty::Transform, NEUTRAL_TRANSFORM)
            .set(StyleProperty::Filter, NEUTRAL_FILTER)
            .set(StyleProperty::ClipPath, "");
    }
    batch
}
