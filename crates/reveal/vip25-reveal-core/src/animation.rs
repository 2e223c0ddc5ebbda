//! Animation types and their hidden (pre-animation) style definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reveal animation selected by the `data-animate` attribute.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationType {
    /// Translates 36px up while fading in.
    #[default]
    FadeUp,
    FadeLeft,
    FadeRight,
    ZoomIn,
    /// Fades in while a blur dissolves, with a small upward drift.
    BlurIn,
    ScaleFade,
    /// Clip-path wipe from the bottom up. Opacity stays at 1.
    ClipUp,
    /// 3D perspective tilt combined with an upward slide.
    FlipUp,
}

/// Pre-animation style snapshot for one animation type.
///
/// Empty strings clear the inline property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HiddenState {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub filter: &'static str,
    pub clip_path: &'static str,
}

const HIDDEN_STATES: [HiddenState; 8] = [
    // fade-up
    HiddenState {
        opacity: "0",
        transform: "translateY(36px)",
        filter: "",
        clip_path: "",
    },
    // fade-left
    HiddenState {
        opacity: "0",
        transform: "translateX(-44px)",
        filter: "",
        clip_path: "",
    },
    // fade-right
    HiddenState {
        opacity: "0",
        transform: "translateX(44px)",
        filter: "",
        clip_path: "",
    },
    // zoom-in
    HiddenState {
        opacity: "0",
        transform: "scale(0.94)",
        filter: "",
        clip_path: "",
    },
    // blur-in
    HiddenState {
        opacity: "0",
        transform: "translateY(10px)",
        filter: "blur(8px)",
        clip_path: "",
    },
    // scale-fade
    HiddenState {
        opacity: "0",
        transform: "scale(1.06)",
        filter: "",
        clip_path: "",
    },
    // clip-up
    HiddenState {
        opacity: "1",
        transform: "",
        filter: "",
        clip_path: "inset(100% 0 0 0)",
    },
    // flip-up
    HiddenState {
        opacity: "0",
        transform: "perspective(500px) rotateX(14deg) translateY(28px)",
        filter: "",
        clip_path: "",
    },
];

/// Legacy reveal classes and the type each one maps to, in migration order.
pub const LEGACY_CLASSES: [(&str, AnimationType); 3] = [
    ("reveal", AnimationType::FadeUp),
    ("reveal-left", AnimationType::FadeLeft),
    ("reveal-right", AnimationType::FadeRight),
];

impl AnimationType {
    pub const ALL: [AnimationType; 8] = [
        AnimationType::FadeUp,
        AnimationType::FadeLeft,
        AnimationType::FadeRight,
        AnimationType::ZoomIn,
        AnimationType::BlurIn,
        AnimationType::ScaleFade,
        AnimationType::ClipUp,
        AnimationType::FlipUp,
    ];

    /// Parse an attribute value. Matching is exact; unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == raw)
    }

    /// Resolve an optional attribute value, falling back to fade-up when the
    /// value is absent, empty or unrecognized.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationType::FadeUp => "fade-up",
            AnimationType::FadeLeft => "fade-left",
            AnimationType::FadeRight => "fade-right",
            AnimationType::ZoomIn => "zoom-in",
            AnimationType::BlurIn => "blur-in",
            AnimationType::ScaleFade => "scale-fade",
            AnimationType::ClipUp => "clip-up",
            AnimationType::FlipUp => "flip-up",
        }
    }

    pub fn hidden_state(self) -> &'static HiddenState {
        &HIDDEN_STATES[self as usize]
    }

    /// CSS properties listed in the reveal transition. Only the properties
    /// the type actually animates are included.
    pub fn transition_properties(self) -> &'static str {
        match self {
            AnimationType::BlurIn => "opacity, transform, filter",
            AnimationType::ClipUp => "clip-path",
            _ => "opacity, transform",
        }
    }

    /// Clip wipe and 3D flip use the sharper deceleration curve.
    pub fn is_structural(self) -> bool {
        matches!(self, AnimationType::ClipUp | AnimationType::FlipUp)
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
