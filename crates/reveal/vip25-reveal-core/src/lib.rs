//! VIP25 Reveal Core (host-agnostic)
//!
//! Scroll-triggered reveal animations driven by markup attributes. The engine
//! reads `data-animate` / `data-delay` / `data-duration` annotations, snaps
//! elements to a per-type hidden style, and animates them to their resting
//! style when a shared intersection observer reports them on screen.
//!
//! The browser is reached only through three collaborator traits
//! ([`RevealDocument`], [`IntersectionService`], [`FrameScheduler`]); the
//! wasm adapter implements them with `web-sys`, and [`memory`] provides an
//! in-memory host for headless use and tests.

pub mod animation;
pub mod config;
pub mod document;
pub mod engine;
pub mod frame;
pub mod geometry;
pub mod group;
pub mod memory;
pub mod observer;
pub mod style;

pub use animation::{AnimationType, HiddenState, LEGACY_CLASSES};
pub use config::{parse_ms, RevealConfig, RevealSettings};
pub use document::RevealDocument;
pub use engine::{InitReport, RevealEngine, RevealPhase};
pub use frame::{FramePoll, FrameScheduler, PendingReveal, RecordingFrames, FRAME_BOUNDARIES};
pub use geometry::{intersection_ratio, is_intersecting, MarginLength, MarginParseError, Rect, RootMargin};
pub use group::AnimationGroup;
pub use memory::{MemoryDocument, NodeId};
pub use observer::{IntersectionEntry, IntersectionRegistry, IntersectionService, ObserverOptions};
pub use style::{hidden_styles, visible_styles, StyleBatch, StyleProperty};
