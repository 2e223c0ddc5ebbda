//! Rendering-frame scheduling for deferred reveals.
//!
//! A reveal must not write its transition in the frame that requested it.
//! Each [`PendingReveal`] waits for [`FRAME_BOUNDARIES`] frame boundaries so
//! the hidden styles are committed to at least one paint before the
//! animated styles replace them.

use std::cell::Cell;

use crate::config::RevealConfig;

/// Frame boundaries a reveal waits for before writing its resting styles.
pub const FRAME_BOUNDARIES: u8 = 2;

/// Host hook for "run before the next paint".
pub trait FrameScheduler {
    /// Ask the host to call [`crate::RevealEngine::on_animation_frame`] at the
    /// next rendering-frame boundary.
    fn request_frame(&self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FramePoll {
    Pending,
    Ready,
}

/// A reveal suspended until enough frame boundaries have passed.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingReveal<N> {
    pub node: N,
    pub config: RevealConfig,
    boundaries_seen: u8,
}

impl<N> PendingReveal<N> {
    pub fn new(node: N, config: RevealConfig) -> Self {
        Self {
            node,
            config,
            boundaries_seen: 0,
        }
    }

    pub fn boundaries_seen(&self) -> u8 {
        self.boundaries_seen
    }

    /// Record one frame boundary.
    pub fn on_frame_boundary(&mut self) -> FramePoll {
        self.boundaries_seen = self.boundaries_seen.saturating_add(1);
        if self.boundaries_seen >= FRAME_BOUNDARIES {
            FramePoll::Ready
        } else {
            FramePoll::Pending
        }
    }
}

/// Scheduler that only records requests; the caller drives frames by hand.
#[derive(Debug, Default)]
pub struct RecordingFrames {
    requested: Cell<bool>,
    total: Cell<usize>,
}

impl RecordingFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a frame was requested and clears the flag.
    pub fn take_request(&self) -> bool {
        self.requested.replace(false)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    /// Requests seen over the scheduler's lifetime.
    pub fn total_requests(&self) -> usize {
        self.total.get()
    }
}

impl FrameScheduler for RecordingFrames {
    fn request_frame(&self) {
        self.requested.set(true);
        self.total.set(self.total.get() + 1);
    }
}
