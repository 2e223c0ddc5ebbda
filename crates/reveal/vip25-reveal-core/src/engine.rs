//! Reveal engine: owns the hidden/visible state of every registered element.
//!
//! Flow:
//! - `initialize`: legacy class migration, hidden state + registration for
//!   every `[data-animate]` element, then group children with inherited
//!   type/delay.
//! - `handle_intersections`: entering elements get a deferred reveal,
//!   leaving elements snap back to hidden so they replay on re-entry.
//! - `on_animation_frame`: advances deferred reveals; each one writes its
//!   resting styles on its second frame boundary.

use std::cell::{Cell, RefCell};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationType, LEGACY_CLASSES};
use crate::config::{RevealConfig, RevealSettings};
use crate::document::{RevealDocument, ATTR_ANIMATE, ATTR_ANIMATE_CHILDREN};
use crate::frame::{FramePoll, FrameScheduler, PendingReveal};
use crate::group::AnimationGroup;
use crate::observer::{IntersectionEntry, IntersectionService};
use crate::style::{hidden_styles, visible_styles};

/// Style state of a registered element. A pending reveal counts as visible:
/// it is heading toward the resting state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    Hidden,
    Visible,
}

/// Counts gathered by [`RevealEngine::initialize`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReport {
    /// Legacy-class elements that received a `data-animate` value.
    pub migrated: usize,
    /// Elements newly registered with the observer.
    pub registered: usize,
    pub groups: usize,
    /// Group children prepared (including ones already registered).
    pub staggered: usize,
}

#[derive(Debug)]
struct Registered<N> {
    node: N,
    phase: RevealPhase,
}

pub struct RevealEngine<D: RevealDocument, I, F> {
    document: D,
    observer: I,
    frames: F,
    settings: RevealSettings,
    elements: RefCell<Vec<Registered<D::Node>>>,
    pending: RefCell<Vec<PendingReveal<D::Node>>>,
    frame_requested: Cell<bool>,
}

impl<D, I, F> RevealEngine<D, I, F>
where
    D: RevealDocument,
    I: IntersectionService<D::Node>,
    F: FrameScheduler,
{
    pub fn new(document: D, observer: I, frames: F, settings: RevealSettings) -> Self {
        Self {
            document,
            observer,
            frames,
            settings,
            elements: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
            frame_requested: Cell::new(false),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn observer(&self) -> &I {
        &self.observer
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }

    /// Discover annotated elements, hide them and register them with the
    /// observer. Safe to run again: attributes already present are kept and
    /// nodes are registered once.
    pub fn initialize(&self) -> InitReport {
        let mut report = InitReport::default();

        for (class, ty) in LEGACY_CLASSES {
            for node in self.document.elements_with_class(class) {
                if self.document.non_empty_attribute(&node, ATTR_ANIMATE).is_none() {
                    self.document.set_attribute(&node, ATTR_ANIMATE, ty.as_str());
                    report.migrated += 1;
                }
            }
        }

        for node in self.document.elements_with_attribute(ATTR_ANIMATE) {
            if self.prepare(&node) {
                report.registered += 1;
            }
        }

        for parent in self.document.elements_with_attribute(ATTR_ANIMATE_CHILDREN) {
            let group = AnimationGroup::from_node(&self.document, &parent, &self.settings);
            report.groups += 1;
            for (index, child) in self.document.children(&parent).into_iter().enumerate() {
                group.materialize(&self.document, &child, index);
                if self.prepare(&child) {
                    report.registered += 1;
                }
                report.staggered += 1;
            }
        }

        debug!(
            "reveal init: {} migrated, {} registered, {} groups ({} children)",
            report.migrated, report.registered, report.groups, report.staggered
        );
        report
    }

    /// Hide and register; returns `true` if the node was not registered yet.
    fn prepare(&self, node: &D::Node) -> bool {
        let index = self.position(node);
        self.hide(node, index);
        let fresh = index.is_none();
        if fresh {
            self.elements.borrow_mut().push(Registered {
                node: node.clone(),
                phase: RevealPhase::Hidden,
            });
        }
        self.observer.register(node);
        fresh
    }

    /// Index of `node` in the registration list.
    fn position(&self, node: &D::Node) -> Option<usize> {
        self.elements.borrow().iter().position(|r| r.node == *node)
    }

    pub fn is_registered(&self, node: &D::Node) -> bool {
        self.position(node).is_some()
    }

    pub fn registered_count(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn state_of(&self, node: &D::Node) -> Option<RevealPhase> {
        let index = self.position(node)?;
        Some(self.elements.borrow()[index].phase)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Observer callback. Entries for nodes the engine never registered are
    /// ignored. Each entry costs one scan of the registration list.
    pub fn handle_intersections(&self, entries: &[IntersectionEntry<D::Node>]) {
        for entry in entries {
            let Some(index) = self.position(&entry.target) else {
                trace!("ignoring intersection for unregistered node");
                continue;
            };
            if entry.is_intersecting {
                self.show(&entry.target, Some(index));
            } else {
                self.hide(&entry.target, Some(index));
            }
        }
    }

    /// Snap `node` to its type's hidden styles without animation. Drops any
    /// reveal still waiting for its frames.
    pub fn apply_hidden_state(&self, node: &D::Node) {
        self.hide(node, self.position(node));
    }

    /// Start the reveal of `node`. The transition is written two frame
    /// boundaries later, never in the current frame.
    pub fn apply_visible_state(&self, node: &D::Node) {
        self.show(node, self.position(node));
    }

    fn hide(&self, node: &D::Node, index: Option<usize>) {
        let ty = AnimationType::resolve(
            self.document
                .attribute(node, ATTR_ANIMATE)
                .as_deref(),
        );
        self.pending.borrow_mut().retain(|p| p.node != *node);
        self.document.apply_styles(node, &hidden_styles(ty));
        self.set_phase(index, RevealPhase::Hidden);
    }

    fn show(&self, node: &D::Node, index: Option<usize>) {
        let config = RevealConfig::from_node(&self.document, node, &self.settings);
        {
            let mut pending = self.pending.borrow_mut();
            match pending.iter_mut().find(|p| p.node == *node) {
                // keep the frames already waited; refresh the attributes
                Some(existing) => existing.config = config,
                None => pending.push(PendingReveal::new(node.clone(), config)),
            }
        }
        self.set_phase(index, RevealPhase::Visible);
        self.request_frame();
    }

    /// Frame boundary from the host. Returns how many reveals were written.
    pub fn on_animation_frame(&self) -> usize {
        self.frame_requested.set(false);

        let ready: Vec<PendingReveal<D::Node>> = {
            let mut pending = self.pending.borrow_mut();
            let mut ready = Vec::new();
            let mut waiting = Vec::with_capacity(pending.len());
            for mut task in pending.drain(..) {
                match task.on_frame_boundary() {
                    FramePoll::Ready => ready.push(task),
                    FramePoll::Pending => waiting.push(task),
                }
            }
            *pending = waiting;
            ready
        };

        for task in &ready {
            trace!(
                "reveal {} delay={}ms duration={}ms",
                task.config.animation_type,
                task.config.delay_ms,
                task.config.duration_ms
            );
            self.document
                .apply_styles(&task.node, &visible_styles(&task.config, &self.settings));
        }

        if self.pending_count() > 0 {
            self.request_frame();
        }
        ready.len()
    }

    /// Stop observing everything and drop pending reveals.
    pub fn teardown(&self) {
        self.observer.unregister_all();
        self.pending.borrow_mut().clear();
        self.elements.borrow_mut().clear();
        debug!("reveal engine torn down");
    }

    fn request_frame(&self) {
        if !self.frame_requested.replace(true) {
            self.frames.request_frame();
        }
    }

    fn set_phase(&self, index: Option<usize>, phase: RevealPhase) {
        let Some(index) = index else {
            return;
        };
        if let Some(r) = self.elements.borrow_mut().get_mut(index) {
            r.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::frame::RecordingFrames;
    use crate::memory::{MemoryDocument, NodeId};
    use crate::observer::{IntersectionRegistry, ObserverOptions};
    use crate::style::{StyleBatch, StyleProperty};

    type TestEngine =
        RevealEngine<MemoryDocument, IntersectionRegistry<NodeId>, RecordingFrames>;

    fn engine(doc: MemoryDocument) -> TestEngine {
        RevealEngine::new(
            doc,
            IntersectionRegistry::new(ObserverOptions::default()),
            RecordingFrames::new(),
            RevealSettings::default(),
        )
    }

    #[test]
    fn frame_requests_are_coalesced() {
        let mut doc = MemoryDocument::new();
        let a = doc.add_node("a", &[], &[("data-animate", "fade-up")]);
        let b = doc.add_node("b", &[], &[("data-animate", "zoom-in")]);
        let eng = engine(doc);
        eng.initialize();

        eng.apply_visible_state(&a);
        eng.apply_visible_state(&b);
        assert_eq!(eng.frames().total_requests(), 1);

        assert_eq!(eng.on_animation_frame(), 0);
        assert_eq!(eng.frames().total_requests(), 2);
        assert_eq!(eng.on_animation_frame(), 2);
        assert_eq!(eng.frames().total_requests(), 2);
        assert_eq!(eng.pending_count(), 0);
    }

    #[test]
    fn hide_cancels_pending_reveal() {
        let mut doc = MemoryDocument::new();
        let a = doc.add_node("a", &[], &[("data-animate", "fade-up")]);
        let eng = engine(doc);
        eng.initialize();

        eng.apply_visible_state(&a);
        eng.on_animation_frame();
        eng.apply_hidden_state(&a);
        assert_eq!(eng.pending_count(), 0);
        assert_eq!(eng.on_animation_frame(), 0);
        assert_eq!(eng.state_of(&a), Some(RevealPhase::Hidden));
        assert_eq!(
            eng.document().style(a, StyleProperty::Opacity).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn unregistered_entries_are_skipped() {
        let mut doc = MemoryDocument::new();
        let stray = doc.add_node("stray", &[], &[]);
        let eng = engine(doc);
        eng.initialize();
        eng.handle_intersections(&[IntersectionEntry::new(stray, true)]);
        assert_eq!(eng.pending_count(), 0);
        assert!(eng.document().style_log().is_empty());
    }

    /// Node handle whose equality checks are counted, standing in for DOM
    /// handles where every comparison crosses into JS.
    #[derive(Clone, Debug)]
    struct Counted(NodeId, Rc<Cell<usize>>);

    impl PartialEq for Counted {
        fn eq(&self, other: &Self) -> bool {
            self.1.set(self.1.get() + 1);
            self.0 == other.0
        }
    }

    struct CountingDocument {
        inner: MemoryDocument,
        compares: Rc<Cell<usize>>,
    }

    impl CountingDocument {
        fn wrap(&self, ids: Vec<NodeId>) -> Vec<Counted> {
            ids.into_iter()
                .map(|id| Counted(id, self.compares.clone()))
                .collect()
        }
    }

    impl RevealDocument for CountingDocument {
        type Node = Counted;

        fn elements_with_class(&self, class: &str) -> Vec<Counted> {
            self.wrap(self.inner.elements_with_class(class))
        }

        fn elements_with_attribute(&self, name: &str) -> Vec<Counted> {
            self.wrap(self.inner.elements_with_attribute(name))
        }

        fn children(&self, node: &Counted) -> Vec<Counted> {
            self.wrap(self.inner.children(&node.0))
        }

        fn attribute(&self, node: &Counted, name: &str) -> Option<String> {
            self.inner.attribute(&node.0, name)
        }

        fn set_attribute(&self, node: &Counted, name: &str, value: &str) {
            self.inner.set_attribute(&node.0, name, value)
        }

        fn apply_styles(&self, node: &Counted, batch: &StyleBatch) {
            self.inner.apply_styles(&node.0, batch)
        }
    }

    struct Unobserved;

    impl<N> IntersectionService<N> for Unobserved {
        fn register(&self, _node: &N) {}
        fn unregister_all(&self) {}
    }

    #[test]
    fn each_entry_scans_registrations_once() {
        let mut inner = MemoryDocument::new();
        let ids: Vec<NodeId> = (0..20)
            .map(|i| inner.add_node(&format!("n{i}"), &[], &[("data-animate", "fade-up")]))
            .collect();
        let compares = Rc::new(Cell::new(0));
        let doc = CountingDocument {
            inner,
            compares: compares.clone(),
        };
        let eng = RevealEngine::new(doc, Unobserved, RecordingFrames::new(), RevealSettings::default());
        eng.initialize();
        assert_eq!(eng.registered_count(), 20);

        let last = Counted(ids[19], compares.clone());
        compares.set(0);
        eng.handle_intersections(&[IntersectionEntry::new(last.clone(), true)]);
        // 20 to find the node; the pending list was empty
        assert_eq!(compares.get(), 20);

        compares.set(0);
        eng.handle_intersections(&[IntersectionEntry::new(last.clone(), false)]);
        // 20 to find it, 1 to drop its pending reveal
        assert_eq!(compares.get(), 21);
        assert_eq!(eng.pending_count(), 0);

        compares.set(0);
        assert_eq!(eng.state_of(&last), Some(RevealPhase::Hidden));
        assert_eq!(compares.get(), 20);
    }

    #[test]
    fn teardown_clears_observer() {
        let mut doc = MemoryDocument::new();
        doc.add_node("a", &["reveal"], &[]);
        let eng = engine(doc);
        eng.initialize();
        assert_eq!(eng.observer().len(), 1);
        eng.teardown();
        assert!(eng.observer().is_empty());
        assert_eq!(eng.registered_count(), 0);
    }
}
