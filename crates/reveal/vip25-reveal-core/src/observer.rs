//! The shared viewport-intersection service.
//!
//! One service instance exists per page. Elements are registered during
//! initialization and stay registered until [`IntersectionService::unregister_all`].
//! The host delivers visibility changes to the engine in batches of
//! [`IntersectionEntry`].

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::geometry::{intersection_ratio, is_intersecting, Rect, RootMargin};

/// Area share that counts as visible.
pub const DEFAULT_THRESHOLD: f64 = 0.08;
/// The reveal fires 60px before the element reaches the literal bottom edge.
pub const DEFAULT_BOTTOM_MARGIN_PX: f64 = -60.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::bottom_px(DEFAULT_BOTTOM_MARGIN_PX),
        }
    }
}

impl ObserverOptions {
    pub fn is_intersecting(&self, target: &Rect, viewport: &Rect) -> bool {
        is_intersecting(target, viewport, &self.root_margin, self.threshold)
    }
}

/// Visibility report for one registered element.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl<N> IntersectionEntry<N> {
    pub fn new(target: N, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }
}

/// Process-wide observer the engine registers elements with.
pub trait IntersectionService<N> {
    /// Start watching `node`. Registering the same node twice is a no-op.
    fn register(&self, node: &N);
    /// Stop watching every node.
    fn unregister_all(&self);
}

#[derive(Debug)]
struct Tracked<N> {
    node: N,
    /// Last reported state; `None` until the first evaluation.
    last: Option<bool>,
}

/// In-process observer that evaluates layout boxes against a viewport.
///
/// [`IntersectionRegistry::evaluate`] plays the role of the browser's
/// notification pass: it reports every newly registered node once, then only
/// nodes whose state flipped.
#[derive(Debug)]
pub struct IntersectionRegistry<N> {
    options: ObserverOptions,
    tracked: RefCell<Vec<Tracked<N>>>,
}

impl<N: Clone + PartialEq> IntersectionRegistry<N> {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            tracked: RefCell::new(Vec::new()),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.tracked.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.borrow().is_empty()
    }

    pub fn is_registered(&self, node: &N) -> bool {
        self.tracked.borrow().iter().any(|t| t.node == *node)
    }

    /// Compute the next batch. `layout` returns the node's box in viewport
    /// coordinates; nodes without a box are treated as off screen.
    pub fn evaluate<L>(&self, viewport: Rect, layout: L) -> Vec<IntersectionEntry<N>>
    where
        L: Fn(&N) -> Option<Rect>,
    {
        let root = self.options.root_margin.apply(&viewport);
        let mut batch = Vec::new();
        for tracked in self.tracked.borrow_mut().iter_mut() {
            let (now, ratio) = match layout(&tracked.node) {
                Some(rect) => (
                    self.options.is_intersecting(&rect, &viewport),
                    intersection_ratio(&rect, &root),
                ),
                None => (false, 0.0),
            };
            if tracked.last != Some(now) {
                tracked.last = Some(now);
                batch.push(IntersectionEntry {
                    target: tracked.node.clone(),
                    is_intersecting: now,
                    intersection_ratio: ratio,
                });
            }
        }
        batch
    }
}

impl<N: Clone + PartialEq> IntersectionService<N> for IntersectionRegistry<N> {
    fn register(&self, node: &N) {
        if self.is_registered(node) {
            return;
        }
        self.tracked.borrow_mut().push(Tracked {
            node: node.clone(),
            last: None,
        });
    }

    fn unregister_all(&self) {
        self.tracked.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn default_options() {
        let opts = ObserverOptions::default();
        assert_eq!(opts.threshold, 0.08);
        assert_eq!(opts.root_margin.to_string(), "0px 0px -60px 0px");
    }

    #[test]
    fn options_round_trip_through_json() {
        let opts: ObserverOptions =
            serde_json::from_str(r#"{ "threshold": 0.2, "root_margin": "0px 0px -10px 0px" }"#)
                .unwrap();
        assert_eq!(opts.threshold, 0.2);
        assert_eq!(opts.root_margin, RootMargin::bottom_px(-10.0));
        let json = serde_json::to_value(opts).unwrap();
        assert_eq!(json["root_margin"], "0px 0px -10px 0px");
    }

    #[test]
    fn register_is_idempotent() {
        let reg = IntersectionRegistry::new(ObserverOptions::default());
        reg.register(&1u32);
        reg.register(&1u32);
        reg.register(&2u32);
        assert_eq!(reg.len(), 2);
        reg.unregister_all();
        assert!(reg.is_empty());
    }

    #[test]
    fn first_pass_reports_everything_then_only_changes() {
        let reg = IntersectionRegistry::new(ObserverOptions::default());
        reg.register(&"top");
        reg.register(&"below");
        let layout = |y: f64| Rect::new(0.0, y, 100.0, 100.0);

        let batch = reg.evaluate(viewport(), |n| {
            Some(if *n == "top" { layout(0.0) } else { layout(2000.0) })
        });
        assert_eq!(batch.len(), 2);
        assert!(batch[0].is_intersecting);
        assert!(!batch[1].is_intersecting);

        let batch = reg.evaluate(viewport(), |n| {
            Some(if *n == "top" { layout(0.0) } else { layout(2000.0) })
        });
        assert!(batch.is_empty());

        // scroll: "below" comes into view, "top" leaves
        let batch = reg.evaluate(viewport(), |n| {
            Some(if *n == "top" { layout(-500.0) } else { layout(300.0) })
        });
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].target, "top");
        assert!(!batch[0].is_intersecting);
        assert_eq!(batch[1].target, "below");
        assert!(batch[1].is_intersecting);
        assert_eq!(batch[1].intersection_ratio, 1.0);
    }

    #[test]
    fn missing_layout_is_off_screen() {
        let reg = IntersectionRegistry::new(ObserverOptions::default());
        reg.register(&7u8);
        let batch = reg.evaluate(viewport(), |_| None);
        assert_eq!(batch, vec![IntersectionEntry::new(7u8, false)]);
    }
}
