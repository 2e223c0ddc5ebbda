//! Viewport intersection math following the browser observer model: the root
//! is the viewport grown (or shrunk, for negative values) by a root margin,
//! and the ratio is the visible share of the target's area.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Edge-inclusive intersection; `None` when the rects do not touch.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// One side of a root margin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    fn resolve(self, basis: f64) -> f64 {
        match self {
            MarginLength::Px(px) => px,
            MarginLength::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(v) => write!(f, "{v}px"),
            MarginLength::Percent(v) => write!(f, "{v}%"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MarginParseError {
    #[error("root margin must have 1 to 4 values, got {0}")]
    Arity(usize),
    #[error("invalid root margin length '{0}' (expected px or %)")]
    Length(String),
}

impl FromStr for MarginLength {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || MarginParseError::Length(s.to_string());
        if let Some(num) = s.strip_suffix("px") {
            num.parse().map(MarginLength::Px).map_err(|_| bad())
        } else if let Some(num) = s.strip_suffix('%') {
            num.parse().map(MarginLength::Percent).map_err(|_| bad())
        } else if s.parse::<f64>().map(|v| v == 0.0).unwrap_or(false) {
            Ok(MarginLength::Px(0.0))
        } else {
            Err(bad())
        }
    }
}

/// CSS-style margin shorthand (`top right bottom left`), as accepted by the
/// browser observer's `rootMargin`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: MarginLength::Px(0.0),
        right: MarginLength::Px(0.0),
        bottom: MarginLength::Px(0.0),
        left: MarginLength::Px(0.0),
    };

    /// Only the bottom edge moved, by `px` (negative pulls it up).
    pub fn bottom_px(px: f64) -> Self {
        RootMargin {
            bottom: MarginLength::Px(px),
            ..Self::ZERO
        }
    }

    /// Grow `viewport` by this margin.
    pub fn apply(&self, viewport: &Rect) -> Rect {
        let top = self.top.resolve(viewport.height);
        let right = self.right.resolve(viewport.width);
        let bottom = self.bottom.resolve(viewport.height);
        let left = self.left.resolve(viewport.width);
        Rect::new(
            viewport.x - left,
            viewport.y - top,
            (viewport.width + left + right).max(0.0),
            (viewport.height + top + bottom).max(0.0),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<MarginLength>, _>>()?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [a, b] => (*a, *b, *a, *b),
            [a, b, c] => (*a, *b, *c, *b),
            [a, b, c, d] => (*a, *b, *c, *d),
            other => return Err(MarginParseError::Arity(other.len())),
        };
        Ok(RootMargin {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = MarginParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Share of `target`'s area inside `root`, in `[0, 1]`. A zero-area target
/// counts as fully visible when it touches the root.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    let Some(hit) = target.intersection(root) else {
        return 0.0;
    };
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (hit.area() / area).clamp(0.0, 1.0)
}

/// Whether `target` counts as on screen: it must touch the margin-adjusted
/// viewport and show at least `threshold` of its area.
pub fn is_intersecting(target: &Rect, viewport: &Rect, margin: &RootMargin, threshold: f64) -> bool {
    let root = margin.apply(viewport);
    if target.intersection(&root).is_none() {
        return false;
    }
    intersection_ratio(target, &root) >= threshold
}
