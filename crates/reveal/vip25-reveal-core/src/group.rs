//! Stagger groups: a parent whose direct children inherit a type and receive
//! ascending delays.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationType;
use crate::config::{parse_ms, RevealSettings};
use crate::document::{RevealDocument, ATTR_ANIMATE, ATTR_ANIMATE_CHILDREN, ATTR_DELAY, ATTR_STAGGER};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationGroup {
    pub child_type: AnimationType,
    pub stagger_ms: u32,
}

impl AnimationGroup {
    pub fn resolve(child_type: Option<&str>, stagger: Option<&str>, settings: &RevealSettings) -> Self {
        Self {
            child_type: AnimationType::resolve(child_type),
            stagger_ms: parse_ms(stagger).unwrap_or(settings.default_stagger_ms),
        }
    }

    pub fn from_node<D: RevealDocument>(
        document: &D,
        parent: &D::Node,
        settings: &RevealSettings,
    ) -> Self {
        let ty = document.attribute(parent, ATTR_ANIMATE_CHILDREN);
        let stagger = document.attribute(parent, ATTR_STAGGER);
        Self::resolve(ty.as_deref(), stagger.as_deref(), settings)
    }

    pub fn delay_for(&self, index: usize) -> u32 {
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.stagger_ms)
    }

    /// Write the inherited type and delay onto `child` where it has none of
    /// its own. Returns how many attributes were written.
    pub fn materialize<D: RevealDocument>(&self, document: &D, child: &D::Node, index: usize) -> usize {
        let mut written = 0;
        if document.non_empty_attribute(child, ATTR_ANIMATE).is_none() {
            document.set_attribute(child, ATTR_ANIMATE, self.child_type.as_str());
            written += 1;
        }
        if document.non_empty_attribute(child, ATTR_DELAY).is_none() {
            document.set_attribute(child, ATTR_DELAY, &self.delay_for(index).to_string());
            written += 1;
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_defaults_to_settings() {
        let settings = RevealSettings::default();
        let group = AnimationGroup::resolve(Some("zoom-in"), None, &settings);
        assert_eq!(group.child_type, AnimationType::ZoomIn);
        assert_eq!(group.stagger_ms, 90);
        assert_eq!(group.delay_for(0), 0);
        assert_eq!(group.delay_for(3), 270);

        let group = AnimationGroup::resolve(Some("nope"), Some("x"), &settings);
        assert_eq!(group.child_type, AnimationType::FadeUp);
        assert_eq!(group.stagger_ms, 90);

        let group = AnimationGroup::resolve(None, Some("0"), &settings);
        assert_eq!(group.delay_for(5), 0);
    }

    #[test]
    fn delay_saturates() {
        let group = AnimationGroup {
            child_type: AnimationType::FadeUp,
            stagger_ms: u32::MAX,
        };
        assert_eq!(group.delay_for(2), u32::MAX);
    }
}
