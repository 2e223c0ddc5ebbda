//! Skill-tag picker state for the career form.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Selected skills in first-selection order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    selected: IndexSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `skill` in or out. Returns `true` if it is now selected.
    pub fn toggle(&mut self, skill: &str) -> bool {
        if self.selected.shift_remove(skill) {
            false
        } else {
            self.selected.insert(skill.to_string());
            true
        }
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.selected.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Value written to the hidden skills input.
    pub fn as_input_value(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }
}
