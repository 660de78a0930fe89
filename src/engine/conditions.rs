//! Node conditions - ordered sets of unique string tags.
//!
//! Used as the active state of an element (`mouseover`, `click`, `checked`, ...)
//! and as the `show_on` / `hide_on` predicates of every node.

/// Condition that makes a node visible (`show_on`) or hidden (`hide_on`) unconditionally.
pub const CONDITION_ALWAYS: &str = "always";

/// Active while the pointer moves over an element.
pub const CONDITION_MOUSEOVER: &str = "mouseover";

/// Active while a pointer press lands on an element.
pub const CONDITION_CLICK: &str = "click";

/// Ordered set of unique condition tags.
///
/// Adding an existing tag moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConditions {
    conditions: Vec<String>,
}

impl NodeConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated tag list. Blank entries are skipped.
    pub fn parse(list: &str) -> Self {
        let mut conditions = Self::new();
        for tag in list.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
            conditions.add(tag);
        }
        conditions
    }

    /// Add a tag, moving it to the end if already present.
    pub fn add(&mut self, condition: &str) {
        self.remove(condition);
        self.conditions.push(condition.to_string());
    }

    /// Remove a tag. Returns true if it was present.
    pub fn remove(&mut self, condition: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c != condition);
        self.conditions.len() != before
    }

    pub fn remove_all(&mut self) {
        self.conditions.clear();
    }

    pub fn contains(&self, condition: &str) -> bool {
        self.conditions.iter().any(|c| c == condition)
    }

    /// True if any tag of `self` is also in `other`.
    pub fn intersects(&self, other: &NodeConditions) -> bool {
        self.conditions.iter().any(|c| other.contains(c))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for NodeConditions {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut conditions = Self::new();
        for tag in iter {
            conditions.add(tag);
        }
        conditions
    }
}
