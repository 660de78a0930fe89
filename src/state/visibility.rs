//! Visibility Module - show-on / hide-on condition evaluation
//!
//! Every node carries `show_on` and `hide_on` tag sets. They are evaluated
//! against the active conditions of the nearest ancestor element:
//!
//! 1. `show_on` contains `always` - visible
//! 2. `hide_on` contains `always` - hidden
//! 3. no ancestor element - visible
//! 4. any `hide_on` tag active - hidden
//! 5. any `show_on` tag active - visible
//! 6. otherwise visible only if `show_on` is empty
//!
//! Results are cached per node (`conditions_met`). Changing an element's
//! active conditions marks the cache dirty; layout, render, and dispatch
//! refresh it top-down before they run.
//!
//! # API
//!
//! - `evaluate_conditions` - The six-step rule, as a pure function
//! - `Screen::refresh_conditions` - Recompute pending visibility
//! - `Screen::add_active_condition` / `remove_active_condition` - Toggle element state
//! - `Screen::is_visible` - Cached result

use tracing::trace;

use crate::engine::{CONDITION_ALWAYS, NodeConditions, NodeId, NodeKind, Screen};

/// Decide visibility from a node's predicates and its nearest ancestor
/// element's active conditions (`None` if there is no ancestor element).
pub fn evaluate_conditions(
    show_on: &NodeConditions,
    hide_on: &NodeConditions,
    element_conditions: Option<&NodeConditions>,
) -> bool {
    if show_on.contains(CONDITION_ALWAYS) {
        return true;
    }
    if hide_on.contains(CONDITION_ALWAYS) {
        return false;
    }
    let Some(active) = element_conditions else {
        return true;
    };
    if hide_on.intersects(active) {
        return false;
    }
    if show_on.intersects(active) {
        return true;
    }
    show_on.is_empty()
}

impl Screen {
    /// Recompute `conditions_met` for the whole tree if anything changed.
    pub fn refresh_conditions(&mut self) {
        if !self.conditions_dirty {
            return;
        }
        self.conditions_dirty = false;
        trace!(screen = %self.id(), "refresh conditions");

        // Tree order visits ancestors before descendants; each entry carries
        // the nearest strict ancestor element.
        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(self.root, None)];
        while let Some((id, element)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            let active = element
                .and_then(|element| self.node(element))
                .and_then(|element| element.active_conditions());
            let met = evaluate_conditions(&node.show_on, &node.hide_on, active);
            let next_element = match node.kind {
                NodeKind::Element { .. } => Some(id),
                _ => element,
            };
            let children: Vec<(NodeId, Option<NodeId>)> = node
                .children
                .iter()
                .rev()
                .map(|child| (*child, next_element))
                .collect();
            if let Some(node) = self.node_mut(id) {
                node.conditions_met = met;
            }
            stack.extend(children);
        }
    }

    /// Force re-evaluation before the next layout, render, or event pass.
    pub fn invalidate_conditions(&mut self) {
        self.conditions_dirty = true;
    }

    /// Cached visibility of `node`. Unknown nodes are not visible.
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.conditions_met)
    }

    /// Add an active condition to an element. No-op for other node kinds.
    pub fn add_active_condition(&mut self, element: NodeId, condition: &str) {
        if let Some(NodeKind::Element {
            active_conditions, ..
        }) = self.node_mut(element).map(|n| &mut n.kind)
        {
            active_conditions.add(condition);
            self.conditions_dirty = true;
        }
    }

    /// Remove an active condition from an element. No-op for other node kinds.
    pub fn remove_active_condition(&mut self, element: NodeId, condition: &str) {
        if let Some(NodeKind::Element {
            active_conditions, ..
        }) = self.node_mut(element).map(|n| &mut n.kind)
        {
            if active_conditions.remove(condition) {
                self.conditions_dirty = true;
            }
        }
    }

    /// True if `element` currently has `condition` active.
    pub fn has_active_condition(&self, element: NodeId, condition: &str) -> bool {
        self.node(element)
            .and_then(|n| n.active_conditions())
            .is_some_and(|conditions| conditions.contains(condition))
    }

    /// Nearest strict ancestor that is an element.
    pub fn nearest_element_ancestor(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node).into_iter().find(|id| {
            self.node(*id)
                .is_some_and(|n| matches!(n.kind, NodeKind::Element { .. }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeDesc;
    use crate::types::Arrangement;

    fn conditions(list: &str) -> NodeConditions {
        NodeConditions::parse(list)
    }

    fn setup() -> (Screen, NodeId) {
        let mut screen = Screen::new("screen");
        let root = screen.root();
        let element = screen
            .add_sub_node(root, NodeDesc::element("button", "button"))
            .unwrap();
        (screen, element)
    }

    #[test]
    fn test_show_always_wins_over_hide_always() {
        assert!(evaluate_conditions(&conditions("always"), &conditions("always"), None));
        assert!(evaluate_conditions(
            &conditions("always"),
            &conditions("always"),
            Some(&conditions("x"))
        ));
    }

    #[test]
    fn test_hide_always() {
        assert!(!evaluate_conditions(&conditions(""), &conditions("always"), None));
    }

    #[test]
    fn test_no_element_ancestor_is_visible() {
        assert!(evaluate_conditions(&conditions("hover"), &conditions("hover"), None));
    }

    #[test]
    fn test_hide_checked_before_show() {
        let active = conditions("hover");
        assert!(!evaluate_conditions(&conditions("hover"), &conditions("hover"), Some(&active)));
    }

    #[test]
    fn test_default_visibility() {
        let active = conditions("pressed");
        assert!(evaluate_conditions(&conditions(""), &conditions("disabled"), Some(&active)));
        assert!(!evaluate_conditions(&conditions("checked"), &conditions(""), Some(&active)));
        assert!(evaluate_conditions(&conditions("pressed"), &conditions(""), Some(&active)));
    }

    #[test]
    fn test_refresh_follows_active_conditions() {
        let (mut screen, element) = setup();
        let mark = screen
            .add_sub_node(element, NodeDesc::space("mark").with_show_on(conditions("checked")))
            .unwrap();
        screen.refresh_conditions();
        assert!(!screen.is_visible(mark));

        screen.add_active_condition(element, "checked");
        screen.refresh_conditions();
        assert!(screen.is_visible(mark));

        screen.remove_active_condition(element, "checked");
        screen.refresh_conditions();
        assert!(!screen.is_visible(mark));
    }

    #[test]
    fn test_nearest_element_is_used() {
        let (mut screen, outer) = setup();
        let layout = screen
            .add_sub_node(outer, NodeDesc::layout("layout", Arrangement::Vertical))
            .unwrap();
        let inner = screen
            .add_sub_node(layout, NodeDesc::element("inner", "inner"))
            .unwrap();
        let label = screen
            .add_sub_node(inner, NodeDesc::space("label").with_show_on(conditions("selected")))
            .unwrap();
        screen.add_active_condition(outer, "selected");
        screen.refresh_conditions();
        assert!(!screen.is_visible(label));
        assert_eq!(screen.nearest_element_ancestor(label), Some(inner));

        screen.add_active_condition(inner, "selected");
        screen.refresh_conditions();
        assert!(screen.is_visible(label));
    }

    #[test]
    fn test_hidden_parent_still_walks_children() {
        let (mut screen, element) = setup();
        let hidden = screen
            .add_sub_node(
                element,
                NodeDesc::layout("hidden", Arrangement::None).with_hide_on(conditions("always")),
            )
            .unwrap();
        let child = screen.add_sub_node(hidden, NodeDesc::space("child")).unwrap();
        screen.refresh_conditions();
        assert!(!screen.is_visible(hidden));
        // Evaluated on its own rules; render and dispatch skip it through the parent
        assert!(screen.is_visible(child));
    }

    #[test]
    fn test_active_conditions_on_non_element_are_ignored() {
        let (mut screen, element) = setup();
        let space = screen.add_sub_node(element, NodeDesc::space("gap")).unwrap();
        screen.refresh_conditions();
        screen.add_active_condition(space, "x");
        assert!(!screen.has_active_condition(space, "x"));
        assert!(!screen.conditions_dirty);
    }
}
