//! Focus Module - Single focused element per screen
//!
//! The screen holds one focus reference. Controllers set it (click-to-focus),
//! Tab cycles it. Focus changes do not call controllers immediately: the
//! lost/gained notifications are queued and delivered once the current
//! dispatch (pointer, keyboard, tick, layout) returns, so a controller can
//! move focus from inside its own handler.
//!
//! # API
//!
//! - `focused_node` - Currently focused element
//! - `set_focused_node(node)` - Focus an element
//! - `unfocus` - Clear focus
//! - `focusable_nodes` - Visible, enabled, focusable elements in tree order
//! - `focus_next_node` / `focus_previous_node` - Cycle with wrap-around

use tracing::{debug, warn};

use crate::engine::{NodeId, NodeKind, Screen};

/// Upper bound on notification rounds per flush.
const MAX_FOCUS_ROUNDS: usize = 16;

impl Screen {
    // =========================================================================
    // Focus reference
    // =========================================================================

    pub fn focused_node(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn has_focus(&self, node: NodeId) -> bool {
        self.focused == Some(node)
    }

    /// Focus an element. Non-elements are rejected with a warning.
    pub fn set_focused_node(&mut self, node: NodeId) {
        let is_element = self
            .node(node)
            .is_some_and(|n| matches!(n.kind, NodeKind::Element { .. }));
        if !is_element {
            warn!(node = node.index(), "focus target is not an element");
            return;
        }
        if self.focused == Some(node) {
            return;
        }
        if let Some(previous) = self.focused.take() {
            self.pending_focus.push((previous, false));
        }
        self.focused = Some(node);
        self.pending_focus.push((node, true));
        debug!(node = self.node(node).map(|n| n.id()).unwrap_or_default(), "focus changed");
    }

    /// Clear focus.
    pub fn unfocus(&mut self) {
        if let Some(previous) = self.focused.take() {
            self.pending_focus.push((previous, false));
            debug!(node = previous.index(), "focus cleared");
        }
    }

    // =========================================================================
    // Focus cycling
    // =========================================================================

    /// Visible focusable elements whose controller is not disabled, in tree order.
    ///
    /// Elements inside hidden subtrees are skipped.
    pub fn focusable_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if !node.conditions_met {
                continue;
            }
            if let NodeKind::Element { focusable: true, .. } = node.kind {
                let disabled = self.controller(id).is_some_and(|c| c.is_disabled());
                if !disabled {
                    out.push(id);
                }
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Focus the next focusable element, wrapping around.
    pub fn focus_next_node(&mut self) {
        self.cycle_focus(true);
    }

    /// Focus the previous focusable element, wrapping around.
    pub fn focus_previous_node(&mut self) {
        self.cycle_focus(false);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let nodes = self.focusable_nodes();
        if nodes.is_empty() {
            return;
        }
        let current = self
            .focused
            .and_then(|focused| nodes.iter().position(|id| *id == focused));
        let index = match (current, forward) {
            (Some(i), true) => (i + 1) % nodes.len(),
            (Some(i), false) => (i + nodes.len() - 1) % nodes.len(),
            (None, true) => 0,
            (None, false) => nodes.len() - 1,
        };
        self.set_focused_node(nodes[index]);
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Deliver queued focus lost/gained notifications to the elements' own controllers.
    pub(crate) fn flush_focus_notifications(&mut self) {
        for _ in 0..MAX_FOCUS_ROUNDS {
            if self.pending_focus.is_empty() {
                return;
            }
            for (node, gained) in std::mem::take(&mut self.pending_focus) {
                self.with_controller(node, |controller, screen| {
                    if gained {
                        controller.on_focus_gained(screen, node);
                    } else {
                        controller.on_focus_lost(screen, node);
                    }
                });
            }
        }
        if !self.pending_focus.is_empty() {
            warn!(pending = self.pending_focus.len(), "focus notifications did not settle");
            self.pending_focus.clear();
        }
    }
}
