//! Controllers - per-node behavior objects.
//!
//! A controller is bound to exactly one node (its owner) and receives that
//! node's events. Nodes without a controller forward events to the nearest
//! ancestor that has one, so every handler also gets the node the event was
//! delivered for; most controllers only react when that node is their owner.
//!
//! The screen moves a controller out of its node while it runs, so handlers
//! get `&mut Screen` and may freely change the tree (conditions, focus,
//! scroll offsets, outbox).
//!
//! Shipped controllers:
//! - [`ElementController`] - activation and click-to-focus (default for elements)
//! - [`IgnoreEventsController`] - inert elements, enabled/disabled state
//! - [`CheckboxController`] - checked/unchecked toggle with a value
//! - [`ScrollbarController`] - bar drag and track paging (default for scrollbars)

mod checkbox;
mod element;
mod ignore_events;
mod scrollbar;

pub use checkbox::{CONDITION_CHECKED, CONDITION_UNCHECKED, CheckboxController};
pub use element::ElementController;
pub use ignore_events::{CONDITION_DISABLED, CONDITION_ENABLED, IgnoreEventsController};
pub use scrollbar::{ScrollbarController, ScrollbarMetrics, ScrollbarState};

use crate::engine::{NodeId, NodeKind, Screen};
use crate::state::keyboard::KeyboardEvent;
use crate::state::mouse::PointerEvent;

/// Behavior bound to one node.
///
/// `owner` is the node the controller is attached to. Event handlers also
/// get `node`, the node the event was delivered for (`owner` itself or a
/// descendant without a controller of its own).
pub trait Controller {
    /// Called once the owner and its subtree are attached.
    fn init(&mut self, _screen: &mut Screen, _owner: NodeId) {}

    /// Called when the owner is disposed.
    fn dispose(&mut self, _screen: &mut Screen, _owner: NodeId) {}

    /// Called after every layout pass that covered the owner.
    fn post_layout(&mut self, _screen: &mut Screen, _owner: NodeId) {}

    fn handle_pointer_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut PointerEvent);

    fn handle_keyboard_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut KeyboardEvent);

    /// Called once per frame while the owner is visible.
    fn tick(&mut self, _screen: &mut Screen, _owner: NodeId) {}

    fn on_focus_gained(&mut self, _screen: &mut Screen, _owner: NodeId) {}

    fn on_focus_lost(&mut self, _screen: &mut Screen, _owner: NodeId) {}

    /// Disabled controllers are skipped by focus cycling.
    fn is_disabled(&self) -> bool {
        false
    }

    /// Current value, for controllers that have one.
    fn value(&self) -> Option<&str> {
        None
    }

    /// Set the value. Ignored by controllers without one.
    fn set_value(&mut self, _screen: &mut Screen, _owner: NodeId, _value: &str) {}
}

/// Controller attached to a node built without one.
pub(crate) fn default_controller(kind: &NodeKind) -> Option<Box<dyn Controller>> {
    match kind {
        NodeKind::Element { ignore_events: true, .. } => Some(Box::new(IgnoreEventsController::new(false))),
        NodeKind::Element { .. } => Some(Box::new(ElementController::new())),
        NodeKind::Scrollbar { .. } => Some(Box::new(ScrollbarController::new())),
        _ => None,
    }
}
