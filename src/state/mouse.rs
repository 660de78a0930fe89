//! Mouse Module - Pointer events, hit testing, and dispatch
//!
//! Every visible node receives each pointer event; the controllers decide
//! whether the event concerns them by hit-testing their own node. Delivery
//! order per event:
//!
//! 1. visible floating nodes, in tree order
//! 2. the root, recursively (children before their parent's controller)
//!
//! Once a floating node's subtree marks the event processed, nothing else
//! receives it.
//!
//! # API
//!
//! - `PointerEvent::pressed/released/moved/dragged/wheel` - Event constructors
//! - `Screen::is_event_belonging_to_node` - Scroll-compensated hit test
//! - `Screen::event_position_in_node` - Event point relative to a node's box
//! - `Screen::handle_pointer_event` - Dispatch
//!
//! # Example
//!
//! ```ignore
//! use spark_gui::state::mouse::PointerEvent;
//!
//! let mut event = PointerEvent::pressed(12, 40);
//! screen.handle_pointer_event(&mut event);
//! if !event.processed {
//!     // fall through to the 3D view
//! }
//! ```

use tracing::trace;

use super::keyboard::Modifiers;
use crate::engine::{CONDITION_CLICK, CONDITION_MOUSEOVER, Node, NodeId, NodeKind, Screen};

// =============================================================================
// TYPES
// =============================================================================

/// Pointer action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Pressed,
    Released,
    Moved,
    Dragged,
    Wheel,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Pointer event in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub button: MouseButton,
    pub x: i32,
    pub y: i32,
    /// Wheel units; positive scrolls content back toward its start.
    pub wheel_x: f32,
    pub wheel_y: f32,
    pub modifiers: Modifiers,
    /// Set by the controller that consumed the event
    pub processed: bool,
}

impl PointerEvent {
    pub fn new(action: PointerAction, button: MouseButton, x: i32, y: i32) -> Self {
        Self {
            action,
            button,
            x,
            y,
            wheel_x: 0.0,
            wheel_y: 0.0,
            modifiers: Modifiers::NONE,
            processed: false,
        }
    }

    /// Left button press
    pub fn pressed(x: i32, y: i32) -> Self {
        Self::new(PointerAction::Pressed, MouseButton::Left, x, y)
    }

    /// Left button release
    pub fn released(x: i32, y: i32) -> Self {
        Self::new(PointerAction::Released, MouseButton::Left, x, y)
    }

    /// Move without a button held
    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerAction::Moved, MouseButton::None, x, y)
    }

    /// Move with the left button held
    pub fn dragged(x: i32, y: i32) -> Self {
        Self::new(PointerAction::Dragged, MouseButton::Left, x, y)
    }

    pub fn wheel(x: i32, y: i32, wheel_x: f32, wheel_y: f32) -> Self {
        Self {
            wheel_x,
            wheel_y,
            ..Self::new(PointerAction::Wheel, MouseButton::None, x, y)
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[inline]
    pub fn is_left(&self) -> bool {
        self.button == MouseButton::Left
    }
}

// =============================================================================
// HIT TESTING
// =============================================================================

/// Half-open box test on a node's visual box.
fn box_contains(node: &Node, x: f32, y: f32) -> bool {
    let c = node.computed();
    let (left, top) = (c.x() as f32, c.y() as f32);
    x >= left && x < left + c.width as f32 && y >= top && y < top + c.height as f32
}

impl Screen {
    /// True if the event point lies in `node` and in every ancestor up to
    /// the first floating one, with scroll offsets compensated.
    pub fn is_event_belonging_to_node(&self, node: NodeId, event: &PointerEvent) -> bool {
        self.is_point_in_node(node, event.x, event.y)
    }

    /// Hit test a screen point against `node`.
    ///
    /// Each box is tested with the point translated by the scroll offsets of
    /// that box's own ancestors. A floating ancestor ends the walk unchecked.
    pub fn is_point_in_node(&self, node: NodeId, x: i32, y: i32) -> bool {
        let Some(target) = self.node(node) else {
            return false;
        };
        let ancestors = self.ancestors(node);

        // above[i] = offsets of ancestors[i]'s own ancestors
        let mut above = vec![(0.0f32, 0.0f32); ancestors.len()];
        let (mut offset_x, mut offset_y) = (0.0f32, 0.0f32);
        for (i, id) in ancestors.iter().enumerate().rev() {
            above[i] = (offset_x, offset_y);
            if let Some(n) = self.node(*id) {
                offset_x += n.scroll_offset_x;
                offset_y += n.scroll_offset_y;
            }
        }

        let (x, y) = (x as f32, y as f32);
        if !box_contains(target, x + offset_x, y + offset_y) {
            return false;
        }
        for (id, (above_x, above_y)) in ancestors.iter().zip(above) {
            let Some(ancestor) = self.node(*id) else {
                return false;
            };
            if ancestor.is_floating() {
                break;
            }
            if !box_contains(ancestor, x + above_x, y + above_y) {
                return false;
            }
        }
        true
    }

    /// Event point relative to the top-left of `node`'s visual box, scroll compensated.
    pub fn event_position_in_node(&self, node: NodeId, event: &PointerEvent) -> Option<(i32, i32)> {
        let c = *self.node(node)?.computed();
        let (offset_x, offset_y) = self.parent_scroll_offset(node);
        Some((
            (event.x as f32 + offset_x) as i32 - c.x(),
            (event.y as f32 + offset_y) as i32 - c.y(),
        ))
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Visible floating nodes with visible ancestors, in tree order.
    pub fn floating_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if !node.conditions_met {
                continue;
            }
            if node.is_floating() {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Deliver a pointer event to the tree.
    pub fn handle_pointer_event(&mut self, event: &mut PointerEvent) {
        self.refresh_conditions();
        self.floating_processed = false;
        trace!(action = ?event.action, x = event.x, y = event.y, "pointer event");

        for node in self.floating_nodes() {
            self.dispatch_pointer(node, event);
            if self.floating_processed {
                break;
            }
        }
        let root = self.root;
        self.dispatch_pointer(root, event);

        self.flush_focus_notifications();
    }

    fn dispatch_pointer(&mut self, node: NodeId, event: &mut PointerEvent) {
        let Some(n) = self.node(node) else { return };
        if !n.conditions_met || self.floating_processed {
            return;
        }
        let is_element = matches!(n.kind, NodeKind::Element { .. });
        let is_parent = n.kind.is_parent();
        let is_floating = n.is_floating();

        if is_element && self.options.track_pointer_conditions {
            self.update_pointer_conditions(node, event);
        }

        if is_parent {
            if self.scroll_by_wheel(node, event) {
                return;
            }
            let children: Vec<NodeId> = self
                .children_of(node)
                .iter()
                .copied()
                .filter(|child| self.node(*child).is_some_and(|c| !c.is_floating()))
                .collect();
            for child in children {
                self.dispatch_pointer(child, event);
            }
        }

        if self.floating_processed {
            return;
        }
        if let Some(owner) = self.controller_node_for(node) {
            self.with_controller(owner, |controller, screen| {
                controller.handle_pointer_event(screen, owner, node, event)
            });
        }
        if is_floating && event.processed {
            self.floating_processed = true;
        }
    }

    /// Drop `mouseover`/`click`, then re-add the one matching an event inside the box.
    fn update_pointer_conditions(&mut self, element: NodeId, event: &PointerEvent) {
        let inside = self.is_event_belonging_to_node(element, event);
        let mouseover = inside && event.action == PointerAction::Moved;
        let click = inside && event.action == PointerAction::Pressed;
        for (condition, active) in [(CONDITION_MOUSEOVER, mouseover), (CONDITION_CLICK, click)] {
            if active == self.has_active_condition(element, condition) {
                continue;
            }
            if active {
                self.add_active_condition(element, condition);
            } else {
                self.remove_active_condition(element, condition);
            }
        }
    }
}
