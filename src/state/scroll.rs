//! Scroll Module - Per-container scroll offsets
//!
//! A parent node with `Overflow::Scroll` on an axis keeps a scroll offset for
//! that axis. The offset never moves stored layout coordinates: it is applied
//! at render and hit-test time as a translation of the container's children.
//!
//! Offsets are clamped to `[0, content - viewport]`, where the viewport is the
//! container's computed size and the content is its intrinsic content size.
//!
//! # API
//!
//! - `scroll_offset` / `set_scroll_offset` - Read/write (clamped)
//! - `max_scroll` - Scrollable range on an axis
//! - `parent_scroll_offset` - Cumulative offset applied to a node
//! - `scroll_to_node_x` / `scroll_to_node_y` / `scroll_into_view` - Minimal reveal
//! - `resolve_scroll_content` - `<owner>_inner` lookup for scrollbars

use tracing::{debug, warn};

use super::mouse::{PointerAction, PointerEvent};
use crate::engine::{NodeId, Screen};
use crate::error::{GuiError, Result};
use crate::layout::content::content_size;
use crate::types::{Axis, Overflow};

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Suffix of the content node a scroll owner binds to by naming convention.
pub const SCROLL_CONTENT_SUFFIX: &str = "_inner";

impl Screen {
    // =========================================================================
    // Offsets
    // =========================================================================

    /// Scroll offset of `node` on `axis` (0 for unknown nodes).
    pub fn scroll_offset(&self, node: NodeId, axis: Axis) -> f32 {
        self.node(node).map_or(0.0, |n| n.scroll_offset(axis))
    }

    /// Scrollable range of `node` on `axis`, never negative.
    pub fn max_scroll(&self, node: NodeId, axis: Axis) -> f32 {
        let Some(viewport) = self.node(node).map(|n| n.computed.size(axis)) else {
            return 0.0;
        };
        (content_size(self, node, axis) - viewport).max(0) as f32
    }

    /// Set the scroll offset of `node` on `axis`, clamped to `[0, max_scroll]`.
    pub fn set_scroll_offset(&mut self, node: NodeId, axis: Axis, offset: f32) {
        let max = self.max_scroll(node, axis);
        let clamped = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, max) };
        if let Some(n) = self.node_mut(node) {
            match axis {
                Axis::Horizontal => n.scroll_offset_x = clamped,
                Axis::Vertical => n.scroll_offset_y = clamped,
            }
            debug!(node = %n.id, ?axis, offset = clamped, "scroll offset");
        }
    }

    pub fn set_scroll_offset_x(&mut self, node: NodeId, offset: f32) {
        self.set_scroll_offset(node, Axis::Horizontal, offset);
    }

    pub fn set_scroll_offset_y(&mut self, node: NodeId, offset: f32) {
        self.set_scroll_offset(node, Axis::Vertical, offset);
    }

    /// Sum of the scroll offsets of every strict ancestor of `node`.
    ///
    /// This is the translation applied to `node` when it is drawn or hit-tested.
    pub fn parent_scroll_offset(&self, node: NodeId) -> (f32, f32) {
        self.ancestors(node)
            .into_iter()
            .filter_map(|id| self.node(id))
            .fold((0.0, 0.0), |(x, y), n| (x + n.scroll_offset_x, y + n.scroll_offset_y))
    }

    // =========================================================================
    // Wheel
    // =========================================================================

    /// Scroll `node` by a wheel event that hits it.
    ///
    /// Returns true (and marks the event processed) if any scrolling axis
    /// took the delta.
    pub(crate) fn scroll_by_wheel(&mut self, node: NodeId, event: &mut PointerEvent) -> bool {
        if event.action != PointerAction::Wheel || !self.is_event_belonging_to_node(node, event) {
            return false;
        }
        let step = self.options.wheel_scroll_step;
        let mut handled = false;
        for (axis, delta) in [(Axis::Horizontal, event.wheel_x), (Axis::Vertical, event.wheel_y)] {
            let scrolls = self.node(node).is_some_and(|n| n.overflow(axis) == Overflow::Scroll);
            if !scrolls || delta == 0.0 {
                continue;
            }
            let offset = self.scroll_offset(node, axis) - delta * step;
            self.set_scroll_offset(node, axis, offset);
            handled = true;
        }
        if handled {
            event.processed = true;
        }
        handled
    }

    // =========================================================================
    // Reveal
    // =========================================================================

    /// Scroll the enclosing containers horizontally just enough to show `node`.
    ///
    /// Walks outward until `stop_at` (exclusive) or the root.
    pub fn scroll_to_node_x(&mut self, node: NodeId, stop_at: Option<NodeId>) {
        self.scroll_to_node(node, Axis::Horizontal, stop_at);
    }

    /// Scroll the enclosing containers vertically just enough to show `node`.
    pub fn scroll_to_node_y(&mut self, node: NodeId, stop_at: Option<NodeId>) {
        self.scroll_to_node(node, Axis::Vertical, stop_at);
    }

    /// Reveal `node` on both axes.
    pub fn scroll_into_view(&mut self, node: NodeId, stop_at: Option<NodeId>) {
        self.scroll_to_node_x(node, stop_at);
        self.scroll_to_node_y(node, stop_at);
    }

    fn scroll_to_node(&mut self, node: NodeId, axis: Axis, stop_at: Option<NodeId>) {
        let mut target = node;
        while let Some(container) = self.scroll_container_of(target, axis, stop_at) {
            let (Some(t), Some(c)) = (self.node(target), self.node(container)) else {
                return;
            };
            let target_start = t.computed.start(axis) as f32;
            let target_end = target_start + t.computed.size(axis) as f32;
            let view_start = c.computed.start(axis) as f32;
            let view_size = c.computed.size(axis) as f32;
            let offset = c.scroll_offset(axis);

            if target_start < view_start + offset {
                self.set_scroll_offset(container, axis, target_start - view_start);
            } else if target_end > view_start + offset + view_size {
                self.set_scroll_offset(container, axis, target_end - view_start - view_size);
            }
            target = container;
        }
    }

    /// Nearest strict ancestor scrolling on `axis`, not crossing `stop_at`.
    fn scroll_container_of(&self, node: NodeId, axis: Axis, stop_at: Option<NodeId>) -> Option<NodeId> {
        self.ancestors(node)
            .into_iter()
            .take_while(|id| Some(*id) != stop_at)
            .find(|id| self.node(*id).is_some_and(|n| n.overflow(axis) == Overflow::Scroll))
    }

    // =========================================================================
    // Content binding
    // =========================================================================

    /// Content node of a scroll owner by the `<owner>_inner` naming convention.
    pub fn resolve_scroll_content(&self, owner_id: &str) -> Result<NodeId> {
        let expected = format!("{owner_id}{SCROLL_CONTENT_SUFFIX}");
        self.get_node_by_id(&expected).ok_or_else(|| {
            warn!(owner = owner_id, expected = %expected, "scroll content not found");
            GuiError::MissingScrollContent {
                owner: owner_id.to_string(),
                expected,
            }
        })
    }
}
