//! Intrinsic content sizes and content alignment.
//!
//! Content size is what `Auto` resolves to:
//! - containers: sum (governing axis) or max (other axis) of their children's
//!   auto sizes, plus own border and padding
//! - text / image: the collaborator-supplied content size, plus border and padding
//! - space and scrollbar: border and padding only
//!
//! Hidden and floating children never contribute.

use crate::engine::{Node, NodeId, NodeKind, Screen};
use crate::layout::ConstraintKind;
use crate::types::{Axis, HorizontalAlignment, VerticalAlignment};

/// Intrinsic size of `id` on `axis`, including border and padding.
pub fn content_size(screen: &Screen, id: NodeId, axis: Axis) -> i32 {
    let Some(node) = screen.node(id) else { return 0 };
    let insets = match axis {
        Axis::Horizontal => node.border.horizontal() + node.padding.horizontal(),
        Axis::Vertical => node.border.vertical() + node.padding.vertical(),
    };
    let inner = match &node.kind {
        NodeKind::Text {
            content_width,
            content_height,
            ..
        }
        | NodeKind::Image {
            content_width,
            content_height,
            ..
        } => match axis {
            Axis::Horizontal => *content_width,
            Axis::Vertical => *content_height,
        },
        NodeKind::Space | NodeKind::Scrollbar { .. } => 0,
        NodeKind::Screen | NodeKind::Layout { .. } | NodeKind::Element { .. } => {
            let stacked = node.kind.arrangement().governing_axis() == Some(axis);
            let sizes = node
                .children
                .iter()
                .filter(|child| participates(screen, **child))
                .map(|child| auto_size(screen, *child, axis).max(0));
            if stacked { sizes.sum::<i32>() } else { sizes.max().unwrap_or(0) }
        }
    };
    inner + insets
}

/// Size a parent sees when summing its children: content size for `Auto`,
/// the literal value for `Pixel`, the last computed size otherwise.
pub fn auto_size(screen: &Screen, id: NodeId, axis: Axis) -> i32 {
    let Some(node) = screen.node(id) else { return 0 };
    let requested = match axis {
        Axis::Horizontal => node.requested.width,
        Axis::Vertical => node.requested.height,
    };
    match requested.kind {
        ConstraintKind::Auto => content_size(screen, id, axis),
        ConstraintKind::Pixel => requested.value,
        _ => match axis {
            Axis::Horizontal => node.computed.width,
            Axis::Vertical => node.computed.height,
        },
    }
}

/// Visible, integrated nodes take part in sums, star counting, and stacking.
pub(crate) fn participates(screen: &Screen, id: NodeId) -> bool {
    screen
        .node(id)
        .is_some_and(|node| node.conditions_met && !node.is_floating())
}

/// Offset of intrinsic content inside a content node's own box.
///
/// No-op for nodes that are not content nodes.
pub(crate) fn compute_content_alignment(node: &mut Node, content_width: i32, content_height: i32) {
    if !node.kind.is_content_node() {
        return;
    }
    let start_x = node.border.left + node.padding.left;
    let start_y = node.border.top + node.padding.top;
    let computed = &mut node.computed;
    computed.content_alignment_left = match node.alignments.horizontal {
        HorizontalAlignment::Left => start_x,
        HorizontalAlignment::Center => (computed.width - content_width) / 2 + start_x,
        HorizontalAlignment::Right => computed.width - content_width + start_x,
    };
    computed.content_alignment_top = match node.alignments.vertical {
        VerticalAlignment::Top => start_y,
        VerticalAlignment::Center => (computed.height - content_height) / 2 + start_y,
        VerticalAlignment::Bottom => computed.height - content_height + start_y,
    };
}

impl Screen {
    /// Intrinsic width of `id`, including border and padding.
    pub fn content_width(&self, id: NodeId) -> i32 {
        content_size(self, id, Axis::Horizontal)
    }

    /// Intrinsic height of `id`, including border and padding.
    pub fn content_height(&self, id: NodeId) -> i32 {
        content_size(self, id, Axis::Vertical)
    }
}
