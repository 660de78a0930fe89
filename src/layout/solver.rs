//! Two-pass layout solver.
//!
//! Pass one resolves every child against its parent's already-resolved
//! content box. Pixel, Percent, and Auto are final after this pass; Star
//! children hold [`STAR_SENTINEL`](super::STAR_SENTINEL).
//!
//! Pass two, per parent:
//! 1. Star children on the governing axis split the remaining space
//!    ([`distribute_star`]); star children on any other axis take the full
//!    content extent. Resized parents re-run their own sub-node layout.
//! 2. Alignment offsets are written on every child.
//! 3. Content alignment is recomputed for content nodes.
//! 4. Absolute positions are pushed down the subtree, stacking children
//!    along the governing axis.
//!
//! After a screen or subtree pass every controller in it receives
//! `post_layout`.

use tracing::trace;

use super::content::{auto_size, compute_content_alignment, content_size, participates};
use crate::engine::{NodeId, Screen};
use crate::types::{Axis, HorizontalAlignment, VerticalAlignment};

// =============================================================================
// Star distribution
// =============================================================================

/// Split `remaining` pixels between `count` star children.
///
/// Each child gets the truncated share; the fractional remainder is carried
/// forward and a child receives one extra pixel whenever the carry reaches a
/// whole pixel. The carry is tracked in units of `1 / count` so the sizes
/// always sum to `remaining` exactly. Negative space yields zero sizes.
///
/// # Examples
///
/// ```
/// use spark_gui::layout::distribute_star;
///
/// assert_eq!(distribute_star(250, 2), vec![125, 125]);
/// assert_eq!(distribute_star(10, 3), vec![3, 3, 4]);
/// assert_eq!(distribute_star(-5, 2), vec![0, 0]);
/// ```
pub fn distribute_star(remaining: i32, count: usize) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    if remaining <= 0 {
        return vec![0; count];
    }
    let n = count as i64;
    let remaining = remaining as i64;
    let share = remaining / n;
    let fraction = remaining % n;
    let mut carry = 0i64;
    (0..count)
        .map(|_| {
            let mut size = share;
            carry += fraction;
            if carry >= n {
                size += 1;
                carry -= n;
            }
            size as i32
        })
        .collect()
}

// =============================================================================
// Alignment
// =============================================================================

/// Alignment of a parent along one axis, independent of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisAlignment {
    Start,
    Center,
    End,
}

impl AxisAlignment {
    fn of(horizontal: HorizontalAlignment, vertical: VerticalAlignment, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => match horizontal {
                HorizontalAlignment::Left => Self::Start,
                HorizontalAlignment::Center => Self::Center,
                HorizontalAlignment::Right => Self::End,
            },
            Axis::Vertical => match vertical {
                VerticalAlignment::Top => Self::Start,
                VerticalAlignment::Center => Self::Center,
                VerticalAlignment::Bottom => Self::End,
            },
        }
    }
}

// =============================================================================
// Solver
// =============================================================================

impl Screen {
    /// Lay out the whole tree from the screen size down.
    ///
    /// Re-evaluates pending visibility first and notifies every controller
    /// with `post_layout` afterwards.
    pub fn layout(&mut self) {
        self.refresh_conditions();
        let root = self.root;
        trace!(screen = %self.id(), "layout");
        if let Some(node) = self.node_mut(root) {
            let computed = &mut node.computed;
            computed.left = 0;
            computed.top = 0;
            computed.width = node.requested.width.resolve(0, 0).max(0);
            computed.height = node.requested.height.resolve(0, 0).max(0);
            computed.alignment_left = 0;
            computed.alignment_top = 0;
        }
        self.layout_sub_nodes(root);
        self.post_layout(root);
    }

    /// Lay out `node` again inside its parent's current box.
    ///
    /// Siblings are laid out again as well, since stacking and star
    /// distribution depend on them. The root triggers a full layout.
    pub fn layout_node(&mut self, node: NodeId) {
        match self.parent_of(node) {
            Some(parent) => self.layout_sub_nodes_of(parent),
            None => self.layout(),
        }
    }

    /// Lay out the children of `node`, keeping `node`'s own box.
    pub fn layout_sub_nodes_of(&mut self, node: NodeId) {
        self.refresh_conditions();
        trace!(node = node.index(), "layout sub nodes");
        self.layout_sub_nodes(node);
        self.post_layout(node);
    }

    fn post_layout(&mut self, from: NodeId) {
        for owner in self.controller_nodes(from, false) {
            self.with_controller(owner, |controller, screen| controller.post_layout(screen, owner));
        }
        self.flush_focus_notifications();
    }

    /// Resolve one node against its parent's content box (pass one).
    fn layout_single(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else { return };
        let Some(parent) = node.parent.and_then(|parent| self.node(parent)) else {
            return;
        };
        let requested = node.requested;
        let is_parent = node.kind.is_parent();
        let is_content = node.kind.is_content_node();
        let (parent_left, parent_top) = (parent.computed.left, parent.computed.top);
        let (parent_width, parent_height) = (parent.content_box_width(), parent.content_box_height());

        let auto_width = if requested.width.is_auto() || is_content {
            content_size(self, id, Axis::Horizontal)
        } else {
            0
        };
        let auto_height = if requested.height.is_auto() || is_content {
            content_size(self, id, Axis::Vertical)
        } else {
            0
        };

        let Some(node) = self.node_mut(id) else { return };
        node.computed.left = parent_left + requested.left.resolve_offset(parent_width);
        node.computed.top = parent_top + requested.top.resolve_offset(parent_height);
        node.computed.width = requested.width.resolve(auto_width, parent_width);
        node.computed.height = requested.height.resolve(auto_height, parent_height);
        compute_content_alignment(node, auto_width, auto_height);

        if is_parent {
            self.layout_sub_nodes(id);
        }
    }

    /// Lay out the children of `id` (both passes) and position them.
    fn layout_sub_nodes(&mut self, id: NodeId) {
        let children = self.children_of(id).to_vec();
        for child in &children {
            self.layout_single(*child);
        }

        let Some(node) = self.node(id) else { return };
        let governing = node.kind.arrangement().governing_axis();

        // Pass two: star sizes
        let mut resized = Vec::new();
        for axis in Axis::BOTH {
            if governing == Some(axis) {
                self.distribute_stars(id, &children, axis, &mut resized);
            } else {
                self.fill_stars(id, &children, axis, &mut resized);
            }
        }
        for child in resized {
            if self.node(child).is_some_and(|n| n.kind.is_parent()) {
                self.layout_sub_nodes(child);
            }
        }

        // Alignment
        for axis in Axis::BOTH {
            if governing == Some(axis) {
                self.align_governing_axis(id, &children, axis);
            } else {
                self.align_cross_axis(id, &children, axis);
            }
        }

        // Content alignment with the final sizes
        for child in &children {
            let (width, height) = (
                content_size(self, *child, Axis::Horizontal),
                content_size(self, *child, Axis::Vertical),
            );
            if let Some(node) = self.node_mut(*child) {
                compute_content_alignment(node, width, height);
            }
        }

        let Some(node) = self.node(id) else { return };
        let (left, top) = (node.computed.left, node.computed.top);
        self.set_position(id, Axis::Vertical, top);
        self.set_position(id, Axis::Horizontal, left);
    }

    /// Split the remaining governing-axis space between visible star children.
    fn distribute_stars(&mut self, id: NodeId, children: &[NodeId], axis: Axis, resized: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else { return };
        let available = node.content_box_size(axis);

        let mut fixed = 0;
        let mut stars = Vec::new();
        for child in children {
            let Some(child_node) = self.node(*child) else { continue };
            let is_star = child_node.requested.size(axis).is_star();
            if !participates(self, *child) {
                if is_star {
                    // Hidden stars collapse; floating stars fill the parent.
                    let size = if child_node.conditions_met { available.max(0) } else { 0 };
                    self.assign_size(*child, axis, size, resized);
                }
                continue;
            }
            if is_star {
                stars.push(*child);
            } else {
                fixed += child_node.computed.size(axis).max(0);
            }
        }

        let sizes = distribute_star(available - fixed, stars.len());
        trace!(node = id.index(), ?axis, available, fixed, stars = stars.len(), "star distribution");
        for (child, size) in stars.into_iter().zip(sizes) {
            self.assign_size(child, axis, size, resized);
        }
    }

    /// Star children on a non-governing axis take the parent's full content extent.
    fn fill_stars(&mut self, id: NodeId, children: &[NodeId], axis: Axis, resized: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else { return };
        let available = node.content_box_size(axis).max(0);
        for child in children {
            if self
                .node(*child)
                .is_some_and(|n| n.requested.size(axis).is_star())
            {
                self.assign_size(*child, axis, available, resized);
            }
        }
    }

    fn assign_size(&mut self, child: NodeId, axis: Axis, size: i32, resized: &mut Vec<NodeId>) {
        if let Some(node) = self.node_mut(child) {
            node.computed.set_size(axis, size.max(0));
            if !resized.contains(&child) {
                resized.push(child);
            }
        }
    }

    /// Align all children as one block along the stacking axis.
    fn align_governing_axis(&mut self, id: NodeId, children: &[NodeId], axis: Axis) {
        let Some(node) = self.node(id) else { return };
        let alignment = AxisAlignment::of(node.alignments.horizontal, node.alignments.vertical, axis);
        let leading = node.leading_inset(axis);
        let used: i32 = children
            .iter()
            .filter(|child| participates(self, **child))
            .filter_map(|child| self.node(*child))
            .map(|child| child.computed.size(axis).max(0))
            .sum();
        let free = node.content_box_size(axis) - used;
        let offset = match alignment {
            AxisAlignment::Start => leading,
            AxisAlignment::Center => leading + free / 2,
            AxisAlignment::End => leading + free,
        };
        for child in children {
            if let Some(child) = self.node_mut(*child) {
                child.computed.set_alignment(axis, offset);
            }
        }
    }

    /// Align each child individually across the stacking axis.
    fn align_cross_axis(&mut self, id: NodeId, children: &[NodeId], axis: Axis) {
        let Some(node) = self.node(id) else { return };
        let alignment = AxisAlignment::of(node.alignments.horizontal, node.alignments.vertical, axis);
        let container = node.computed.size(axis);
        let leading = node.leading_inset(axis);
        let trailing = node.trailing_inset(axis);
        for child in children {
            let Some(child) = self.node_mut(*child) else { continue };
            let size = child.computed.size(axis);
            let offset = match alignment {
                AxisAlignment::Start => leading,
                AxisAlignment::Center => (container - size) / 2,
                AxisAlignment::End => container - size - trailing,
            };
            child.computed.set_alignment(axis, offset);
        }
    }

    /// Set the absolute position of `id` on `axis` and push it down the subtree.
    ///
    /// Children start at this node's visual edge plus their requested offset.
    /// On the governing axis the cursor advances past each visible,
    /// integrated child.
    fn set_position(&mut self, id: NodeId, axis: Axis, value: i32) {
        let Some(node) = self.node_mut(id) else { return };
        node.computed.set_position(axis, value);
        if !node.kind.is_parent() {
            return;
        }
        let stacked = node.kind.arrangement().governing_axis() == Some(axis);
        let extent = node.content_box_size(axis);
        let mut cursor = value + node.computed.alignment(axis);
        let children = node.children.clone();

        for child in children {
            let Some(offset) = self
                .node(child)
                .map(|n| n.requested.offset(axis).resolve_offset(extent))
            else {
                continue;
            };
            self.set_position(child, axis, cursor + offset);
            if stacked && participates(self, child) {
                cursor += self.node(child).map_or(0, |n| n.computed.size(axis).max(0));
            }
        }
    }

    /// Size a parent would report for `id` when accumulating children.
    pub fn auto_width(&self, id: NodeId) -> i32 {
        auto_size(self, id, Axis::Horizontal)
    }

    pub fn auto_height(&self, id: NodeId) -> i32 {
        auto_size(self, id, Axis::Vertical)
    }
}
