//! Node model - the unit of layout, rendering, and event targeting.
//!
//! Nodes live in the screen's arena and are addressed by [`NodeId`] handles.
//! A node owns its children (by handle) and its controller; its parent link is
//! a non-owning back reference.
//!
//! Every node variant answers the same small capability contract:
//! [`NodeKind::is_parent`], [`NodeKind::is_content_node`], and the
//! intrinsic-size queries in [`crate::layout::content`].
//!
//! # Example
//!
//! ```ignore
//! use spark_gui::engine::NodeDesc;
//! use spark_gui::layout::Constraint;
//! use spark_gui::types::Arrangement;
//!
//! let desc = NodeDesc::layout("toolbar", Arrangement::Horizontal)
//!     .with_width(Constraint::pixel(300))
//!     .with_height(Constraint::pixel(24));
//! let toolbar = screen.add_sub_node(screen.root(), desc)?;
//! ```

use crate::controllers::Controller;
use crate::engine::conditions::NodeConditions;
use crate::layout::{ComputedConstraints, Constraint, RequestedConstraints};
use crate::types::{Alignments, Arrangement, Axis, Border, Flow, Overflow, Padding, Rgba};

/// Handle of a node inside its screen's arena.
///
/// A handle carries the generation of its slot, so a handle kept after its
/// node was disposed never resolves to a node that later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw arena index.
    pub fn index(self) -> usize {
        self.index
    }

    /// Slot generation the handle was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

// =============================================================================
// Node kinds
// =============================================================================

/// Closed set of node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Tree root. Sized by the host via `Screen::set_screen_size`.
    Screen,
    /// Arranges children along an axis; also the scrollable container unit.
    Layout { arrangement: Arrangement },
    /// Interactive composite widget root.
    Element {
        name: String,
        value: String,
        active_conditions: NodeConditions,
        focusable: bool,
        ignore_events: bool,
    },
    /// Text leaf. Content size comes from the font collaborator.
    Text {
        text: String,
        content_width: i32,
        content_height: i32,
    },
    /// Image leaf. Content size comes from the texture collaborator.
    Image {
        source: String,
        content_width: i32,
        content_height: i32,
    },
    /// Empty leaf that only occupies space.
    Space,
    /// Scrollbar track bound to the content node it scrolls.
    Scrollbar { axis: Axis, content: NodeId },
}

impl NodeKind {
    /// Nodes that own children.
    pub fn is_parent(&self) -> bool {
        matches!(self, Self::Screen | Self::Layout { .. } | Self::Element { .. })
    }

    /// Leaves that paint intrinsic content and support content alignment.
    pub fn is_content_node(&self) -> bool {
        matches!(self, Self::Text { .. } | Self::Image { .. })
    }

    /// Child arrangement. Element and screen nodes overlay their children.
    pub fn arrangement(&self) -> Arrangement {
        match self {
            Self::Layout { arrangement } => *arrangement,
            _ => Arrangement::None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::Layout { .. } => "layout",
            Self::Element { .. } => "element",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Space => "space",
            Self::Scrollbar { .. } => "scrollbar",
        }
    }
}

// =============================================================================
// Controller slot
// =============================================================================

/// Storage for a node's controller.
///
/// While a controller runs it is moved out of the node so it can receive
/// `&mut Screen`; the slot reads `InUse` until it is put back.
pub(crate) enum ControllerSlot {
    Empty,
    Present(Box<dyn Controller>),
    InUse,
}

impl ControllerSlot {
    pub(crate) fn is_attached(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

// =============================================================================
// Node
// =============================================================================

/// A node of the screen tree.
pub struct Node {
    pub(crate) id: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) flow: Flow,
    pub(crate) alignments: Alignments,
    pub(crate) requested: RequestedConstraints,
    pub(crate) computed: ComputedConstraints,
    pub(crate) padding: Padding,
    pub(crate) border: Border,
    pub(crate) background: Rgba,
    pub(crate) show_on: NodeConditions,
    pub(crate) hide_on: NodeConditions,
    pub(crate) conditions_met: bool,
    pub(crate) overflow_x: Overflow,
    pub(crate) overflow_y: Overflow,
    pub(crate) scroll_offset_x: f32,
    pub(crate) scroll_offset_y: f32,
    pub(crate) controller: ControllerSlot,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn is_floating(&self) -> bool {
        self.flow == Flow::Floating
    }

    pub fn alignments(&self) -> Alignments {
        self.alignments
    }

    pub fn requested(&self) -> &RequestedConstraints {
        &self.requested
    }

    /// Constraints of the last layout pass.
    pub fn computed(&self) -> &ComputedConstraints {
        &self.computed
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn border(&self) -> Border {
        self.border
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn show_on(&self) -> &NodeConditions {
        &self.show_on
    }

    pub fn hide_on(&self) -> &NodeConditions {
        &self.hide_on
    }

    /// Cached visibility from the last condition evaluation.
    pub fn conditions_met(&self) -> bool {
        self.conditions_met
    }

    pub fn overflow(&self, axis: Axis) -> Overflow {
        match axis {
            Axis::Horizontal => self.overflow_x,
            Axis::Vertical => self.overflow_y,
        }
    }

    /// Render offset applied to this node's children on `axis`.
    pub fn scroll_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.scroll_offset_x,
            Axis::Vertical => self.scroll_offset_y,
        }
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_attached()
    }

    /// Active conditions of an element node.
    pub fn active_conditions(&self) -> Option<&NodeConditions> {
        match &self.kind {
            NodeKind::Element {
                active_conditions, ..
            } => Some(active_conditions),
            _ => None,
        }
    }

    /// Width of the content box (width minus border and padding).
    pub fn content_box_width(&self) -> i32 {
        self.computed.width - self.border.horizontal() - self.padding.horizontal()
    }

    /// Height of the content box (height minus border and padding).
    pub fn content_box_height(&self) -> i32 {
        self.computed.height - self.border.vertical() - self.padding.vertical()
    }

    /// Content box extent on `axis`.
    pub fn content_box_size(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.content_box_width(),
            Axis::Vertical => self.content_box_height(),
        }
    }

    /// Border plus padding before the content box on `axis`.
    pub fn leading_inset(&self, axis: Axis) -> i32 {
        self.border.leading(axis) + self.padding.leading(axis)
    }

    /// Border plus padding after the content box on `axis`.
    pub fn trailing_inset(&self, axis: Axis) -> i32 {
        self.border.trailing(axis) + self.padding.trailing(axis)
    }

    /// Split a description into the node, its controller, and its child descriptions.
    pub(crate) fn from_desc(
        desc: NodeDesc,
        parent: Option<NodeId>,
    ) -> (Self, Option<Box<dyn Controller>>, Vec<NodeDesc>) {
        let NodeDesc {
            id,
            kind,
            flow,
            alignments,
            requested,
            padding,
            border,
            background,
            show_on,
            hide_on,
            overflow_x,
            overflow_y,
            controller,
            children,
        } = desc;
        let node = Self {
            id,
            kind,
            parent,
            children: Vec::new(),
            flow,
            alignments,
            requested,
            computed: ComputedConstraints::default(),
            padding,
            border,
            background,
            show_on,
            hide_on,
            conditions_met: true,
            overflow_x,
            overflow_y,
            scroll_offset_x: 0.0,
            scroll_offset_y: 0.0,
            controller: ControllerSlot::Empty,
        };
        (node, controller, children)
    }
}

// =============================================================================
// NodeDesc - construction input
// =============================================================================

/// Description of a node to attach, as produced by a tree builder.
///
/// Identity, flow, and requested constraints are fixed once the node is attached.
pub struct NodeDesc {
    pub(crate) id: String,
    pub(crate) kind: NodeKind,
    pub(crate) flow: Flow,
    pub(crate) alignments: Alignments,
    pub(crate) requested: RequestedConstraints,
    pub(crate) padding: Padding,
    pub(crate) border: Border,
    pub(crate) background: Rgba,
    pub(crate) show_on: NodeConditions,
    pub(crate) hide_on: NodeConditions,
    pub(crate) overflow_x: Overflow,
    pub(crate) overflow_y: Overflow,
    pub(crate) controller: Option<Box<dyn Controller>>,
    pub(crate) children: Vec<NodeDesc>,
}

impl NodeDesc {
    /// Generic description. An empty id is accepted and not indexed.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            flow: Flow::Integrated,
            alignments: Alignments::default(),
            requested: RequestedConstraints::default(),
            padding: Padding::default(),
            border: Border::default(),
            background: Rgba::TRANSPARENT,
            show_on: NodeConditions::new(),
            hide_on: NodeConditions::new(),
            overflow_x: Overflow::Hidden,
            overflow_y: Overflow::Hidden,
            controller: None,
            children: Vec::new(),
        }
    }

    pub fn layout(id: impl Into<String>, arrangement: Arrangement) -> Self {
        Self::new(id, NodeKind::Layout { arrangement })
    }

    pub fn element(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            NodeKind::Element {
                name: name.into(),
                value: String::new(),
                active_conditions: NodeConditions::new(),
                focusable: false,
                ignore_events: false,
            },
        )
    }

    pub fn text(id: impl Into<String>, text: impl Into<String>, content_width: i32, content_height: i32) -> Self {
        Self::new(
            id,
            NodeKind::Text {
                text: text.into(),
                content_width,
                content_height,
            },
        )
    }

    pub fn image(id: impl Into<String>, source: impl Into<String>, content_width: i32, content_height: i32) -> Self {
        Self::new(
            id,
            NodeKind::Image {
                source: source.into(),
                content_width,
                content_height,
            },
        )
    }

    pub fn space(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Space)
    }

    /// Scrollbar track scrolling `content` along `axis`.
    pub fn scrollbar(id: impl Into<String>, axis: Axis, content: NodeId) -> Self {
        Self::new(id, NodeKind::Scrollbar { axis, content })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_constraints(mut self, requested: RequestedConstraints) -> Self {
        self.requested = requested;
        self
    }

    pub fn with_width(mut self, width: Constraint) -> Self {
        self.requested.width = width;
        self
    }

    pub fn with_height(mut self, height: Constraint) -> Self {
        self.requested.height = height;
        self
    }

    pub fn with_left(mut self, left: Constraint) -> Self {
        self.requested.left = left;
        self
    }

    pub fn with_top(mut self, top: Constraint) -> Self {
        self.requested.top = top;
        self
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_alignments(mut self, alignments: Alignments) -> Self {
        self.alignments = alignments;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    pub fn with_show_on(mut self, show_on: NodeConditions) -> Self {
        self.show_on = show_on;
        self
    }

    pub fn with_hide_on(mut self, hide_on: NodeConditions) -> Self {
        self.hide_on = hide_on;
        self
    }

    pub fn with_overflow(mut self, overflow_x: Overflow, overflow_y: Overflow) -> Self {
        self.overflow_x = overflow_x;
        self.overflow_y = overflow_y;
        self
    }

    /// Append a child description, attached together with this node.
    pub fn with_child(mut self, child: NodeDesc) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDesc>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_controller(mut self, controller: impl Controller + 'static) -> Self {
        self.controller = Some(Box::new(controller));
        self
    }

    /// Element value. Ignored for other kinds.
    pub fn with_value(mut self, new_value: impl Into<String>) -> Self {
        if let NodeKind::Element { value, .. } = &mut self.kind {
            *value = new_value.into();
        }
        self
    }

    /// Initial active conditions of an element. Ignored for other kinds.
    pub fn with_active_conditions(mut self, conditions: NodeConditions) -> Self {
        if let NodeKind::Element {
            active_conditions, ..
        } = &mut self.kind
        {
            *active_conditions = conditions;
        }
        self
    }

    /// Mark an element as a focus target. Ignored for other kinds.
    pub fn focusable(mut self, is_focusable: bool) -> Self {
        if let NodeKind::Element { focusable, .. } = &mut self.kind {
            *focusable = is_focusable;
        }
        self
    }

    /// Make an element's subtree inert for pointer dispatch. Ignored for other kinds.
    pub fn ignore_events(mut self, ignore: bool) -> Self {
        if let NodeKind::Element { ignore_events, .. } = &mut self.kind {
            *ignore_events = ignore;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_capabilities() {
        assert!(NodeKind::Screen.is_parent());
        assert!(NodeKind::Layout { arrangement: Arrangement::Vertical }.is_parent());
        assert!(!NodeKind::Space.is_parent());
        assert!(NodeKind::Text { text: String::new(), content_width: 0, content_height: 0 }.is_content_node());
        assert!(!NodeKind::Space.is_content_node());
        assert_eq!(NodeKind::Screen.arrangement(), Arrangement::None);
        assert_eq!(
            NodeKind::Layout { arrangement: Arrangement::Horizontal }.arrangement(),
            Arrangement::Horizontal
        );
    }

    #[test]
    fn test_desc_element_setters() {
        let desc = NodeDesc::element("ok", "ok-button")
            .with_value("yes")
            .focusable(true)
            .with_active_conditions(NodeConditions::parse("disabled"));
        match &desc.kind {
            NodeKind::Element { name, value, focusable, active_conditions, .. } => {
                assert_eq!(name, "ok-button");
                assert_eq!(value, "yes");
                assert!(*focusable);
                assert!(active_conditions.contains("disabled"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_desc_element_setters_ignored_for_other_kinds() {
        let desc = NodeDesc::space("gap").with_value("x").focusable(true);
        assert_eq!(desc.kind, NodeKind::Space);
    }

    #[test]
    fn test_from_desc_defaults() {
        let (node, controller, children) = Node::from_desc(
            NodeDesc::space("gap").with_child(NodeDesc::space("inner")),
            Some(NodeId::new(0, 0)),
        );
        assert!(controller.is_none());
        assert_eq!(children.len(), 1);
        assert!(node.conditions_met());
        assert_eq!(node.parent(), Some(NodeId::new(0, 0)));
        assert_eq!(node.requested().width, Constraint::AUTO);
        assert_eq!(node.scroll_offset(Axis::Vertical), 0.0);
        assert!(!node.has_controller());
    }
}
