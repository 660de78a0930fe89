//! Render traversal.
//!
//! Walks the visible tree and emits one [`DrawCommand`] per painted part:
//! background, each border side, text/image content, and scrollbar bars.
//! Positions are screen pixels with the cumulative scroll offset of the
//! node's ancestors applied. Every command carries the clip rect of the
//! ancestor boxes it is drawn inside.
//!
//! Floating children are not drawn with their parent. They are collected
//! and drawn afterwards by [`Screen::render_floating_nodes`], on top of the
//! base tree and clipped to the screen only.

use tracing::trace;

use crate::controllers::ScrollbarMetrics;
use crate::engine::{NodeId, NodeKind, Screen};
use crate::types::{Axis, ClipRect, Rgba};

// =============================================================================
// Draw commands
// =============================================================================

/// Axis-aligned quad in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Quad {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest pixel rect covering the quad.
    pub fn to_clip_rect(&self) -> ClipRect {
        let x = self.x.floor() as i32;
        let y = self.y.floor() as i32;
        ClipRect::new(
            x,
            y,
            (self.x + self.width).ceil() as i32 - x,
            (self.y + self.height).ceil() as i32 - y,
        )
    }
}

/// Side of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Left,
    Top,
    Right,
    Bottom,
}

/// One paint operation for the rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background { node: NodeId, quad: Quad, color: Rgba, clip: ClipRect },
    Border { node: NodeId, side: BorderSide, quad: Quad, color: Rgba, clip: ClipRect },
    /// Text content box; glyphs come from the font collaborator.
    Text { node: NodeId, text: String, quad: Quad, clip: ClipRect },
    /// Image content box; pixels come from the texture collaborator.
    Image { node: NodeId, source: String, quad: Quad, clip: ClipRect },
    /// Scrollbar bar inside its track.
    ScrollbarBar { node: NodeId, axis: Axis, quad: Quad, clip: ClipRect },
}

impl DrawCommand {
    pub fn node(&self) -> NodeId {
        match self {
            Self::Background { node, .. }
            | Self::Border { node, .. }
            | Self::Text { node, .. }
            | Self::Image { node, .. }
            | Self::ScrollbarBar { node, .. } => *node,
        }
    }

    pub fn quad(&self) -> Quad {
        match self {
            Self::Background { quad, .. }
            | Self::Border { quad, .. }
            | Self::Text { quad, .. }
            | Self::Image { quad, .. }
            | Self::ScrollbarBar { quad, .. } => *quad,
        }
    }
}

/// Sink for draw commands, implemented by rendering backends.
pub trait RenderContext {
    fn draw(&mut self, command: DrawCommand);
}

/// [`RenderContext`] that records commands in order.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands emitted for `node`.
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands.iter().filter(move |command| command.node() == node)
    }
}

impl RenderContext for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

// =============================================================================
// Traversal
// =============================================================================

impl Screen {
    /// Draw the base tree. Floating nodes met on the way are collected for
    /// [`Screen::render_floating_nodes`].
    pub fn render(&mut self, ctx: &mut dyn RenderContext) {
        self.refresh_conditions();
        trace!(screen = %self.id(), "render");
        let mut floating = Vec::new();
        self.render_node(self.root, ctx, self.screen_clip(), (0.0, 0.0), &mut floating);
        self.floating_nodes = floating;
    }

    /// Draw the floating nodes collected by the last [`Screen::render`], in
    /// tree order. Floating nodes nested in them are drawn after them.
    pub fn render_floating_nodes(&mut self, ctx: &mut dyn RenderContext) {
        let mut pending = std::mem::take(&mut self.floating_nodes);
        let mut index = 0;
        while index < pending.len() {
            let node = pending[index];
            let offset = self.parent_scroll_offset(node);
            let mut nested = Vec::new();
            self.render_node(node, ctx, self.screen_clip(), offset, &mut nested);
            pending.extend(nested);
            index += 1;
        }
        self.floating_nodes = pending;
    }

    /// Floating nodes collected by the last render pass.
    pub fn rendered_floating_nodes(&self) -> &[NodeId] {
        &self.floating_nodes
    }

    fn screen_clip(&self) -> ClipRect {
        ClipRect::new(0, 0, self.screen_width(), self.screen_height())
    }

    fn render_node(
        &self,
        id: NodeId,
        ctx: &mut dyn RenderContext,
        clip: ClipRect,
        offset: (f32, f32),
        floating: &mut Vec<NodeId>,
    ) {
        let Some(node) = self.node(id) else { return };
        if !node.conditions_met {
            return;
        }
        let c = node.computed();
        let quad = Quad::new(
            c.x() as f32 - offset.0,
            c.y() as f32 - offset.1,
            c.width as f32,
            c.height as f32,
        );

        if !node.background.is_transparent() {
            ctx.draw(DrawCommand::Background {
                node: id,
                quad,
                color: node.background,
                clip,
            });
        }
        self.render_border(id, quad, ctx, clip);

        let content = Quad::new(
            quad.x + node.leading_inset(Axis::Horizontal) as f32,
            quad.y + node.leading_inset(Axis::Vertical) as f32,
            node.content_box_width().max(0) as f32,
            node.content_box_height().max(0) as f32,
        );
        match &node.kind {
            NodeKind::Text { text, .. } => ctx.draw(DrawCommand::Text {
                node: id,
                text: text.clone(),
                quad: content,
                clip,
            }),
            NodeKind::Image { source, .. } => ctx.draw(DrawCommand::Image {
                node: id,
                source: source.clone(),
                quad: content,
                clip,
            }),
            NodeKind::Scrollbar { .. } => {
                if let Some(metrics) = ScrollbarMetrics::compute(self, id) {
                    let bar = match metrics.axis {
                        Axis::Horizontal => {
                            Quad::new(metrics.bar_start - offset.0, content.y, metrics.bar_size, content.height)
                        }
                        Axis::Vertical => {
                            Quad::new(content.x, metrics.bar_start - offset.1, content.width, metrics.bar_size)
                        }
                    };
                    ctx.draw(DrawCommand::ScrollbarBar {
                        node: id,
                        axis: metrics.axis,
                        quad: bar,
                        clip,
                    });
                }
            }
            _ => {}
        }

        if node.children.is_empty() {
            return;
        }
        let Some(child_clip) = clip.intersect(&quad.to_clip_rect()) else {
            return;
        };
        let child_offset = (offset.0 + node.scroll_offset_x, offset.1 + node.scroll_offset_y);
        for child in node.children.iter().copied() {
            if self.node(child).is_some_and(|n| n.is_floating()) {
                floating.push(child);
            } else {
                self.render_node(child, ctx, child_clip, child_offset, floating);
            }
        }
    }

    fn render_border(&self, id: NodeId, quad: Quad, ctx: &mut dyn RenderContext, clip: ClipRect) {
        let Some(border) = self.node(id).map(|n| n.border) else { return };
        let sides = [
            (BorderSide::Left, border.left, border.left_color, Quad::new(quad.x, quad.y, border.left as f32, quad.height)),
            (BorderSide::Top, border.top, border.top_color, Quad::new(quad.x, quad.y, quad.width, border.top as f32)),
            (
                BorderSide::Right,
                border.right,
                border.right_color,
                Quad::new(quad.x + quad.width - border.right as f32, quad.y, border.right as f32, quad.height),
            ),
            (
                BorderSide::Bottom,
                border.bottom,
                border.bottom_color,
                Quad::new(quad.x, quad.y + quad.height - border.bottom as f32, quad.width, border.bottom as f32),
            ),
        ];
        for (side, width, color, quad) in sides {
            if width > 0 {
                ctx.draw(DrawCommand::Border {
                    node: id,
                    side,
                    quad,
                    color,
                    clip,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NodeConditions, NodeDesc};
    use crate::layout::Constraint;
    use crate::types::{Arrangement, Border, Flow, Overflow, Padding};

    fn sized(desc: NodeDesc, width: i32, height: i32) -> NodeDesc {
        desc.with_width(Constraint::pixel(width))
            .with_height(Constraint::pixel(height))
    }

    fn setup() -> Screen {
        let mut screen = Screen::new("screen");
        screen.set_screen_size(200, 100);
        screen
    }

    #[test]
    fn test_background_and_border() {
        let mut screen = setup();
        let root = screen.root();
        let panel = screen
            .add_sub_node(
                root,
                sized(NodeDesc::layout("panel", Arrangement::None), 50, 40)
                    .with_background(Rgba::RED)
                    .with_border(Border {
                        top: 2,
                        ..Border::all(0, Rgba::BLUE)
                    }),
            )
            .unwrap();
        screen.layout();

        let mut list = DrawList::new();
        screen.render(&mut list);
        let commands: Vec<&DrawCommand> = list.for_node(panel).collect();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            *commands[0],
            DrawCommand::Background {
                node: panel,
                quad: Quad::new(0.0, 0.0, 50.0, 40.0),
                color: Rgba::RED,
                clip: ClipRect::new(0, 0, 200, 100),
            }
        );
        assert!(matches!(
            commands[1],
            DrawCommand::Border { side: BorderSide::Top, quad, .. } if *quad == Quad::new(0.0, 0.0, 50.0, 2.0)
        ));
    }

    #[test]
    fn test_text_uses_content_box() {
        let mut screen = setup();
        let root = screen.root();
        let label = screen
            .add_sub_node(root, NodeDesc::text("label", "Hello", 30, 10).with_padding(Padding::all(2)))
            .unwrap();
        screen.layout();
        let mut list = DrawList::new();
        screen.render(&mut list);
        let text = list.for_node(label).next().unwrap();
        assert_eq!(text.quad(), Quad::new(2.0, 2.0, 30.0, 10.0));
    }

    #[test]
    fn test_scroll_offset_and_clip_apply_to_children() {
        let mut screen = setup();
        let root = screen.root();
        let list_node = screen
            .add_sub_node(
                root,
                sized(NodeDesc::layout("list", Arrangement::Vertical), 50, 30)
                    .with_top(Constraint::pixel(10))
                    .with_overflow(Overflow::Hidden, Overflow::Scroll)
                    .with_child(sized(NodeDesc::space("a"), 50, 20).with_background(Rgba::GREEN))
                    .with_child(sized(NodeDesc::space("b"), 50, 20).with_background(Rgba::GREEN)),
            )
            .unwrap();
        screen.layout();
        screen.set_scroll_offset_y(list_node, 10.0);
        let b = screen.get_node_by_id("b").unwrap();

        let mut list = DrawList::new();
        screen.render(&mut list);
        assert_eq!(
            *list.for_node(b).next().unwrap(),
            DrawCommand::Background {
                node: b,
                quad: Quad::new(0.0, 20.0, 50.0, 20.0),
                color: Rgba::GREEN,
                clip: ClipRect::new(0, 10, 50, 30),
            }
        );
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let mut screen = setup();
        let root = screen.root();
        let hidden = screen
            .add_sub_node(
                root,
                sized(NodeDesc::layout("hidden", Arrangement::None), 10, 10)
                    .with_background(Rgba::RED)
                    .with_hide_on(NodeConditions::parse("always"))
                    .with_child(sized(NodeDesc::space("inner"), 5, 5).with_background(Rgba::RED)),
            )
            .unwrap();
        screen.layout();
        let mut list = DrawList::new();
        screen.render(&mut list);
        assert!(list.for_node(hidden).next().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_floating_nodes_render_last() {
        let mut screen = setup();
        let root = screen.root();
        let panel = screen
            .add_sub_node(
                root,
                sized(NodeDesc::layout("panel", Arrangement::Vertical), 20, 20)
                    .with_background(Rgba::RED)
                    .with_child(
                        sized(NodeDesc::layout("popup", Arrangement::None), 80, 80)
                            .with_flow(Flow::Floating)
                            .with_background(Rgba::WHITE),
                    )
                    .with_child(sized(NodeDesc::space("after"), 10, 10).with_background(Rgba::GREEN)),
            )
            .unwrap();
        let popup = screen.get_node_by_id("popup").unwrap();
        let after = screen.get_node_by_id("after").unwrap();
        screen.layout();

        let mut list = DrawList::new();
        screen.render(&mut list);
        assert_eq!(screen.rendered_floating_nodes(), &[popup]);
        let order: Vec<NodeId> = list.commands().iter().map(DrawCommand::node).collect();
        assert_eq!(order, vec![panel, after]);

        screen.render_floating_nodes(&mut list);
        let popup_command = list.commands().last().unwrap();
        assert_eq!(popup_command.node(), popup);
        // Not clipped by the 20x20 parent
        assert!(matches!(popup_command, DrawCommand::Background { clip, .. } if *clip == ClipRect::new(0, 0, 200, 100)));
    }

    #[test]
    fn test_scrollbar_bar_quad() {
        let mut screen = setup();
        let root = screen.root();
        let pane = screen
            .add_sub_node(
                root,
                sized(NodeDesc::layout("pane", Arrangement::Vertical), 50, 50)
                    .with_overflow(Overflow::Hidden, Overflow::Scroll)
                    .with_child(sized(NodeDesc::space("body"), 50, 200)),
            )
            .unwrap();
        let bar = screen
            .add_sub_node(
                root,
                sized(NodeDesc::scrollbar("bar", Axis::Vertical, pane), 6, 50).with_left(Constraint::pixel(50)),
            )
            .unwrap();
        screen.layout();
        screen.set_scroll_offset_y(pane, 150.0);

        let mut list = DrawList::new();
        screen.render(&mut list);
        let command = list.for_node(bar).next().unwrap();
        assert_eq!(command.quad(), Quad::new(50.0, 37.5, 6.0, 12.5));
    }
}
