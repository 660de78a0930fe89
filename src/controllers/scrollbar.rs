//! Scrollbar behavior for one axis.
//!
//! The scrollbar node's box minus its border is the track. The bar inside it
//! is sized by the visible share of the content node and positioned by the
//! content node's scroll offset:
//!
//! ```text
//! bar_size = track_size * min(1, viewport / content)
//! bar_start = track_start + offset * (track_size - bar_size) / (content - viewport)
//! ```
//!
//! Pressing on the bar starts a drag, pressing on the track beside it pages
//! by one viewport.

use tracing::{debug, warn};

use super::Controller;
use crate::engine::{NodeId, NodeKind, Screen};
use crate::layout::content::content_size;
use crate::state::keyboard::KeyboardEvent;
use crate::state::mouse::{PointerAction, PointerEvent};
use crate::types::Axis;

/// Interaction state of a scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollbarState {
    #[default]
    None,
    MouseOver,
    Dragging,
}

/// Track and bar geometry of a scrollbar node, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarMetrics {
    pub axis: Axis,
    pub content: NodeId,
    pub track_start: f32,
    pub track_size: f32,
    pub bar_start: f32,
    pub bar_size: f32,
    pub viewport: f32,
    pub content_size: f32,
    pub offset: f32,
}

impl ScrollbarMetrics {
    /// Geometry of `scrollbar`, or None if it is not a scrollbar or its content is gone.
    pub fn compute(screen: &Screen, scrollbar: NodeId) -> Option<Self> {
        let node = screen.node(scrollbar)?;
        let NodeKind::Scrollbar { axis, content } = *node.kind() else {
            return None;
        };
        let Some(content_node) = screen.node(content) else {
            warn!(scrollbar = %node.id(), "scrollbar content node is gone");
            return None;
        };

        let border = node.border();
        let computed = node.computed();
        let track_start = (computed.start(axis) + border.leading(axis)) as f32;
        let track_size = (computed.size(axis) - border.leading(axis) - border.trailing(axis)).max(0) as f32;

        let viewport = content_node.computed().size(axis) as f32;
        let content_size = content_size(screen, content, axis) as f32;
        let ratio = if content_size > 0.0 { (viewport / content_size).min(1.0) } else { 1.0 };
        let bar_size = track_size * ratio;
        let offset = content_node.scroll_offset(axis);

        let scrollable = (content_size - viewport).max(0.0);
        let bar_start = if scrollable > 0.0 {
            track_start + offset * (track_size - bar_size) / scrollable
        } else {
            track_start
        };

        Some(Self {
            axis,
            content,
            track_start,
            track_size,
            bar_start,
            bar_size,
            viewport,
            content_size,
            offset,
        })
    }

    /// Scrollable range of the content, never negative.
    pub fn scrollable(&self) -> f32 {
        (self.content_size - self.viewport).max(0.0)
    }

    /// True if `position` (along the axis) lies on the bar.
    pub fn is_on_bar(&self, position: f32) -> bool {
        position >= self.bar_start && position < self.bar_start + self.bar_size
    }

    /// Offset after dragging the bar by `delta` pixels, clamped to the range.
    pub fn offset_for_drag(&self, delta: f32) -> f32 {
        let free = self.track_size - self.bar_size;
        let scrollable = self.scrollable();
        if free <= 0.0 || scrollable <= 0.0 {
            return self.offset;
        }
        (self.offset + delta * scrollable / free).clamp(0.0, scrollable)
    }

    /// Offset after clicking the track at `position`, one viewport toward it.
    pub fn offset_for_track_click(&self, position: f32) -> f32 {
        let offset = if position < self.bar_start {
            self.offset - self.viewport
        } else {
            self.offset + self.viewport
        };
        offset.clamp(0.0, self.scrollable())
    }
}

/// Drag and paging behavior of a [`NodeKind::Scrollbar`] node.
#[derive(Debug, Default)]
pub struct ScrollbarController {
    state: ScrollbarState,
    grab_offset: f32,
}

impl ScrollbarController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollbarState {
        self.state
    }

    /// Pointer position along `axis`, in the scrollbar's own coordinate space.
    fn pointer_position(screen: &Screen, owner: NodeId, axis: Axis, event: &PointerEvent) -> f32 {
        let (offset_x, offset_y) = screen.parent_scroll_offset(owner);
        match axis {
            Axis::Horizontal => event.x as f32 + offset_x,
            Axis::Vertical => event.y as f32 + offset_y,
        }
    }
}

impl Controller for ScrollbarController {
    fn post_layout(&mut self, screen: &mut Screen, owner: NodeId) {
        // Content may have shrunk below the current offset
        if let Some(metrics) = ScrollbarMetrics::compute(screen, owner) {
            screen.set_scroll_offset(metrics.content, metrics.axis, metrics.offset);
        }
    }

    fn handle_pointer_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut PointerEvent) {
        if node != owner {
            return;
        }
        let Some(metrics) = ScrollbarMetrics::compute(screen, owner) else {
            return;
        };
        let position = Self::pointer_position(screen, owner, metrics.axis, event);
        let inside = screen.is_event_belonging_to_node(owner, event);

        match (self.state, event.action) {
            (ScrollbarState::Dragging, PointerAction::Dragged) => {
                let delta = position - metrics.bar_start - self.grab_offset;
                screen.set_scroll_offset(metrics.content, metrics.axis, metrics.offset_for_drag(delta));
                event.processed = true;
            }
            (ScrollbarState::Dragging, PointerAction::Released) => {
                self.state = ScrollbarState::None;
                event.processed = true;
            }
            (ScrollbarState::Dragging, _) => {}
            (_, PointerAction::Pressed) if inside && event.is_left() => {
                if metrics.is_on_bar(position) {
                    self.state = ScrollbarState::Dragging;
                    self.grab_offset = position - metrics.bar_start;
                } else {
                    let offset = metrics.offset_for_track_click(position);
                    debug!(node = owner.index(), offset, "scrollbar track click");
                    screen.set_scroll_offset(metrics.content, metrics.axis, offset);
                }
                event.processed = true;
            }
            (_, PointerAction::Moved) => {
                self.state = if inside && metrics.is_on_bar(position) {
                    ScrollbarState::MouseOver
                } else {
                    ScrollbarState::None
                };
            }
            _ => {}
        }
    }

    fn handle_keyboard_event(&mut self, _: &mut Screen, _: NodeId, _: NodeId, _: &mut KeyboardEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeDesc;
    use crate::layout::Constraint;
    use crate::types::{Arrangement, Border, Overflow, Rgba};

    fn item(id: &str, height: i32) -> NodeDesc {
        NodeDesc::space(id)
            .with_width(Constraint::pixel(100))
            .with_height(Constraint::pixel(height))
    }

    /// `pane` 100x100 scrolling 400 of content; `bar` 10x100 to its right.
    /// Track 100, bar 25, scrollable 300.
    fn setup(content_height: i32) -> (Screen, NodeId, NodeId) {
        let mut screen = Screen::new("screen");
        screen.set_screen_size(200, 200);
        let root = screen.root();
        let pane = screen
            .add_sub_node(
                root,
                NodeDesc::layout("pane", Arrangement::Vertical)
                    .with_width(Constraint::pixel(100))
                    .with_height(Constraint::pixel(100))
                    .with_overflow(Overflow::Hidden, Overflow::Scroll)
                    .with_child(item("body", content_height)),
            )
            .unwrap();
        let bar = screen
            .add_sub_node(
                root,
                NodeDesc::scrollbar("bar", Axis::Vertical, pane)
                    .with_left(Constraint::pixel(100))
                    .with_width(Constraint::pixel(10))
                    .with_height(Constraint::pixel(100)),
            )
            .unwrap();
        screen.layout();
        (screen, pane, bar)
    }

    fn send(controller: &mut ScrollbarController, screen: &mut Screen, bar: NodeId, mut event: PointerEvent) -> bool {
        controller.handle_pointer_event(screen, bar, bar, &mut event);
        event.processed
    }

    #[test]
    fn test_metrics() {
        let (mut screen, pane, bar) = setup(400);
        let metrics = ScrollbarMetrics::compute(&screen, bar).unwrap();
        assert_eq!(metrics.track_start, 0.0);
        assert_eq!(metrics.track_size, 100.0);
        assert_eq!(metrics.bar_size, 25.0);
        assert_eq!(metrics.bar_start, 0.0);
        assert_eq!(metrics.scrollable(), 300.0);

        screen.set_scroll_offset_y(pane, 300.0);
        let metrics = ScrollbarMetrics::compute(&screen, bar).unwrap();
        assert_eq!(metrics.bar_start, 75.0);
    }

    #[test]
    fn test_metrics_track_excludes_border() {
        let mut screen = Screen::new("screen");
        screen.set_screen_size(200, 200);
        let root = screen.root();
        let pane = screen
            .add_sub_node(root, NodeDesc::layout("pane", Arrangement::Vertical).with_height(Constraint::pixel(50)))
            .unwrap();
        let bar = screen
            .add_sub_node(
                root,
                NodeDesc::scrollbar("bar", Axis::Vertical, pane)
                    .with_height(Constraint::pixel(60))
                    .with_border(Border::all(5, Rgba::BLACK)),
            )
            .unwrap();
        screen.layout();
        let metrics = ScrollbarMetrics::compute(&screen, bar).unwrap();
        assert_eq!(metrics.track_start, 5.0);
        assert_eq!(metrics.track_size, 50.0);
    }

    #[test]
    fn test_content_fits_has_full_bar() {
        let (mut screen, pane, bar) = setup(50);
        let metrics = ScrollbarMetrics::compute(&screen, bar).unwrap();
        assert_eq!(metrics.bar_size, 100.0);
        assert_eq!(metrics.bar_start, metrics.track_start);
        assert_eq!(metrics.offset_for_drag(40.0), 0.0);

        let mut controller = ScrollbarController::new();
        send(&mut controller, &mut screen, bar, PointerEvent::pressed(105, 10));
        send(&mut controller, &mut screen, bar, PointerEvent::dragged(105, 90));
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 0.0);
    }

    #[test]
    fn test_drag_moves_offset() {
        let (mut screen, pane, bar) = setup(400);
        let mut controller = ScrollbarController::new();

        assert!(send(&mut controller, &mut screen, bar, PointerEvent::pressed(105, 10)));
        assert_eq!(controller.state(), ScrollbarState::Dragging);

        // delta 30 on a 75 px free track over a 300 px range
        assert!(send(&mut controller, &mut screen, bar, PointerEvent::dragged(105, 40)));
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 120.0);

        send(&mut controller, &mut screen, bar, PointerEvent::dragged(105, 500));
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 300.0);
        send(&mut controller, &mut screen, bar, PointerEvent::dragged(105, -500));
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 0.0);

        assert!(send(&mut controller, &mut screen, bar, PointerEvent::released(105, 0)));
        assert_eq!(controller.state(), ScrollbarState::None);
    }

    #[test]
    fn test_track_click_pages() {
        let (mut screen, pane, bar) = setup(400);
        let mut controller = ScrollbarController::new();

        send(&mut controller, &mut screen, bar, PointerEvent::pressed(105, 80));
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 100.0);
        assert_eq!(controller.state(), ScrollbarState::None);

        // Bar now spans 25..50
        send(&mut controller, &mut screen, bar, PointerEvent::pressed(105, 5));
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 0.0);
    }

    #[test]
    fn test_mouse_over_state() {
        let (mut screen, _, bar) = setup(400);
        let mut controller = ScrollbarController::new();
        send(&mut controller, &mut screen, bar, PointerEvent::moved(105, 10));
        assert_eq!(controller.state(), ScrollbarState::MouseOver);
        send(&mut controller, &mut screen, bar, PointerEvent::moved(105, 60));
        assert_eq!(controller.state(), ScrollbarState::None);
        send(&mut controller, &mut screen, bar, PointerEvent::moved(150, 10));
        assert_eq!(controller.state(), ScrollbarState::None);
    }

    #[test]
    fn test_default_controller_through_dispatch() {
        let (mut screen, pane, bar) = setup(400);
        assert!(screen.node(bar).unwrap().has_controller());
        let mut press = PointerEvent::pressed(105, 90);
        screen.handle_pointer_event(&mut press);
        assert!(press.processed);
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 100.0);
    }

    #[test]
    fn test_disposed_content_is_not_rebound() {
        let (mut screen, pane, bar) = setup(400);
        screen.dispose_node(pane);
        let root = screen.root();
        let other = screen
            .add_sub_node(
                root,
                NodeDesc::layout("other", Arrangement::Vertical)
                    .with_width(Constraint::pixel(100))
                    .with_height(Constraint::pixel(100))
                    .with_overflow(Overflow::Hidden, Overflow::Scroll)
                    .with_child(item("other_body", 400)),
            )
            .unwrap();
        screen.layout();
        assert_eq!(other.index(), pane.index());
        assert_ne!(other, pane);
        assert!(screen.node(pane).is_none());

        assert!(ScrollbarMetrics::compute(&screen, bar).is_none());
        let mut press = PointerEvent::pressed(105, 90);
        screen.handle_pointer_event(&mut press);
        assert!(!press.processed);
        assert_eq!(screen.scroll_offset(other, Axis::Vertical), 0.0);
    }

    #[test]
    fn test_post_layout_clamps_after_shrink() {
        let (mut screen, pane, _) = setup(400);
        screen.set_scroll_offset_y(pane, 300.0);
        let body = screen.get_node_by_id("body").unwrap();
        screen.dispose_node(body);
        screen.add_sub_node(pane, item("short", 150)).unwrap();
        screen.layout();
        assert_eq!(screen.scroll_offset(pane, Axis::Vertical), 50.0);
    }
}
