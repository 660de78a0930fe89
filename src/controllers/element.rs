//! Default element behavior: activation and click-to-focus.

use super::Controller;
use crate::engine::{ActionKind, NodeId, NodeKind, Screen};
use crate::state::keyboard::{KEY_SPACE, KeyboardEvent};
use crate::state::mouse::{PointerAction, PointerEvent};

/// Emits [`ActionKind::Performed`] on a left click release or a Space press
/// and focuses its element on release.
#[derive(Debug, Default)]
pub struct ElementController;

impl ElementController {
    pub fn new() -> Self {
        Self
    }
}

impl Controller for ElementController {
    fn handle_pointer_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut PointerEvent) {
        if node != owner || !event.is_left() || !screen.is_event_belonging_to_node(owner, event) {
            return;
        }
        event.processed = true;
        if event.action == PointerAction::Released {
            screen.delegate_action_performed(owner, ActionKind::Performed);
            let focusable = screen
                .node(owner)
                .is_some_and(|n| matches!(n.kind(), NodeKind::Element { focusable: true, .. }));
            if focusable {
                screen.set_focused_node(owner);
            }
        }
    }

    fn handle_keyboard_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut KeyboardEvent) {
        if node != owner || !event.is_key(KEY_SPACE) {
            return;
        }
        event.processed = true;
        if event.is_press() {
            screen.delegate_action_performed(owner, ActionKind::Performed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NodeDesc, ScreenEvent};
    use crate::layout::Constraint;
    use crate::state::keyboard::KeyboardEvent;

    fn setup() -> (Screen, NodeId) {
        let mut screen = Screen::new("screen");
        screen.set_screen_size(100, 100);
        let root = screen.root();
        let button = screen
            .add_sub_node(
                root,
                NodeDesc::element("ok", "ok")
                    .focusable(true)
                    .with_width(Constraint::pixel(40))
                    .with_height(Constraint::pixel(20)),
            )
            .unwrap();
        screen.layout();
        (screen, button)
    }

    #[test]
    fn test_elements_get_default_controller() {
        let (screen, button) = setup();
        assert!(screen.node(button).unwrap().has_controller());
    }

    #[test]
    fn test_click_performs_and_focuses() {
        let (mut screen, button) = setup();
        let mut press = PointerEvent::pressed(5, 5);
        screen.handle_pointer_event(&mut press);
        assert!(press.processed);
        assert!(screen.drain_events().is_empty());

        let mut release = PointerEvent::released(5, 5);
        screen.handle_pointer_event(&mut release);
        assert!(release.processed);
        assert_eq!(
            screen.drain_events(),
            vec![ScreenEvent::Action { node: button, kind: ActionKind::Performed }]
        );
        assert_eq!(screen.focused_node(), Some(button));
    }

    #[test]
    fn test_click_outside_is_not_processed() {
        let (mut screen, _) = setup();
        let mut release = PointerEvent::released(50, 50);
        screen.handle_pointer_event(&mut release);
        assert!(!release.processed);
        assert_eq!(screen.focused_node(), None);
    }

    #[test]
    fn test_space_performs_on_press_only() {
        let (mut screen, button) = setup();
        screen.set_focused_node(button);
        screen.handle_keyboard_event(&mut KeyboardEvent::new(KEY_SPACE));
        let mut release = KeyboardEvent::release(KEY_SPACE);
        screen.handle_keyboard_event(&mut release);
        assert!(release.processed);
        assert_eq!(screen.drain_events().len(), 1);
    }
}
