//! Inert elements.

use super::Controller;
use crate::engine::{NodeId, NodeKind, Screen};
use crate::state::keyboard::KeyboardEvent;
use crate::state::mouse::{PointerAction, PointerEvent};

pub const CONDITION_DISABLED: &str = "disabled";
pub const CONDITION_ENABLED: &str = "enabled";

/// Controller of elements that ignore events.
///
/// It never marks an event processed. It keeps events of its subtree from
/// reaching ancestor controllers, mirrors its state into the `enabled` /
/// `disabled` active conditions, and focuses a focusable owner on press.
#[derive(Debug, Default)]
pub struct IgnoreEventsController {
    disabled: bool,
}

impl IgnoreEventsController {
    pub fn new(disabled: bool) -> Self {
        Self { disabled }
    }

    pub fn set_disabled(&mut self, screen: &mut Screen, owner: NodeId, disabled: bool) {
        screen.remove_active_condition(owner, condition(self.disabled));
        self.disabled = disabled;
        screen.add_active_condition(owner, condition(self.disabled));
    }
}

fn condition(disabled: bool) -> &'static str {
    if disabled { CONDITION_DISABLED } else { CONDITION_ENABLED }
}

impl Controller for IgnoreEventsController {
    fn init(&mut self, screen: &mut Screen, owner: NodeId) {
        self.set_disabled(screen, owner, self.disabled);
    }

    fn handle_pointer_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut PointerEvent) {
        if self.disabled
            || node != owner
            || !event.is_left()
            || event.action != PointerAction::Pressed
            || !screen.is_event_belonging_to_node(owner, event)
        {
            return;
        }
        let focusable = screen
            .node(owner)
            .is_some_and(|n| matches!(n.kind(), NodeKind::Element { focusable: true, .. }));
        if focusable {
            screen.set_focused_node(owner);
        }
    }

    fn handle_keyboard_event(&mut self, _: &mut Screen, _: NodeId, _: NodeId, _: &mut KeyboardEvent) {}

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}
