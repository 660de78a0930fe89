//! Checkbox behavior.

use tracing::debug;

use super::Controller;
use crate::engine::{NodeId, Screen};
use crate::state::keyboard::{KEY_SPACE, KeyboardEvent};
use crate::state::mouse::{PointerAction, PointerEvent};

pub const CONDITION_CHECKED: &str = "checked";
pub const CONDITION_UNCHECKED: &str = "unchecked";

const VALUE_CHECKED: &str = "1";
const VALUE_UNCHECKED: &str = "";

/// Toggles between `checked` and `unchecked` on click release or Space.
///
/// The value is `"1"` when checked and empty otherwise.
#[derive(Debug, Default)]
pub struct CheckboxController {
    checked: bool,
}

impl CheckboxController {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, screen: &mut Screen, owner: NodeId, checked: bool) {
        screen.remove_active_condition(owner, condition(self.checked));
        self.checked = checked;
        screen.add_active_condition(owner, condition(self.checked));
    }

    fn toggle(&mut self, screen: &mut Screen, owner: NodeId) {
        self.set_checked(screen, owner, !self.checked);
        debug!(node = owner.index(), checked = self.checked, "checkbox toggled");
        screen.delegate_value_changed(owner);
    }
}

fn condition(checked: bool) -> &'static str {
    if checked { CONDITION_CHECKED } else { CONDITION_UNCHECKED }
}

impl Controller for CheckboxController {
    fn init(&mut self, screen: &mut Screen, owner: NodeId) {
        self.set_checked(screen, owner, self.checked);
    }

    fn handle_pointer_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut PointerEvent) {
        if node != owner || !event.is_left() || !screen.is_event_belonging_to_node(owner, event) {
            return;
        }
        event.processed = true;
        if event.action == PointerAction::Released {
            self.toggle(screen, owner);
            screen.set_focused_node(owner);
        }
    }

    fn handle_keyboard_event(&mut self, screen: &mut Screen, owner: NodeId, node: NodeId, event: &mut KeyboardEvent) {
        if node != owner || !event.is_key(KEY_SPACE) {
            return;
        }
        event.processed = true;
        if event.is_press() {
            self.toggle(screen, owner);
        }
    }

    fn value(&self) -> Option<&str> {
        Some(if self.checked { VALUE_CHECKED } else { VALUE_UNCHECKED })
    }

    fn set_value(&mut self, screen: &mut Screen, owner: NodeId, value: &str) {
        self.set_checked(screen, owner, value == VALUE_CHECKED);
    }
}
