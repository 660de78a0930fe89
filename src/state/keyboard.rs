//! Keyboard Module - Keyboard events and focused dispatch
//!
//! Keyboard events go to the controller of the focused element (or its
//! nearest ancestor with a controller). An unprocessed Tab press cycles
//! focus when the screen's `focus_cycling` option is on.
//!
//! # API
//!
//! - `KeyboardEvent::new(key)` - Key press event
//! - `KeyboardEvent::release(key)` - Key release event
//! - `Screen::handle_keyboard_event(&mut event)` - Dispatch to the focused element
//!
//! # Example
//!
//! ```ignore
//! use spark_gui::state::keyboard::{KeyboardEvent, Modifiers, KEY_TAB};
//!
//! let mut event = KeyboardEvent::with_modifiers(KEY_TAB, Modifiers::SHIFT);
//! screen.handle_keyboard_event(&mut event);
//! assert!(event.processed);
//! ```

use tracing::trace;

use crate::engine::Screen;

// =============================================================================
// TYPES
// =============================================================================

/// Key name of the tab key.
pub const KEY_TAB: &str = "Tab";
/// Key name of the space bar.
pub const KEY_SPACE: &str = " ";
/// Key name of the enter key.
pub const KEY_ENTER: &str = "Enter";

bitflags::bitflags! {
    /// Keyboard modifier state.
    ///
    /// Combine with bitwise OR: `Modifiers::CTRL | Modifiers::SHIFT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key (e.g., "a", "Enter", "ArrowUp", " ")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
    /// Set by the controller that consumed the event
    pub processed: bool,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::NONE)
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
            processed: false,
        }
    }

    /// Create a key release event
    pub fn release(key: impl Into<String>) -> Self {
        Self {
            state: KeyState::Release,
            ..Self::new(key)
        }
    }

    /// Press or auto-repeat
    pub fn is_press(&self) -> bool {
        matches!(self.state, KeyState::Press | KeyState::Repeat)
    }

    pub fn is_key(&self, key: &str) -> bool {
        self.key == key
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

impl Screen {
    /// Deliver a keyboard event to the focused element's controller.
    ///
    /// Focus notifications queued by the controller are delivered before
    /// this returns.
    pub fn handle_keyboard_event(&mut self, event: &mut KeyboardEvent) {
        self.refresh_conditions();
        trace!(key = %event.key, state = ?event.state, "keyboard event");

        if let Some(focused) = self.focused.filter(|focused| self.is_visible(*focused)) {
            if let Some(owner) = self.controller_node_for(focused) {
                self.with_controller(owner, |controller, screen| {
                    controller.handle_keyboard_event(screen, owner, focused, event)
                });
            }
        }

        if !event.processed && self.options.focus_cycling && event.is_press() && event.is_key(KEY_TAB) {
            if event.modifiers.contains(Modifiers::SHIFT) {
                self.focus_previous_node();
            } else {
                self.focus_next_node();
            }
            event.processed = true;
        }

        self.flush_focus_notifications();
    }
}
