//! Input Module - crossterm bridge
//!
//! Converts crossterm's events into the engine's pointer and keyboard events
//! so a terminal host can drive a [`Screen`] directly. Terminal cells map to
//! screen pixels one to one.
//!
//! # API
//!
//! - `convert_mouse_event` - crossterm MouseEvent to PointerEvent
//! - `convert_key_event` - crossterm KeyEvent to KeyboardEvent
//! - `poll_event` / `read_event` - Read the terminal
//! - `route_event` - Deliver to a screen
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use spark_gui::state::input;
//!
//! input::enable_mouse()?;
//! loop {
//!     if let Some(event) = input::poll_event(Duration::from_millis(16))? {
//!         input::route_event(&mut screen, event);
//!     }
//!     screen.tick();
//! }
//! ```

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers, MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent,
    MouseEventKind, poll, read,
};
use crossterm::execute;

use super::keyboard::{KEY_TAB, KeyState, KeyboardEvent, Modifiers};
use super::mouse::{MouseButton, PointerAction, PointerEvent};
use crate::engine::Screen;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for a screen
#[derive(Debug, Clone)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyboardEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert crossterm MouseEvent to our PointerEvent
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> PointerEvent {
    let x = i32::from(event.column);
    let y = i32::from(event.row);
    let pointer = match event.kind {
        MouseEventKind::Down(btn) => PointerEvent::new(PointerAction::Pressed, convert_mouse_button(btn), x, y),
        MouseEventKind::Up(btn) => PointerEvent::new(PointerAction::Released, convert_mouse_button(btn), x, y),
        MouseEventKind::Drag(btn) => PointerEvent::new(PointerAction::Dragged, convert_mouse_button(btn), x, y),
        MouseEventKind::Moved => PointerEvent::moved(x, y),
        MouseEventKind::ScrollUp => PointerEvent::wheel(x, y, 0.0, 1.0),
        MouseEventKind::ScrollDown => PointerEvent::wheel(x, y, 0.0, -1.0),
        MouseEventKind::ScrollLeft => PointerEvent::wheel(x, y, 1.0, 0.0),
        MouseEventKind::ScrollRight => PointerEvent::wheel(x, y, -1.0, 0.0),
    };
    pointer.with_modifiers(convert_modifiers(event.modifiers))
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let mut modifiers = convert_modifiers(event.modifiers);
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => KEY_TAB.to_string(),
        KeyCode::BackTab => {
            modifiers |= Modifiers::SHIFT;
            KEY_TAB.to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers,
        state,
        processed: false,
    }
}

// =============================================================================
// MODIFIER CONVERSION
// =============================================================================

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
        out |= Modifiers::META;
    }
    out
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => InputEvent::Pointer(convert_mouse_event(mouse)),
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Deliver an event to `screen`.
/// Returns true if the event was processed; a resize re-lays the screen out.
pub fn route_event(screen: &mut Screen, event: InputEvent) -> bool {
    match event {
        InputEvent::Pointer(mut pointer) => {
            screen.handle_pointer_event(&mut pointer);
            pointer.processed
        }
        InputEvent::Key(mut key) => {
            screen.handle_keyboard_event(&mut key);
            key.processed
        }
        InputEvent::Resize(w, h) => {
            screen.set_screen_size(i32::from(w), i32::from(h));
            screen.layout();
            false
        }
        InputEvent::None => false,
    }
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable mouse capture.
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable mouse capture.
pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_mouse_down() {
        let event = convert_mouse_event(mouse(MouseEventKind::Down(CrosstermMouseButton::Left), 10, 5));
        assert_eq!(event.action, PointerAction::Pressed);
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!((event.x, event.y), (10, 5));
        assert_eq!(event.modifiers, Modifiers::NONE);
        assert!(!event.processed);
    }

    #[test]
    fn test_convert_mouse_up_and_drag() {
        let up = convert_mouse_event(mouse(MouseEventKind::Up(CrosstermMouseButton::Right), 20, 15));
        assert_eq!(up.action, PointerAction::Released);
        assert_eq!(up.button, MouseButton::Right);

        let drag = convert_mouse_event(mouse(MouseEventKind::Drag(CrosstermMouseButton::Middle), 1, 1));
        assert_eq!(drag.action, PointerAction::Dragged);
        assert_eq!(drag.button, MouseButton::Middle);

        let moved = convert_mouse_event(mouse(MouseEventKind::Moved, 3, 4));
        assert_eq!(moved.action, PointerAction::Moved);
        assert_eq!(moved.button, MouseButton::None);
    }

    #[test]
    fn test_convert_mouse_scroll_directions() {
        let directions = [
            (MouseEventKind::ScrollUp, 0.0, 1.0),
            (MouseEventKind::ScrollDown, 0.0, -1.0),
            (MouseEventKind::ScrollLeft, 1.0, 0.0),
            (MouseEventKind::ScrollRight, -1.0, 0.0),
        ];
        for (kind, wheel_x, wheel_y) in directions {
            let event = convert_mouse_event(mouse(kind, 0, 0));
            assert_eq!(event.action, PointerAction::Wheel);
            assert_eq!((event.wheel_x, event.wheel_y), (wheel_x, wheel_y));
        }
    }

    #[test]
    fn test_convert_mouse_with_modifiers() {
        let mut event = mouse(MouseEventKind::Down(CrosstermMouseButton::Left), 0, 0);
        event.modifiers = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        let event = convert_mouse_event(event);
        assert!(event.modifiers.contains(Modifiers::CTRL | Modifiers::SHIFT));
        assert!(!event.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn test_convert_key_names() {
        let cases = [
            (KeyCode::Char('a'), "a"),
            (KeyCode::Char(' '), " "),
            (KeyCode::Enter, "Enter"),
            (KeyCode::Tab, "Tab"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::PageDown, "PageDown"),
            (KeyCode::F(5), "F5"),
        ];
        for (code, name) in cases {
            assert_eq!(convert_key_event(key(code, KeyModifiers::empty())).key, name);
        }
    }

    #[test]
    fn test_convert_back_tab_is_shift_tab() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::empty()));
        assert_eq!(event.key, KEY_TAB);
        assert!(event.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn test_convert_key_release() {
        let mut release = key(KeyCode::Char('x'), KeyModifiers::ALT);
        release.kind = KeyEventKind::Release;
        let event = convert_key_event(release);
        assert_eq!(event.state, KeyState::Release);
        assert_eq!(event.modifiers, Modifiers::ALT);
    }

    #[test]
    fn test_route_resize_relayouts() {
        let mut screen = Screen::new("screen");
        assert!(!route_event(&mut screen, InputEvent::Resize(80, 24)));
        assert_eq!(screen.screen_width(), 80);
        assert_eq!(screen.screen_height(), 24);
    }

    #[test]
    fn test_convert_event_ignores_focus() {
        assert!(matches!(convert_event(CrosstermEvent::FocusGained), InputEvent::None));
        assert!(matches!(convert_event(CrosstermEvent::Resize(3, 4)), InputEvent::Resize(3, 4)));
    }
}
