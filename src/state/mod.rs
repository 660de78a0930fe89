//! State Module - Runtime interaction state
//!
//! Everything that changes between layouts lives here, as `impl Screen`
//! blocks over the screen's node arena:
//!
//! - **Visibility** - show-on / hide-on evaluation against element conditions
//! - **Mouse** - Pointer events, scroll-compensated hit testing, floating precedence
//! - **Keyboard** - Keyboard events, focused dispatch, Tab cycling
//! - **Focus** - Single focused element, deferred lost/gained notifications
//! - **Scroll** - Clamped offsets, wheel scrolling, minimal reveal
//! - **Input** - crossterm bridge

pub mod focus;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod scroll;
pub mod visibility;

pub use input::{InputEvent, convert_key_event, convert_mouse_event, route_event};
pub use keyboard::{KEY_ENTER, KEY_SPACE, KEY_TAB, KeyState, KeyboardEvent, Modifiers};
pub use mouse::{MouseButton, PointerAction, PointerEvent};
pub use scroll::SCROLL_CONTENT_SUFFIX;
pub use visibility::evaluate_conditions;
