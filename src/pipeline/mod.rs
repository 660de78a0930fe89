//! Pipeline Module - turning a laid-out screen into paint operations.
//!
//! Per frame the host runs:
//!
//! ```text
//! input → handle_pointer_event / handle_keyboard_event
//!       → layout (after structural or visibility changes)
//!       → render + render_floating_nodes → backend
//! ```
//!
//! The backend is external. It receives [`DrawCommand`]s through a
//! [`RenderContext`]; [`DrawList`] records them for backends that batch.

pub mod render;

pub use render::{BorderSide, DrawCommand, DrawList, Quad, RenderContext};
