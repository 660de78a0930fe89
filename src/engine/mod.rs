//! Engine - node arena, id registry, and the screen that owns them.
//!
//! Nodes are not shared objects. A [`Screen`] owns every node of its tree in
//! an arena and hands out [`NodeId`] handles:
//!
//! ```text
//! Index 0: Screen  (parent=None, children=[1])
//! Index 1: Layout  (parent=0,    children=[2, 3], arrangement=Vertical)
//! Index 2: Element (parent=1,    controller=CheckboxController)
//! Index 3: Text    (parent=1)
//! ```
//!
//! Parent links are plain handles, so the tree has a single owner and no
//! reference cycles. Disposed slots are reused under a new generation.

mod conditions;
mod node;
mod registry;
mod screen;

pub use conditions::{CONDITION_ALWAYS, CONDITION_CLICK, CONDITION_MOUSEOVER, NodeConditions};
pub use node::{Node, NodeDesc, NodeId, NodeKind};
pub use screen::{ActionKind, DEFAULT_WHEEL_SCROLL_STEP, Screen, ScreenEvent, ScreenOptions};
