//! # spark-gui
//!
//! Retained-mode GUI layout and interaction engine for tooling screens.
//!
//! ## Architecture
//!
//! A [`Screen`] owns a tree of nodes in an arena. Nodes are addressed by
//! [`NodeId`] handles and carry requested constraints (pixel, percent, auto,
//! star), per-node visibility predicates, and an optional [`Controller`].
//!
//! One frame:
//! ```text
//! events → Screen::handle_*_event → Controllers (conditions, focus, scroll)
//!        → Screen::layout → computed boxes
//!        → Screen::render → DrawCommands → rendering backend
//! ```
//!
//! The engine is single-threaded and frame-driven. Layout, render, and event
//! dispatch never fail; only tree construction returns errors.
//!
//! ## Modules
//!
//! - [`types`] - Colors, insets, alignment and flow enums, axes
//! - [`engine`] - Node model, arena, id registry, screen
//! - [`layout`] - Constraint language and the two-pass solver
//! - [`state`] - Visibility, pointer/keyboard dispatch, focus, scrolling, crossterm input
//! - [`controllers`] - Per-node behavior objects
//! - [`pipeline`] - Render traversal and draw commands
//!
//! ## Example
//!
//! ```ignore
//! use spark_gui::{Arrangement, Constraint, NodeDesc, PointerEvent, Screen};
//!
//! let mut screen = Screen::new("settings");
//! screen.set_screen_size(300, 100);
//! let root = screen.root();
//! let row = screen.add_sub_node(
//!     root,
//!     NodeDesc::layout("row", Arrangement::Horizontal).with_width(Constraint::pixel(300)),
//! )?;
//! screen.add_sub_node(row, NodeDesc::element("ok", "ok").with_width(Constraint::STAR))?;
//! screen.layout();
//!
//! let mut click = PointerEvent::released(10, 5);
//! screen.handle_pointer_event(&mut click);
//! for event in screen.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod controllers;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{GuiError, Result};

pub use engine::{
    ActionKind, CONDITION_ALWAYS, CONDITION_CLICK, CONDITION_MOUSEOVER, Node, NodeConditions, NodeDesc, NodeId,
    NodeKind, Screen, ScreenEvent, ScreenOptions,
};

pub use layout::{
    ComputedConstraints, Constraint, ConstraintKind, RequestedConstraints, STAR_SENTINEL, distribute_star,
};

pub use state::{
    InputEvent, KeyState, KeyboardEvent, Modifiers, MouseButton, PointerAction, PointerEvent, evaluate_conditions,
    route_event,
};

pub use controllers::{
    CheckboxController, Controller, ElementController, IgnoreEventsController, ScrollbarController,
    ScrollbarMetrics, ScrollbarState,
};

pub use pipeline::{DrawCommand, DrawList, Quad, RenderContext};
