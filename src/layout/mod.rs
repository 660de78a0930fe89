//! Layout Module - constraint resolution for the node tree.
//!
//! Two passes per parent:
//!
//! 1. Resolve every child's own constraints (pixel, percent, auto); stars
//!    stay at [`STAR_SENTINEL`].
//! 2. Distribute the remaining governing-axis space among star children,
//!    integer-exact, then align and push positions down the tree.
//!
//! # Example
//!
//! ```ignore
//! use spark_gui::{Screen, NodeDesc, Arrangement, Constraint};
//!
//! let mut screen = Screen::new("main");
//! screen.set_screen_size(300, 100);
//! let root = screen.root();
//! let row = screen.add_sub_node(root, NodeDesc::layout("row", Arrangement::Horizontal)
//!     .with_width(Constraint::pixel(300)))?;
//! screen.add_sub_node(row, NodeDesc::space("a").with_width(Constraint::pixel(50)))?;
//! screen.add_sub_node(row, NodeDesc::space("b").with_width(Constraint::STAR))?;
//! screen.layout();
//! ```

pub mod constraints;
pub mod content;
pub mod solver;

pub use constraints::{ComputedConstraints, Constraint, ConstraintKind, RequestedConstraints, STAR_SENTINEL};
pub use content::{auto_size, content_size};
pub use solver::distribute_star;
