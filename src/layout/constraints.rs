//! Constraint language - requested and computed box constraints.
//!
//! Four kinds per axis value:
//! - `Pixel` - literal pixels
//! - `Percent` - share of the parent's content box
//! - `Auto` - the node's intrinsic content size
//! - `Star` - an equal share of the parent's remaining space, assigned by the parent
//!
//! # Example
//!
//! ```ignore
//! use spark_gui::layout::{Constraint, RequestedConstraints};
//!
//! let width = Constraint::parse("50%")?;
//! assert_eq!(width, Constraint::percent(50));
//!
//! let requested = RequestedConstraints::parse(None, None, Some("*"), Some("auto"))?;
//! assert!(requested.width.is_star());
//! ```

use std::fmt;

use crate::error::{GuiError, Result};
use crate::types::Axis;

/// Size assigned to unresolved star constraints until the parent distributes space.
pub const STAR_SENTINEL: i32 = -1;

// =============================================================================
// Constraint
// =============================================================================

/// Constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Pixel,
    Percent,
    Auto,
    Star,
}

/// A single requested constraint value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub value: i32,
}

impl Constraint {
    pub const fn pixel(value: i32) -> Self {
        Self {
            kind: ConstraintKind::Pixel,
            value,
        }
    }

    pub const fn percent(value: i32) -> Self {
        Self {
            kind: ConstraintKind::Percent,
            value,
        }
    }

    pub const AUTO: Self = Self {
        kind: ConstraintKind::Auto,
        value: 0,
    };

    pub const STAR: Self = Self {
        kind: ConstraintKind::Star,
        value: 0,
    };

    #[inline]
    pub fn is_star(&self) -> bool {
        self.kind == ConstraintKind::Star
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        self.kind == ConstraintKind::Auto
    }

    /// Parse a markup token: `*`, `auto`, `<int>%`, or `<int>`.
    ///
    /// Anything that is not star, auto, or a percentage is read as a pixel
    /// literal, so malformed integers fail here and never during layout.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if token == "*" {
            return Ok(Self::STAR);
        }
        if token.eq_ignore_ascii_case("auto") {
            return Ok(Self::AUTO);
        }
        if let Some(number) = token.strip_suffix('%') {
            return number
                .trim()
                .parse()
                .map(Self::percent)
                .map_err(|_| GuiError::InvalidConstraint {
                    token: token.to_string(),
                });
        }
        token
            .parse()
            .map(Self::pixel)
            .map_err(|_| GuiError::InvalidConstraint {
                token: token.to_string(),
            })
    }

    /// Parse an optional token, using `default` when it is missing or empty.
    pub fn parse_or(token: Option<&str>, default: Constraint) -> Result<Self> {
        match token {
            Some(value) if !value.trim().is_empty() => Self::parse(value),
            _ => Ok(default),
        }
    }

    /// Resolve a size constraint against the parent's content extent.
    ///
    /// Star resolves to [`STAR_SENTINEL`]; the parent assigns the real value later.
    pub fn resolve(&self, auto_value: i32, parent_value: i32) -> i32 {
        match self.kind {
            ConstraintKind::Pixel => self.value,
            ConstraintKind::Percent => (i64::from(parent_value) * i64::from(self.value) / 100) as i32,
            ConstraintKind::Auto => auto_value,
            ConstraintKind::Star => STAR_SENTINEL,
        }
    }

    /// Resolve a position constraint. Auto and star offsets mean "no offset".
    pub fn resolve_offset(&self, parent_value: i32) -> i32 {
        match self.kind {
            ConstraintKind::Auto | ConstraintKind::Star => 0,
            _ => self.resolve(0, parent_value),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConstraintKind::Pixel => write!(f, "{}", self.value),
            ConstraintKind::Percent => write!(f, "{}%", self.value),
            ConstraintKind::Auto => f.write_str("auto"),
            ConstraintKind::Star => f.write_str("*"),
        }
    }
}

// =============================================================================
// Requested / computed constraints
// =============================================================================

/// Constraints as requested by the tree builder. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedConstraints {
    pub left: Constraint,
    pub top: Constraint,
    pub width: Constraint,
    pub height: Constraint,
}

impl Default for RequestedConstraints {
    fn default() -> Self {
        Self {
            left: Constraint::pixel(0),
            top: Constraint::pixel(0),
            width: Constraint::AUTO,
            height: Constraint::AUTO,
        }
    }
}

impl RequestedConstraints {
    /// Fixed pixel size at the parent's origin.
    pub fn fixed(width: i32, height: i32) -> Self {
        Self {
            width: Constraint::pixel(width),
            height: Constraint::pixel(height),
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Constraint) -> Self {
        self.height = height;
        self
    }

    pub fn with_left(mut self, left: Constraint) -> Self {
        self.left = left;
        self
    }

    pub fn with_top(mut self, top: Constraint) -> Self {
        self.top = top;
        self
    }

    /// Requested size on `axis`.
    pub fn size(&self, axis: Axis) -> Constraint {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Requested position on `axis`.
    pub fn offset(&self, axis: Axis) -> Constraint {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Build from markup tokens. Missing tokens take the defaults
    /// (left/top pixel 0, width/height auto).
    pub fn parse(
        left: Option<&str>,
        top: Option<&str>,
        width: Option<&str>,
        height: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            left: Constraint::parse_or(left, Constraint::pixel(0))?,
            top: Constraint::parse_or(top, Constraint::pixel(0))?,
            width: Constraint::parse_or(width, Constraint::AUTO)?,
            height: Constraint::parse_or(height, Constraint::AUTO)?,
        })
    }
}

/// Constraints resolved by the last layout pass.
///
/// `left`/`top` are absolute and pre-scroll. The node's visual box starts at
/// `left + alignment_left`, `top + alignment_top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputedConstraints {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub alignment_left: i32,
    pub alignment_top: i32,
    pub content_alignment_left: i32,
    pub content_alignment_top: i32,
}

impl ComputedConstraints {
    /// Visual left edge (position plus parent alignment).
    #[inline]
    pub fn x(&self) -> i32 {
        self.left + self.alignment_left
    }

    /// Visual top edge (position plus parent alignment).
    #[inline]
    pub fn y(&self) -> i32 {
        self.top + self.alignment_top
    }

    pub fn size(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set_size(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    pub fn position(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    pub fn set_position(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.left = value,
            Axis::Vertical => self.top = value,
        }
    }

    pub fn alignment(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.alignment_left,
            Axis::Vertical => self.alignment_top,
        }
    }

    pub fn set_alignment(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.alignment_left = value,
            Axis::Vertical => self.alignment_top = value,
        }
    }

    /// Visual start edge on `axis`.
    pub fn start(&self, axis: Axis) -> i32 {
        self.position(axis) + self.alignment(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Constraint::parse("*").unwrap(), Constraint::STAR);
        assert_eq!(Constraint::parse("AUTO").unwrap(), Constraint::AUTO);
        assert_eq!(Constraint::parse("25%").unwrap(), Constraint::percent(25));
        assert_eq!(Constraint::parse(" 120 ").unwrap(), Constraint::pixel(120));
        assert_eq!(Constraint::parse("-4").unwrap(), Constraint::pixel(-4));
    }

    #[test]
    fn test_parse_malformed_is_error() {
        assert_eq!(
            Constraint::parse("12px"),
            Err(GuiError::InvalidConstraint {
                token: "12px".to_string()
            })
        );
        assert!(Constraint::parse("x%").is_err());
    }

    #[test]
    fn test_requested_defaults() {
        let requested = RequestedConstraints::parse(None, Some(""), None, Some("*")).unwrap();
        assert_eq!(requested.left, Constraint::pixel(0));
        assert_eq!(requested.top, Constraint::pixel(0));
        assert!(requested.width.is_auto());
        assert!(requested.height.is_star());
        assert_eq!(RequestedConstraints::default(), RequestedConstraints::parse(None, None, None, None).unwrap());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Constraint::pixel(30).resolve(7, 200), 30);
        assert_eq!(Constraint::percent(50).resolve(7, 200), 100);
        assert_eq!(Constraint::percent(33).resolve(7, 100), 33);
        assert_eq!(Constraint::AUTO.resolve(7, 200), 7);
        assert_eq!(Constraint::STAR.resolve(7, 200), STAR_SENTINEL);
    }

    #[test]
    fn test_resolve_percent_of_odd_extents() {
        assert_eq!(Constraint::percent(100).resolve(0, 53), 53);
        assert_eq!(Constraint::percent(50).resolve(0, 106), 53);
        assert_eq!(Constraint::percent(50).resolve(0, 53), 26);
        assert_eq!(Constraint::percent(100).resolve(0, i32::MAX), i32::MAX);
        assert_eq!(Constraint::percent(10).resolve_offset(37), 3);
    }

    #[test]
    fn test_resolve_offset() {
        assert_eq!(Constraint::pixel(5).resolve_offset(100), 5);
        assert_eq!(Constraint::percent(10).resolve_offset(100), 10);
        assert_eq!(Constraint::STAR.resolve_offset(100), 0);
        assert_eq!(Constraint::AUTO.resolve_offset(100), 0);
    }

    #[test]
    fn test_display_roundtrips_token() {
        for token in ["*", "auto", "50%", "12"] {
            assert_eq!(Constraint::parse(token).unwrap().to_string(), token);
        }
    }
}
