//! Core types for spark-gui.
//!
//! Colors, insets, clip rectangles, and the small enums every node carries.
//! All of them can be parsed from the string tokens the markup collaborator
//! hands over; parsing is the only place where these types can fail.

use std::str::FromStr;

use crate::error::{GuiError, Result};

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Transparent color. Backgrounds with this color are not painted.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Named colors accepted by [`Rgba::parse`].
    const NAMED: [(&'static str, Rgba); 6] = [
        ("white", Self::WHITE),
        ("black", Self::BLACK),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("transparent", Self::TRANSPARENT),
    ];

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Normalized channels for the renderer (`[r, g, b, a]` in 0.0..=1.0).
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Parse hex digits (`RRGGBB` or `RRGGBBAA`, `#` prefix optional).
    ///
    /// Returns None for invalid format.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_gui::types::Rgba;
    ///
    /// let red = Rgba::from_hex("#ff0000").unwrap();
    /// assert_eq!(red, Rgba::rgb(255, 0, 0));
    ///
    /// let semi = Rgba::from_hex("#ff000080").unwrap();
    /// assert_eq!(semi, Rgba::new(255, 0, 0, 128));
    ///
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }

    /// Parse a markup color token.
    ///
    /// Accepts the named colors (case-insensitive) and `#RRGGBB` / `#RRGGBBAA`.
    /// The `#` is mandatory for hex notation.
    pub fn parse(input: &str) -> Result<Self> {
        let value = input.trim();
        if let Some((_, color)) = Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
        {
            return Ok(*color);
        }
        if !value.starts_with('#') {
            return Err(GuiError::InvalidColor {
                value: input.to_string(),
            });
        }
        Self::from_hex(value).ok_or_else(|| GuiError::InvalidColor {
            value: input.to_string(),
        })
    }

    /// Parse an optional color token, falling back to `default` when empty.
    pub fn parse_or(input: Option<&str>, default: Rgba) -> Result<Self> {
        match input {
            Some(value) if !value.trim().is_empty() => Self::parse(value),
            _ => Ok(default),
        }
    }
}

// =============================================================================
// ClipRect - Scissor area for overflow handling
// =============================================================================

/// A clipping rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    /// Create a new clip rect.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        if x2 > x1 && y2 > y1 {
            Some(ClipRect {
                x: x1,
                y: y1,
                width: x2 - x1,
                height: y2 - y1,
            })
        } else {
            None
        }
    }
}

// =============================================================================
// Insets
// =============================================================================

fn parse_pixel(token: Option<&str>, default: i32) -> Result<i32> {
    match token.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| GuiError::InvalidPixelValue {
            token: value.to_string(),
        }),
    }
}

/// Four-sided pixel inset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Uniform padding on all sides.
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Left or top padding.
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Right or bottom padding.
    pub fn trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Build from markup tokens: `all` first, then per-side overrides.
    pub fn parse(
        all: Option<&str>,
        left: Option<&str>,
        top: Option<&str>,
        right: Option<&str>,
        bottom: Option<&str>,
    ) -> Result<Self> {
        let all = parse_pixel(all, 0)?;
        Ok(Self {
            left: parse_pixel(left, all)?,
            top: parse_pixel(top, all)?,
            right: parse_pixel(right, all)?,
            bottom: parse_pixel(bottom, all)?,
        })
    }
}

/// Four-sided pixel inset with one color per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left_color: Rgba,
    pub top_color: Rgba,
    pub right_color: Rgba,
    pub bottom_color: Rgba,
}

impl Default for Border {
    fn default() -> Self {
        Self::all(0, Rgba::BLACK)
    }
}

impl Border {
    /// Uniform border on all sides.
    pub const fn all(width: i32, color: Rgba) -> Self {
        Self {
            left: width,
            top: width,
            right: width,
            bottom: width,
            left_color: color,
            top_color: color,
            right_color: color,
            bottom_color: color,
        }
    }

    /// Total horizontal border.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical border.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Left or top border.
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Right or bottom border.
    pub fn trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Build from markup tokens. `sizes` and `colors` are `[all, left, top, right, bottom]`;
    /// the `all` token seeds every side and per-side tokens override it.
    pub fn parse(sizes: [Option<&str>; 5], colors: [Option<&str>; 5]) -> Result<Self> {
        let [all, left, top, right, bottom] = sizes;
        let all = parse_pixel(all, 0)?;
        let [all_color, left_color, top_color, right_color, bottom_color] = colors;
        let all_color = Rgba::parse_or(all_color, Rgba::BLACK)?;
        Ok(Self {
            left: parse_pixel(left, all)?,
            top: parse_pixel(top, all)?,
            right: parse_pixel(right, all)?,
            bottom: parse_pixel(bottom, all)?,
            left_color: Rgba::parse_or(left_color, all_color)?,
            top_color: Rgba::parse_or(top_color, all_color)?,
            right_color: Rgba::parse_or(right_color, all_color)?,
            bottom_color: Rgba::parse_or(bottom_color, all_color)?,
        })
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Parse helper shared by the markup enums: empty tokens select the default,
/// everything else is matched case-insensitively.
fn parse_enum<T: Copy + Default>(
    kind: &'static str,
    value: &str,
    table: &[(&str, T)],
) -> Result<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map(|(_, v)| *v)
        .ok_or_else(|| GuiError::InvalidEnum {
            kind,
            value: value.to_string(),
        })
}

/// Whether a node participates in its parent's box flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Stacked, clipped, and hit-tested inside the parent.
    #[default]
    Integrated,
    /// Positioned like an integrated node but rendered last and not clipped by
    /// its logical parent (popups, dropdown lists).
    Floating,
}

impl FromStr for Flow {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self> {
        parse_enum(
            "flow",
            s,
            &[("integrated", Self::Integrated), ("floating", Self::Floating)],
        )
    }
}

/// Horizontal alignment of children (parents) or content (content nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for HorizontalAlignment {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self> {
        parse_enum(
            "horizontal alignment",
            s,
            &[
                ("left", Self::Left),
                ("center", Self::Center),
                ("right", Self::Right),
            ],
        )
    }
}

/// Vertical alignment of children (parents) or content (content nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl FromStr for VerticalAlignment {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self> {
        parse_enum(
            "vertical alignment",
            s,
            &[
                ("top", Self::Top),
                ("center", Self::Center),
                ("bottom", Self::Bottom),
            ],
        )
    }
}

/// Both alignments of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignments {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Alignments {
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn parse(horizontal: &str, vertical: &str) -> Result<Self> {
        Ok(Self {
            horizontal: horizontal.parse()?,
            vertical: vertical.parse()?,
        })
    }
}

/// How a layout node arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Stack children top to bottom; governs height.
    Vertical,
    /// Stack children left to right; governs width.
    Horizontal,
    /// Overlay children; both axes aligned independently.
    #[default]
    None,
}

impl Arrangement {
    /// The axis this arrangement distributes star space along.
    pub fn governing_axis(self) -> Option<Axis> {
        match self {
            Self::Vertical => Some(Axis::Vertical),
            Self::Horizontal => Some(Axis::Horizontal),
            Self::None => None,
        }
    }
}

impl FromStr for Arrangement {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self> {
        parse_enum(
            "alignment",
            s,
            &[
                ("vertical", Self::Vertical),
                ("horizontal", Self::Horizontal),
                ("none", Self::None),
            ],
        )
    }
}

/// Overflow behavior per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Hidden,
    DownsizeChildren,
    /// Children are shifted by the parent's render offset on this axis.
    Scroll,
}

impl FromStr for Overflow {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self> {
        parse_enum(
            "overflow",
            s,
            &[
                ("hidden", Self::Hidden),
                ("downsize-children", Self::DownsizeChildren),
                ("scroll", Self::Scroll),
            ],
        )
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
