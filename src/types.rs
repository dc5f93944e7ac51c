//! Core types for relay-ui.
//!
//! These types define the foundation that everything builds on.
//! They flow through the composition pipeline and define what the host
//! viewer understands on the wire.

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Vec2
// =============================================================================

/// A 2D vector in the unit interval, used for anchor and offset rectangles.
///
/// Componentwise equality; serializes on the wire as two space-separated
/// floats ("0.5 1").
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Wire form: space-joined components.
    pub fn to_wire(&self) -> String {
        format!("{} {}", self.x, self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Shorthand constructor.
pub const fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with float channels in [0, 1].
///
/// Componentwise equality; serializes on the wire as four space-separated
/// floats ("1 1 1 1"). The host parses this exact textual shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new RGBA color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Wire form: space-joined components.
    pub fn to_wire(&self) -> String {
        format!("{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// =============================================================================
// Text alignment
// =============================================================================

/// Text alignment within a node rectangle.
///
/// Serialized by declared name ("MiddleCenter"); the host matches on the
/// exact string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    UpperLeft,
    UpperCenter,
    UpperRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl TextAlign {
    /// The wire name of this alignment.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpperLeft => "UpperLeft",
            Self::UpperCenter => "UpperCenter",
            Self::UpperRight => "UpperRight",
            Self::MiddleLeft => "MiddleLeft",
            Self::MiddleCenter => "MiddleCenter",
            Self::MiddleRight => "MiddleRight",
            Self::LowerLeft => "LowerLeft",
            Self::LowerCenter => "LowerCenter",
            Self::LowerRight => "LowerRight",
        }
    }

    /// Parse a wire name back to an alignment.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UpperLeft" => Some(Self::UpperLeft),
            "UpperCenter" => Some(Self::UpperCenter),
            "UpperRight" => Some(Self::UpperRight),
            "MiddleLeft" => Some(Self::MiddleLeft),
            "MiddleCenter" => Some(Self::MiddleCenter),
            "MiddleRight" => Some(Self::MiddleRight),
            "LowerLeft" => Some(Self::LowerLeft),
            "LowerCenter" => Some(Self::LowerCenter),
            "LowerRight" => Some(Self::LowerRight),
            _ => None,
        }
    }
}

// =============================================================================
// Image kind
// =============================================================================

/// Fill mode for button/image surfaces, serialized by declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageKind {
    #[default]
    Simple,
    Sliced,
    Tiled,
    Filled,
}

impl ImageKind {
    /// The wire name of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Sliced => "Sliced",
            Self::Tiled => "Tiled",
            Self::Filled => "Filled",
        }
    }
}

// =============================================================================
// ViewerId
// =============================================================================

/// Identifies the remote party a representation is shown to.
///
/// State and display are tracked per viewer; the transport resolves the id
/// to an actual connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewerId(String);

impl ViewerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Property values
// =============================================================================

/// A closed union of the value types that flow through bindings and
/// viewer-state bags.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
    Float(f32),
    Bool(bool),
    Vec2(Vec2),
    Color(Color),
}

impl PropertyValue {
    /// Short name of the contained type, for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Vec2(_) => "vec2",
            Self::Color(_) => "color",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; ints coerce to float.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec2> for PropertyValue {
    fn from(value: Vec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Vec2(v) => f.write_str(&v.to_wire()),
            Self::Color(c) => f.write_str(&c.to_wire()),
        }
    }
}

/// A named bag of property values.
///
/// Ordered map so that state write-back applies keys deterministically.
pub type PropertyBag = BTreeMap<String, PropertyValue>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_wire_form() {
        assert_eq!(vec2(0.0, 0.0).to_wire(), "0 0");
        assert_eq!(vec2(0.5, 1.0).to_wire(), "0.5 1");
        assert_eq!(vec2(0.25, 0.75).to_wire(), "0.25 0.75");
    }

    #[test]
    fn test_color_wire_form() {
        assert_eq!(Color::WHITE.to_wire(), "1 1 1 1");
        assert_eq!(Color::TRANSPARENT.to_wire(), "0 0 0 0");
        assert_eq!(Color::new(0.1, 0.8, 0.5, 0.7).to_wire(), "0.1 0.8 0.5 0.7");
    }

    #[test]
    fn test_color_default_is_opaque_white() {
        assert_eq!(Color::default(), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_align_round_trip() {
        for align in [
            TextAlign::UpperLeft,
            TextAlign::MiddleCenter,
            TextAlign::LowerRight,
        ] {
            assert_eq!(TextAlign::from_name(align.as_str()), Some(align));
        }
        assert_eq!(TextAlign::from_name("Sideways"), None);
    }

    #[test]
    fn test_image_kind_names() {
        assert_eq!(ImageKind::Simple.as_str(), "Simple");
        assert_eq!(ImageKind::Filled.as_str(), "Filled");
        assert_eq!(ImageKind::default(), ImageKind::Simple);
    }

    #[test]
    fn test_property_value_coercion() {
        assert_eq!(PropertyValue::Int(3).as_f32(), Some(3.0));
        assert_eq!(PropertyValue::Float(2.5).as_i64(), Some(2));
        assert_eq!(PropertyValue::from("hi").as_str(), Some("hi"));
        assert_eq!(PropertyValue::Bool(true).as_f32(), None);
    }

    #[test]
    fn test_property_value_display() {
        assert_eq!(PropertyValue::from(vec2(0.0, 0.2)).to_string(), "0 0.2");
        assert_eq!(PropertyValue::from(Color::WHITE).to_string(), "1 1 1 1");
        assert_eq!(PropertyValue::from("x").to_string(), "x");
    }
}
