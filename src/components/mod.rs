//! Visual components - the property bags attached to render nodes.
//!
//! Each kind serializes itself lazily: mutators set a dirty flag, and
//! `serialize()` rebuilds the cached payload only when the flag is set.
//! Payload shapes are part of the wire contract (see the crate docs);
//! the host parses the exact key/value text produced here.
//!
//! Property access from bindings and viewer state goes through the
//! [`PropertyAccess`] table each kind implements - a closed, typed
//! replacement for runtime reflection.

use serde_json::Value;

use crate::error::UiError;
use crate::types::{PropertyValue, ViewerId};

pub mod button;
pub mod cursor;
pub mod image;
pub mod input;
pub mod outline;
pub mod text;
pub mod transform;

pub use button::Button;
pub use cursor::Cursor;
pub use image::{Image, RawImage};
pub use input::InputField;
pub use outline::Outline;
pub use text::Text;
pub use transform::RectTransform;

// =============================================================================
// State-changed events
// =============================================================================

/// Event staged by a component mutator for its owning render node.
///
/// The node consumes staged events after each mutation scope; an event
/// that names a viewer and requests a full update triggers an immediate
/// hide+show for that viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub viewer: Option<ViewerId>,
    pub needs_full_update: bool,
}

// =============================================================================
// Typed property access
// =============================================================================

/// Typed per-kind accessor table for named properties.
///
/// Unknown names and mismatched value types are errors the caller recovers
/// from locally (skip the key, keep going).
pub trait PropertyAccess {
    fn get_property(&self, name: &str) -> Option<PropertyValue>;

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError>;
}

/// Helper for accessor tables: type-mismatch error for `property`.
pub(crate) fn type_mismatch(
    target: &'static str,
    property: &str,
    expected: &'static str,
    got: &PropertyValue,
) -> UiError {
    UiError::PropertyType {
        target,
        property: property.to_string(),
        expected,
        got: got.type_name(),
    }
}

/// Helper for accessor tables: unknown-property error.
pub(crate) fn unknown_property(target: &'static str, property: &str) -> UiError {
    UiError::UnknownProperty {
        target,
        property: property.to_string(),
    }
}

// =============================================================================
// Component
// =============================================================================

/// Discriminates component kinds when addressing one inside a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Text,
    Image,
    RawImage,
    Button,
    InputField,
    Outline,
    Cursor,
    Transform,
}

impl ComponentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::RawImage => "RawImage",
            Self::Button => "Button",
            Self::InputField => "InputField",
            Self::Outline => "Outline",
            Self::Cursor => "Cursor",
            Self::Transform => "Transform",
        }
    }
}

/// A visual component owned by a render node.
#[derive(Debug, Clone)]
pub enum Component {
    Text(Text),
    Image(Image),
    RawImage(RawImage),
    Button(Button),
    InputField(InputField),
    Outline(Outline),
    Cursor(Cursor),
    Transform(RectTransform),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Text(_) => ComponentKind::Text,
            Self::Image(_) => ComponentKind::Image,
            Self::RawImage(_) => ComponentKind::RawImage,
            Self::Button(_) => ComponentKind::Button,
            Self::InputField(_) => ComponentKind::InputField,
            Self::Outline(_) => ComponentKind::Outline,
            Self::Cursor(_) => ComponentKind::Cursor,
            Self::Transform(_) => ComponentKind::Transform,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Self::Text(c) => c.is_dirty(),
            Self::Image(c) => c.is_dirty(),
            Self::RawImage(c) => c.is_dirty(),
            Self::Button(c) => c.is_dirty(),
            Self::InputField(c) => c.is_dirty(),
            Self::Outline(c) => c.is_dirty(),
            Self::Cursor(_) => false,
            Self::Transform(c) => c.is_dirty(),
        }
    }

    /// Serialize to the wire payload, rebuilding only when dirty.
    pub fn serialize(&mut self) -> Value {
        match self {
            Self::Text(c) => c.serialize(),
            Self::Image(c) => c.serialize(),
            Self::RawImage(c) => c.serialize(),
            Self::Button(c) => c.serialize(),
            Self::InputField(c) => c.serialize(),
            Self::Outline(c) => c.serialize(),
            Self::Cursor(c) => c.serialize(),
            Self::Transform(c) => c.serialize(),
        }
    }

    /// Drain events staged by mutators since the last call.
    pub fn take_events(&mut self) -> Vec<StateChange> {
        match self {
            Self::InputField(c) => c.take_events(),
            Self::Transform(c) => c.take_events(),
            _ => Vec::new(),
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Self::Text(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Self::Button(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Self::Button(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_input_field(&self) -> Option<&InputField> {
        match self {
            Self::InputField(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_input_field_mut(&mut self) -> Option<&mut InputField> {
        match self {
            Self::InputField(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<&RectTransform> {
        match self {
            Self::Transform(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_transform_mut(&mut self) -> Option<&mut RectTransform> {
        match self {
            Self::Transform(c) => Some(c),
            _ => None,
        }
    }
}

impl PropertyAccess for Component {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match self {
            Self::Text(c) => c.get_property(name),
            Self::Image(c) => c.get_property(name),
            Self::RawImage(c) => c.get_property(name),
            Self::Button(c) => c.get_property(name),
            Self::InputField(c) => c.get_property(name),
            Self::Outline(c) => c.get_property(name),
            Self::Cursor(c) => c.get_property(name),
            Self::Transform(c) => c.get_property(name),
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match self {
            Self::Text(c) => c.set_property(name, value),
            Self::Image(c) => c.set_property(name, value),
            Self::RawImage(c) => c.set_property(name, value),
            Self::Button(c) => c.set_property(name, value),
            Self::InputField(c) => c.set_property(name, value),
            Self::Outline(c) => c.set_property(name, value),
            Self::Cursor(c) => c.set_property(name, value),
            Self::Transform(c) => c.set_property(name, value),
        }
    }
}

impl From<Text> for Component {
    fn from(c: Text) -> Self {
        Self::Text(c)
    }
}

impl From<Image> for Component {
    fn from(c: Image) -> Self {
        Self::Image(c)
    }
}

impl From<RawImage> for Component {
    fn from(c: RawImage) -> Self {
        Self::RawImage(c)
    }
}

impl From<Button> for Component {
    fn from(c: Button) -> Self {
        Self::Button(c)
    }
}

impl From<InputField> for Component {
    fn from(c: InputField) -> Self {
        Self::InputField(c)
    }
}

impl From<Outline> for Component {
    fn from(c: Outline) -> Self {
        Self::Outline(c)
    }
}

impl From<Cursor> for Component {
    fn from(c: Cursor) -> Self {
        Self::Cursor(c)
    }
}

impl From<RectTransform> for Component {
    fn from(c: RectTransform) -> Self {
        Self::Transform(c)
    }
}
