//! Text component - a styled text label.

use serde_json::{Value, json};

use super::{PropertyAccess, type_mismatch, unknown_property};
use crate::error::UiError;
use crate::types::{Color, PropertyValue, TextAlign};

/// Displayed text with size, alignment, and color.
///
/// # Wire shape
///
/// `{"type": "UnityEngine.UI.Text", "text", "fontSize", "align", "color",
/// "fadeIn"?}` - `fadeIn` only when non-zero.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    font_size: u32,
    align: TextAlign,
    color: Color,
    fade_in: f32,
    dirty: bool,
    cached: Value,
}

impl Text {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            font_size: 14,
            align: TextAlign::MiddleCenter,
            color: Color::WHITE,
            fade_in: 0.0,
            dirty: true,
            cached: Value::Null,
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut component = Self::new();
        component.set_text(text);
        component
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn fade_in(&self) -> f32 {
        self.fade_in
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.dirty = true;
        self.text = text.into();
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.dirty = true;
        self.font_size = size;
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.dirty = true;
        self.align = align;
    }

    pub fn set_color(&mut self, color: Color) {
        self.dirty = true;
        self.color = color;
    }

    pub fn set_fade_in(&mut self, seconds: f32) {
        self.dirty = true;
        self.fade_in = seconds;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn serialize(&mut self) -> Value {
        if !self.dirty {
            return self.cached.clone();
        }

        self.dirty = false;

        let mut json = json!({
            "type": "UnityEngine.UI.Text",
            "text": self.text,
            "fontSize": self.font_size,
            "align": self.align.as_str(),
            "color": self.color.to_wire(),
        });

        if self.fade_in != 0.0 {
            json["fadeIn"] = json!(self.fade_in);
        }

        self.cached = json;
        self.cached.clone()
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for Text {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "text" => Some(self.text.as_str().into()),
            "font_size" => Some(PropertyValue::Int(self.font_size as i64)),
            "align" => Some(self.align.as_str().into()),
            "color" => Some(self.color.into()),
            "fade_in" => Some(self.fade_in.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "text" => match value.as_str() {
                Some(text) => self.set_text(text),
                None => return Err(type_mismatch("Text", name, "string", value)),
            },
            "font_size" => match value.as_i64() {
                Some(size) => self.set_font_size(size.max(0) as u32),
                None => return Err(type_mismatch("Text", name, "int", value)),
            },
            "align" => match value.as_str().and_then(TextAlign::from_name) {
                Some(align) => self.set_align(align),
                None => return Err(type_mismatch("Text", name, "alignment name", value)),
            },
            "color" => match value.as_color() {
                Some(color) => self.set_color(color),
                None => return Err(type_mismatch("Text", name, "color", value)),
            },
            "fade_in" => match value.as_f32() {
                Some(seconds) => self.set_fade_in(seconds),
                None => return Err(type_mismatch("Text", name, "float", value)),
            },
            _ => return Err(unknown_property("Text", name)),
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payload_shape() {
        let mut text = Text::new();
        let json = text.serialize();

        assert_eq!(json["type"], "UnityEngine.UI.Text");
        assert_eq!(json["text"], "");
        assert_eq!(json["fontSize"], 14);
        assert_eq!(json["align"], "MiddleCenter");
        assert_eq!(json["color"], "1 1 1 1");
        assert!(json.get("fadeIn").is_none());
    }

    #[test]
    fn test_serialize_twice_without_mutation_is_cached() {
        let mut text = Text::with_text("hello");
        let first = text.serialize();
        assert!(!text.is_dirty());

        let second = text.serialize();
        assert_eq!(first, second);
        assert!(!text.is_dirty());
    }

    #[test]
    fn test_mutation_marks_dirty_and_rebuilds() {
        let mut text = Text::new();
        text.serialize();
        assert!(!text.is_dirty());

        text.set_text("changed");
        assert!(text.is_dirty());
        assert_eq!(text.serialize()["text"], "changed");
    }

    #[test]
    fn test_fade_in_serialized_only_when_set() {
        let mut text = Text::new();
        text.set_fade_in(0.5);
        assert_eq!(text.serialize()["fadeIn"], 0.5);
    }

    #[test]
    fn test_property_access() {
        let mut text = Text::new();
        text.set_property("text", &"bound".into()).unwrap();
        assert_eq!(text.text(), "bound");
        assert_eq!(text.get_property("text"), Some("bound".into()));

        let err = text.set_property("text", &PropertyValue::Int(3)).unwrap_err();
        assert!(matches!(err, UiError::PropertyType { .. }));

        let err = text.set_property("missing", &"x".into()).unwrap_err();
        assert!(matches!(err, UiError::UnknownProperty { .. }));
    }
}
