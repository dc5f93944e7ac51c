//! Button component - a clickable surface.

use serde_json::{Value, json};

use super::{PropertyAccess, type_mismatch, unknown_property};
use crate::error::UiError;
use crate::types::{Color, ImageKind, PropertyValue};

/// A clickable surface with an optional bound command.
///
/// The `command` field carries the registered command name the host fires
/// on click; `close_target` names a node the host hides client-side when
/// the button is pressed.
///
/// # Wire shape
///
/// `{"type": "UnityEngine.UI.Button", "imagetype", "color", "fadeIn"?,
/// "close"?, "command"?}`
#[derive(Debug, Clone)]
pub struct Button {
    image_kind: ImageKind,
    color: Color,
    command: Option<String>,
    close_target: Option<String>,
    fade_in: f32,
    dirty: bool,
    cached: Value,
}

impl Button {
    pub fn new() -> Self {
        Self {
            image_kind: ImageKind::Simple,
            color: Color::WHITE,
            command: None,
            close_target: None,
            fade_in: 0.0,
            dirty: true,
            cached: Value::Null,
        }
    }

    pub fn image_kind(&self) -> ImageKind {
        self.image_kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn close_target(&self) -> Option<&str> {
        self.close_target.as_deref()
    }

    pub fn set_image_kind(&mut self, kind: ImageKind) {
        self.dirty = true;
        self.image_kind = kind;
    }

    pub fn set_color(&mut self, color: Color) {
        self.dirty = true;
        self.color = color;
    }

    pub fn set_command(&mut self, command: Option<String>) {
        self.dirty = true;
        self.command = command;
    }

    pub fn set_close_target(&mut self, node_name: Option<String>) {
        self.dirty = true;
        self.close_target = node_name;
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
            "type": "UnityEngine.UI.Button",
            "imagetype": self.image_kind.as_str(),
            "color": self.color.to_wire(),
        });

        if self.fade_in != 0.0 {
            json["fadeIn"] = json!(self.fade_in);
        }

        if let Some(close) = &self.close_target {
            json["close"] = json!(close);
        }

        if let Some(command) = &self.command {
            json["command"] = json!(command);
        }

        self.cached = json;
        self.cached.clone()
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for Button {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => Some(self.color.into()),
            "close" => self.close_target.as_deref().map(PropertyValue::from),
            "fade_in" => Some(self.fade_in.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "color" => match value.as_color() {
                Some(color) => self.set_color(color),
                None => return Err(type_mismatch("Button", name, "color", value)),
            },
            "close" => match value.as_str() {
                Some(node) => self.set_close_target(Some(node.to_string())),
                None => return Err(type_mismatch("Button", name, "string", value)),
            },
            "fade_in" => match value.as_f32() {
                Some(seconds) => self.set_fade_in(seconds),
                None => return Err(type_mismatch("Button", name, "float", value)),
            },
            _ => return Err(unknown_property("Button", name)),
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
        let mut button = Button::new();
        let json = button.serialize();

        assert_eq!(json["type"], "UnityEngine.UI.Button");
        assert_eq!(json["imagetype"], "Simple");
        assert_eq!(json["color"], "1 1 1 1");
        assert!(json.get("command").is_none());
        assert!(json.get("close").is_none());
    }

    #[test]
    fn test_command_and_close_serialized_when_set() {
        let mut button = Button::new();
        button.set_command(Some("ui_button_click_7".to_string()));
        button.set_close_target(Some("window_a".to_string()));

        let json = button.serialize();
        assert_eq!(json["command"], "ui_button_click_7");
        assert_eq!(json["close"], "window_a");
    }

    #[test]
    fn test_cached_until_mutated() {
        let mut button = Button::new();
        button.serialize();
        assert!(!button.is_dirty());

        button.set_image_kind(ImageKind::Tiled);
        assert!(button.is_dirty());
        assert_eq!(button.serialize()["imagetype"], "Tiled");
    }
}
