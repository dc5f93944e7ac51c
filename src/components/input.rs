//! InputField component - viewer text entry.

use serde_json::{Value, json};

use super::{PropertyAccess, StateChange, type_mismatch, unknown_property};
use crate::error::UiError;
use crate::types::{Color, PropertyValue, TextAlign, ViewerId};

/// A text entry field; submissions arrive through the bound command.
///
/// # Wire shape
///
/// `{"type": "UnityEngine.UI.InputField", "text", "fontSize", "align",
/// "characterLimit", "color", "command"?, "password"?}`
#[derive(Debug, Clone)]
pub struct InputField {
    text: String,
    font_size: u32,
    align: TextAlign,
    character_limit: u32,
    command: Option<String>,
    password: bool,
    color: Color,
    dirty: bool,
    cached: Value,
    events: Vec<StateChange>,
}

impl InputField {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            font_size: 14,
            align: TextAlign::MiddleLeft,
            character_limit: 0,
            command: None,
            password: false,
            color: Color::WHITE,
            dirty: true,
            cached: Value::Null,
            events: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn is_password(&self) -> bool {
        self.password
    }

    pub fn character_limit(&self) -> u32 {
        self.character_limit
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

    pub fn set_character_limit(&mut self, limit: u32) {
        self.dirty = true;
        self.character_limit = limit;
    }

    pub fn set_command(&mut self, command: Option<String>) {
        self.dirty = true;
        self.command = command;
    }

    pub fn set_password(&mut self, password: bool) {
        self.dirty = true;
        self.password = password;
    }

    pub fn set_color(&mut self, color: Color) {
        self.dirty = true;
        self.color = color;
    }

    /// Stage a state-changed event for the owning node.
    ///
    /// Submission handlers stage one naming the submitting viewer; the
    /// node decides whether a live re-push is required.
    pub fn emit_state_changed(&mut self, viewer: Option<ViewerId>, needs_full_update: bool) {
        self.events.push(StateChange {
            viewer,
            needs_full_update,
        });
    }

    pub(crate) fn take_events(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.events)
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
            "type": "UnityEngine.UI.InputField",
            "text": self.text,
            "fontSize": self.font_size,
            "align": self.align.as_str(),
            "characterLimit": self.character_limit,
            "color": self.color.to_wire(),
        });

        if let Some(command) = &self.command {
            json["command"] = json!(command);
        }

        if self.password {
            json["password"] = json!(true);
        }

        self.cached = json;
        self.cached.clone()
    }
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for InputField {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "text" => Some(self.text.as_str().into()),
            "font_size" => Some(PropertyValue::Int(self.font_size as i64)),
            "character_limit" => Some(PropertyValue::Int(self.character_limit as i64)),
            "password" => Some(self.password.into()),
            "color" => Some(self.color.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "text" => match value.as_str() {
                Some(text) => self.set_text(text),
                None => return Err(type_mismatch("InputField", name, "string", value)),
            },
            "font_size" => match value.as_i64() {
                Some(size) => self.set_font_size(size.max(0) as u32),
                None => return Err(type_mismatch("InputField", name, "int", value)),
            },
            "character_limit" => match value.as_i64() {
                Some(limit) => self.set_character_limit(limit.max(0) as u32),
                None => return Err(type_mismatch("InputField", name, "int", value)),
            },
            "password" => match value.as_bool() {
                Some(password) => self.set_password(password),
                None => return Err(type_mismatch("InputField", name, "bool", value)),
            },
            "color" => match value.as_color() {
                Some(color) => self.set_color(color),
                None => return Err(type_mismatch("InputField", name, "color", value)),
            },
            _ => return Err(unknown_property("InputField", name)),
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
