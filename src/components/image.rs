//! Image components - solid fills and remote images.

use serde_json::{Value, json};

use super::{PropertyAccess, type_mismatch, unknown_property};
use crate::error::UiError;
use crate::types::{Color, PropertyValue};

// =============================================================================
// Image
// =============================================================================

/// A solid color fill.
///
/// # Wire shape
///
/// `{"type": "UnityEngine.UI.Image", "color"}`
#[derive(Debug, Clone)]
pub struct Image {
    color: Color,
    dirty: bool,
    cached: Value,
}

impl Image {
    pub fn new() -> Self {
        Self {
            color: Color::WHITE,
            dirty: true,
            cached: Value::Null,
        }
    }

    /// A fully transparent image - the invisible panel composites use as a
    /// positioning background.
    pub fn panel() -> Self {
        let mut image = Self::new();
        image.set_color(Color::TRANSPARENT);
        image
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.dirty = true;
        self.color = color;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn serialize(&mut self) -> Value {
        if !self.dirty {
            return self.cached.clone();
        }

        self.dirty = false;
        self.cached = json!({
            "type": "UnityEngine.UI.Image",
            "color": self.color.to_wire(),
        });
        self.cached.clone()
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for Image {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => Some(self.color.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "color" => match value.as_color() {
                Some(color) => self.set_color(color),
                None => return Err(type_mismatch("Image", name, "color", value)),
            },
            _ => return Err(unknown_property("Image", name)),
        }
        Ok(())
    }
}

// =============================================================================
// RawImage
// =============================================================================

/// An image fetched by the host from a URL.
///
/// # Wire shape
///
/// `{"type": "UnityEngine.UI.RawImage", "color", "fadeIn"?, "url"?}`
#[derive(Debug, Clone)]
pub struct RawImage {
    url: Option<String>,
    color: Color,
    fade_in: f32,
    dirty: bool,
    cached: Value,
}

impl RawImage {
    pub fn new() -> Self {
        Self {
            url: None,
            color: Color::WHITE,
            fade_in: 0.0,
            dirty: true,
            cached: Value::Null,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.dirty = true;
        self.url = Some(url.into());
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
            "type": "UnityEngine.UI.RawImage",
            "color": self.color.to_wire(),
        });

        if self.fade_in != 0.0 {
            json["fadeIn"] = json!(self.fade_in);
        }

        if let Some(url) = &self.url {
            json["url"] = json!(url);
        }

        self.cached = json;
        self.cached.clone()
    }
}

impl Default for RawImage {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for RawImage {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "url" => self.url.as_deref().map(PropertyValue::from),
            "color" => Some(self.color.into()),
            "fade_in" => Some(self.fade_in.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "url" => match value.as_str() {
                Some(url) => self.set_url(url),
                None => return Err(type_mismatch("RawImage", name, "string", value)),
            },
            "color" => match value.as_color() {
                Some(color) => self.set_color(color),
                None => return Err(type_mismatch("RawImage", name, "color", value)),
            },
            "fade_in" => match value.as_f32() {
                Some(seconds) => self.set_fade_in(seconds),
                None => return Err(type_mismatch("RawImage", name, "float", value)),
            },
            _ => return Err(unknown_property("RawImage", name)),
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
