//! Outline component - a colored edge around the owning node.

use serde_json::{Value, json};

use super::{PropertyAccess, type_mismatch, unknown_property};
use crate::error::UiError;
use crate::types::{Color, PropertyValue, Vec2};

/// A node outline with color and per-axis distance.
///
/// # Wire shape
///
/// `{"type": "UnityEngine.UI.Outline", "color", "distance"}`
#[derive(Debug, Clone)]
pub struct Outline {
    color: Color,
    distance: Vec2,
    dirty: bool,
    cached: Value,
}

impl Outline {
    pub fn new() -> Self {
        Self {
            color: Color::WHITE,
            distance: Vec2::ZERO,
            dirty: true,
            cached: Value::Null,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn distance(&self) -> Vec2 {
        self.distance
    }

    pub fn set_color(&mut self, color: Color) {
        self.dirty = true;
        self.color = color;
    }

    pub fn set_distance(&mut self, distance: Vec2) {
        self.dirty = true;
        self.distance = distance;
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
            "type": "UnityEngine.UI.Outline",
            "color": self.color.to_wire(),
            "distance": self.distance.to_wire(),
        });
        self.cached.clone()
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for Outline {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => Some(self.color.into()),
            "distance" => Some(self.distance.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "color" => match value.as_color() {
                Some(color) => self.set_color(color),
                None => return Err(type_mismatch("Outline", name, "color", value)),
            },
            "distance" => match value.as_vec2() {
                Some(distance) => self.set_distance(distance),
                None => return Err(type_mismatch("Outline", name, "vec2", value)),
            },
            _ => return Err(unknown_property("Outline", name)),
        }
        Ok(())
    }
}
