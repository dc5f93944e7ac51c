//! RectTransform component - the layout rectangle of a node.
//!
//! Anchors position the node relative to its parent (unit interval, from
//! the lower-left corner); offsets adjust relative to the anchors. Anchor
//! and offset mutations stage a full-update event so a node displayed live
//! can refresh.

use serde_json::{Value, json};

use super::{PropertyAccess, StateChange, type_mismatch, unknown_property};
use crate::error::UiError;
use crate::types::{PropertyValue, Vec2, vec2};

/// The layout rectangle: anchor and offset pairs.
///
/// # Wire shape
///
/// `{"type": "RectTransform", "anchormin", "anchormax", "offsetmin",
/// "offsetmax"}`
///
/// The accessor table also exposes per-lane keys (`"anchormin.x"`,
/// `"offsetmax.y"`, ...) so bindings can drive a single coordinate.
#[derive(Debug, Clone)]
pub struct RectTransform {
    anchor_min: Vec2,
    anchor_max: Vec2,
    offset_min: Vec2,
    offset_max: Vec2,
    dirty: bool,
    cached: Value,
    events: Vec<StateChange>,
}

impl RectTransform {
    pub fn new() -> Self {
        Self {
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::ONE,
            offset_min: Vec2::ZERO,
            offset_max: Vec2::ONE,
            dirty: true,
            cached: Value::Null,
            events: Vec::new(),
        }
    }

    pub fn anchor_min(&self) -> Vec2 {
        self.anchor_min
    }

    pub fn anchor_max(&self) -> Vec2 {
        self.anchor_max
    }

    pub fn offset_min(&self) -> Vec2 {
        self.offset_min
    }

    pub fn offset_max(&self) -> Vec2 {
        self.offset_max
    }

    pub fn set_anchor_min(&mut self, value: Vec2) {
        self.dirty = true;
        self.anchor_min = value;
        self.stage_full_update();
    }

    pub fn set_anchor_max(&mut self, value: Vec2) {
        self.dirty = true;
        self.anchor_max = value;
        self.stage_full_update();
    }

    pub fn set_offset_min(&mut self, value: Vec2) {
        self.dirty = true;
        self.offset_min = value;
        self.stage_full_update();
    }

    pub fn set_offset_max(&mut self, value: Vec2) {
        self.dirty = true;
        self.offset_max = value;
        self.stage_full_update();
    }

    fn stage_full_update(&mut self) {
        self.events.push(StateChange {
            viewer: None,
            needs_full_update: true,
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
        self.cached = json!({
            "type": "RectTransform",
            "anchormin": self.anchor_min.to_wire(),
            "anchormax": self.anchor_max.to_wire(),
            "offsetmin": self.offset_min.to_wire(),
            "offsetmax": self.offset_max.to_wire(),
        });
        self.cached.clone()
    }
}

impl Default for RectTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyAccess for RectTransform {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "anchormin" => Some(self.anchor_min.into()),
            "anchormax" => Some(self.anchor_max.into()),
            "offsetmin" => Some(self.offset_min.into()),
            "offsetmax" => Some(self.offset_max.into()),
            "anchormin.x" => Some(self.anchor_min.x.into()),
            "anchormin.y" => Some(self.anchor_min.y.into()),
            "anchormax.x" => Some(self.anchor_max.x.into()),
            "anchormax.y" => Some(self.anchor_max.y.into()),
            "offsetmin.x" => Some(self.offset_min.x.into()),
            "offsetmin.y" => Some(self.offset_min.y.into()),
            "offsetmax.x" => Some(self.offset_max.x.into()),
            "offsetmax.y" => Some(self.offset_max.y.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        // Whole-vector keys take a vec2; per-lane keys take a float.
        if let Some(lane) = name.strip_suffix(".x").or_else(|| name.strip_suffix(".y")) {
            let Some(component) = value.as_f32() else {
                return Err(type_mismatch("RectTransform", name, "float", value));
            };
            let horizontal = name.ends_with(".x");
            let target = match lane {
                "anchormin" => &mut self.anchor_min,
                "anchormax" => &mut self.anchor_max,
                "offsetmin" => &mut self.offset_min,
                "offsetmax" => &mut self.offset_max,
                _ => return Err(unknown_property("RectTransform", name)),
            };
            let updated = if horizontal {
                vec2(component, target.y)
            } else {
                vec2(target.x, component)
            };
            match lane {
                "anchormin" => self.set_anchor_min(updated),
                "anchormax" => self.set_anchor_max(updated),
                "offsetmin" => self.set_offset_min(updated),
                _ => self.set_offset_max(updated),
            }
            return Ok(());
        }

        let Some(vector) = value.as_vec2() else {
            return match name {
                "anchormin" | "anchormax" | "offsetmin" | "offsetmax" => {
                    Err(type_mismatch("RectTransform", name, "vec2", value))
                }
                _ => Err(unknown_property("RectTransform", name)),
            };
        };

        match name {
            "anchormin" => self.set_anchor_min(vector),
            "anchormax" => self.set_anchor_max(vector),
            "offsetmin" => self.set_offset_min(vector),
            "offsetmax" => self.set_offset_max(vector),
            _ => return Err(unknown_property("RectTransform", name)),
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
