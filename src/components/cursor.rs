//! Cursor component - requests a visible cursor while the UI is shown.

use serde_json::{Value, json};

use super::{PropertyAccess, unknown_property};
use crate::error::UiError;
use crate::types::PropertyValue;

/// Marker component; constant payload, never dirty.
///
/// # Wire shape
///
/// `{"type": "NeedsCursor"}`
#[derive(Debug, Clone, Default)]
pub struct Cursor;

impl Cursor {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&mut self) -> Value {
        json!({ "type": "NeedsCursor" })
    }
}

impl PropertyAccess for Cursor {
    fn get_property(&self, _name: &str) -> Option<PropertyValue> {
        None
    }

    fn set_property(&mut self, name: &str, _value: &PropertyValue) -> Result<(), UiError> {
        Err(unknown_property("Cursor", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_payload() {
        let mut cursor = Cursor::new();
        assert_eq!(cursor.serialize(), json!({ "type": "NeedsCursor" }));
    }
}
