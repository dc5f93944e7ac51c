//! Binding engine - one-directional wires from model properties to
//! component properties.
//!
//! A [`BindingSet`] maps source property names to [`Binding`]s. Binding a
//! model pushes current values immediately, then installs a change listener
//! that re-pushes on every notification of a bound property. One model may
//! fan out to any number of targets; a miss on one target is recovered
//! locally and never stops the others.

use std::collections::BTreeMap;

use tracing::warn;

use crate::components::{ComponentKind, PropertyAccess};
use crate::model::Model;
use crate::node::Node;
use crate::types::PropertyValue;

// =============================================================================
// BindTarget
// =============================================================================

/// Addresses one property of one component inside one node.
pub struct BindTarget {
    node: Node,
    component: ComponentKind,
    property: String,
}

impl BindTarget {
    pub fn new(node: &Node, component: ComponentKind, property: impl Into<String>) -> Self {
        Self {
            node: node.clone(),
            component,
            property: property.into(),
        }
    }

    /// Write `value` through the component's accessor table.
    ///
    /// Misses are logged and swallowed: a missing component or unknown
    /// property skips this target only.
    pub fn apply(&self, value: &PropertyValue) {
        self.node.with(|node| {
            let name = node.name().to_string();
            match node.component_mut(self.component) {
                Some(component) => {
                    if let Err(err) = component.set_property(&self.property, value) {
                        warn!(node = %name, error = %err, "binding push skipped");
                    }
                }
                None => {
                    warn!(
                        node = %name,
                        component = self.component.as_str(),
                        "binding target component missing"
                    );
                }
            }
        });
    }
}

// =============================================================================
// Binding
// =============================================================================

/// Converts values flowing through a binding.
pub type Converter = Box<dyn Fn(PropertyValue) -> PropertyValue>;

/// One wire: a target plus an optional value converter.
pub struct Binding {
    target: BindTarget,
    converter: Option<Converter>,
}

impl Binding {
    pub fn new(target: BindTarget) -> Self {
        Self {
            target,
            converter: None,
        }
    }

    pub fn with_converter(
        target: BindTarget,
        converter: impl Fn(PropertyValue) -> PropertyValue + 'static,
    ) -> Self {
        Self {
            target,
            converter: Some(Box::new(converter)),
        }
    }

    fn push(&self, value: PropertyValue) {
        let value = match &self.converter {
            Some(convert) => convert(value),
            None => value,
        };
        self.target.apply(&value);
    }
}

/// Source property name -> binding.
#[derive(Default)]
pub struct BindingSet {
    relations: BTreeMap<String, Binding>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, property: impl Into<String>, binding: Binding) -> Self {
        self.relations.insert(property.into(), binding);
        self
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

// =============================================================================
// bind / unbind
// =============================================================================

/// Wire a model to a set of targets.
///
/// For every model property named in `relations`, the current value is
/// pushed immediately (through the converter when present); afterwards one
/// listener re-pushes each bound property on change. Calling `bind` again
/// with another set adds an independent fan-out.
pub fn bind(model: &Model, relations: BindingSet) {
    for (name, binding) in &relations.relations {
        if let Some(value) = model.get(name) {
            binding.push(value);
        }
    }

    model.subscribe(move |name, value| {
        if let Some(binding) = relations.relations.get(name) {
            binding.push(value.clone());
        }
    });
}

/// Detach every binding from a model at once.
///
/// Coarse-grained: all listeners for the model are cleared, across all
/// properties and all `bind` calls.
pub fn unbind(model: &Model) {
    model.clear_subscribers();
}

// =============================================================================
// Tests
// =============================================================================
