//! Composite elements - reusable building blocks that expand into render
//! nodes.
//!
//! An element composes nodes (and possibly child elements) and flattens
//! them through `render()`. The flattened order is stable and topological:
//! a parent node's name always appears before any node that references it
//! as parent, which the host composition requires.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::binding::{BindTarget, Binding, BindingSet, bind};
use crate::components::{ComponentKind, unknown_property};
use crate::error::UiError;
use crate::model::BindSource;
use crate::node::Node;
use crate::types::{PropertyBag, PropertyValue, Vec2};

pub mod button;
pub mod grid;
pub mod label;
pub mod list;
pub mod progress;
pub mod window;

pub use button::Button;
pub use grid::Grid;
pub use label::Label;
pub use list::List;
pub use progress::ProgressBar;
pub use window::Window;

// =============================================================================
// Element trait
// =============================================================================

/// A composite, reusable UI building block.
///
/// Render order, identity, property tables, and disposal are the whole
/// capability set; everything else is variant-specific.
pub trait Element {
    /// Variant name, one of the identity inputs.
    fn kind(&self) -> &'static str;

    /// Per-instance discriminator, assigned at construction.
    fn discriminator(&self) -> u64;

    /// Parent node name this element attaches under (delegated to an inner
    /// node).
    fn parent(&self) -> String;

    fn set_parent(&mut self, parent: &str);

    /// The element's layout rectangle, when it has one.
    fn transform(&self) -> Option<TransformRef> {
        None
    }

    /// Attach a model source. Variants without a bindable surface ignore
    /// the source.
    fn bind(&mut self, source: BindSource) {
        let _ = source;
        debug!(kind = self.kind(), "element does not accept a bind source");
    }

    /// Flatten into render nodes, parents before children.
    fn render(&self) -> Vec<Node>;

    /// Duplicate this element as a fresh instance, without event wiring.
    ///
    /// `None` when the variant does not support copying.
    fn copy(&self) -> Option<Box<dyn Element>> {
        None
    }

    /// Release externally-registered resources (command registrations).
    ///
    /// Omitting this call leaks registered commands; it is idempotent.
    fn dispose(&mut self) {}

    /// Snapshot of the externally-visible properties.
    fn properties(&self) -> PropertyBag {
        PropertyBag::new()
    }

    /// Write one named property back onto the live element.
    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        let _ = value;
        Err(unknown_property_for(self.kind(), name))
    }
}

/// A shareable element handle; elements may appear in several composites
/// and representations at once.
pub type ElementRef = Rc<RefCell<dyn Element>>;

/// Wrap an element for sharing.
pub fn shared(element: impl Element + 'static) -> ElementRef {
    Rc::new(RefCell::new(element))
}

fn unknown_property_for(kind: &'static str, name: &str) -> UiError {
    unknown_property(kind, name)
}

// =============================================================================
// TransformRef
// =============================================================================

/// Facade over the rect transform inside an element's primary node.
///
/// Reads fall back to defaults when the node carries no transform; writes
/// on such a node are dropped.
#[derive(Clone)]
pub struct TransformRef {
    node: Node,
}

impl TransformRef {
    pub fn new(node: &Node) -> Self {
        Self { node: node.clone() }
    }

    pub fn anchor_min(&self) -> Vec2 {
        self.node
            .with(|n| n.transform().map(|t| t.anchor_min()))
            .unwrap_or_default()
    }

    pub fn anchor_max(&self) -> Vec2 {
        self.node
            .with(|n| n.transform().map(|t| t.anchor_max()))
            .unwrap_or_default()
    }

    pub fn offset_min(&self) -> Vec2 {
        self.node
            .with(|n| n.transform().map(|t| t.offset_min()))
            .unwrap_or_default()
    }

    pub fn offset_max(&self) -> Vec2 {
        self.node
            .with(|n| n.transform().map(|t| t.offset_max()))
            .unwrap_or_default()
    }

    pub fn set_anchor_min(&self, value: Vec2) {
        self.node.with(|n| {
            if let Some(t) = n.transform_mut() {
                t.set_anchor_min(value);
            }
        });
    }

    pub fn set_anchor_max(&self, value: Vec2) {
        self.node.with(|n| {
            if let Some(t) = n.transform_mut() {
                t.set_anchor_max(value);
            }
        });
    }

    pub fn set_offset_min(&self, value: Vec2) {
        self.node.with(|n| {
            if let Some(t) = n.transform_mut() {
                t.set_offset_min(value);
            }
        });
    }

    pub fn set_offset_max(&self, value: Vec2) {
        self.node.with(|n| {
            if let Some(t) = n.transform_mut() {
                t.set_offset_max(value);
            }
        });
    }

    /// Set both anchors in one call.
    pub fn set_anchors(&self, min: Vec2, max: Vec2) {
        self.set_anchor_max(max);
        self.set_anchor_min(min);
    }
}

// =============================================================================
// Shared bind plumbing
// =============================================================================

/// Resolve a bind source against a text component, once, at bind time.
///
/// Literals apply immediately; models wire a live binding; snapshots read
/// once without tracking.
pub(crate) fn apply_text_source(node: &Node, source: &BindSource, property: &str) {
    match source {
        BindSource::Literal(value) => match value.as_str() {
            Some(text) => {
                let text = text.to_string();
                node.with(|n| {
                    if let Some(component) = n.text_mut() {
                        component.set_text(text);
                    }
                });
            }
            None => warn!(
                value = %value,
                "text bind source literal is not a string; ignored"
            ),
        },
        BindSource::Model(model) => {
            bind(
                model,
                BindingSet::new().insert(
                    property,
                    Binding::new(BindTarget::new(node, ComponentKind::Text, "text")),
                ),
            );
        }
        BindSource::Snapshot(model) => match model.get(property) {
            Some(value) => match value.as_str() {
                Some(text) => {
                    let text = text.to_string();
                    node.with(|n| {
                        if let Some(component) = n.text_mut() {
                            component.set_text(text);
                        }
                    });
                }
                None => warn!(
                    property,
                    "snapshot bind source property is not a string; ignored"
                ),
            },
            None => warn!(property, "snapshot bind source property missing; ignored"),
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
