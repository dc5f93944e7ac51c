//! Label element - a single text node.
//!
//! The default list item template: one render node, copyable, with a
//! bindable text surface.

use super::{Element, TransformRef, apply_text_source};
use crate::components::{RectTransform, Text};
use crate::context::{self, UiContext};
use crate::error::UiError;
use crate::model::BindSource;
use crate::node::Node;
use crate::types::{PropertyBag, PropertyValue};

/// A single positioned text node.
pub struct Label {
    node: Node,
    ctx: UiContext,
    discriminator: u64,
    model: Option<BindSource>,
}

impl Label {
    pub fn new(ctx: &UiContext, text: &str) -> Self {
        Self::named(ctx, text, None, None)
    }

    /// Full constructor: explicit node name and parent when given.
    pub fn named(ctx: &UiContext, text: &str, name: Option<&str>, parent: Option<&str>) -> Self {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(context::generate_name);
        let node = Node::named(ctx, name, parent)
            .with_component(Text::with_text(text))
            .with_component(RectTransform::new());

        Self {
            node,
            ctx: ctx.clone(),
            discriminator: context::next_discriminator(),
            model: None,
        }
    }

    pub fn text(&self) -> String {
        self.node
            .with(|n| n.text().map(|t| t.text().to_string()))
            .unwrap_or_default()
    }

    pub fn set_text(&self, text: &str) {
        let text = text.to_string();
        self.node.with(|n| {
            if let Some(component) = n.text_mut() {
                component.set_text(text);
            }
        });
    }

    /// Bind with an explicit source property name.
    pub fn bind_property(&mut self, source: BindSource, property: &str) {
        apply_text_source(&self.node, &source, property);
        self.model = Some(source);
    }

    pub fn model(&self) -> Option<&BindSource> {
        self.model.as_ref()
    }
}

impl Element for Label {
    fn kind(&self) -> &'static str {
        "Label"
    }

    fn discriminator(&self) -> u64 {
        self.discriminator
    }

    fn parent(&self) -> String {
        self.node.parent()
    }

    fn set_parent(&mut self, parent: &str) {
        self.node.set_parent(parent);
    }

    fn transform(&self) -> Option<TransformRef> {
        Some(TransformRef::new(&self.node))
    }

    fn bind(&mut self, source: BindSource) {
        self.bind_property(source, "text");
    }

    fn render(&self) -> Vec<Node> {
        vec![self.node.clone()]
    }

    fn copy(&self) -> Option<Box<dyn Element>> {
        Some(Box::new(Label::named(
            &self.ctx,
            &self.text(),
            None,
            Some(&self.parent()),
        )))
    }

    fn properties(&self) -> PropertyBag {
        PropertyBag::from([
            ("text".to_string(), self.text().into()),
            ("parent".to_string(), self.parent().into()),
        ])
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match name {
            "text" => match value.as_str() {
                Some(text) => self.set_text(text),
                None => {
                    return Err(UiError::PropertyType {
                        target: "Label",
                        property: name.to_string(),
                        expected: "string",
                        got: value.type_name(),
                    });
                }
            },
            "parent" => match value.as_str() {
                Some(parent) => self.set_parent(parent),
                None => {
                    return Err(UiError::PropertyType {
                        target: "Label",
                        property: name.to_string(),
                        expected: "string",
                        got: value.type_name(),
                    });
                }
            },
            _ => {
                return Err(UiError::UnknownProperty {
                    target: "Label",
                    property: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
