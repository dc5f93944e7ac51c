//! ProgressBar element - a background/foreground node pair whose
//! foreground rectangle tracks a bound fill ratio.
//!
//! The bound value drives the foreground transform's `offsetmax.x` lane,
//! clamped to [0, 1], through the same binding mechanism buttons use for
//! their labels.

use tracing::warn;

use crate::binding::{BindTarget, Binding, BindingSet, bind};
use crate::components::{self, ComponentKind, RectTransform};
use crate::context::{self, UiContext};
use crate::error::{Result, UiError};
use crate::model::BindSource;
use crate::node::Node;
use crate::types::{PropertyBag, PropertyValue, vec2};

use super::{Element, TransformRef};

/// Background and foreground surfaces; the foreground fill follows the
/// bound progress value.
pub struct ProgressBar {
    background: Node,
    foreground: Node,
    model: Option<BindSource>,
    discriminator: u64,
}

impl ProgressBar {
    pub fn new(ctx: &UiContext) -> Self {
        Self::named(ctx, None, None)
    }

    /// Full constructor: explicit base name and parent when given.
    pub fn named(ctx: &UiContext, name: Option<&str>, parent: Option<&str>) -> Self {
        let base = name
            .map(str::to_string)
            .unwrap_or_else(context::generate_name);

        let background = Node::named(ctx, format!("{base}_background"), parent)
            .with_component(components::Button::new())
            .with_component(RectTransform::new());

        let mut fill_transform = RectTransform::new();
        fill_transform.set_offset_min(vec2(0.2, 0.2));
        fill_transform.set_offset_max(vec2(0.8, 0.8));
        let foreground = Node::named(ctx, format!("{base}_foreground"), Some(&background.name()))
            .with_component(components::Button::new())
            .with_component(fill_transform);

        Self {
            background,
            foreground,
            model: None,
            discriminator: context::next_discriminator(),
        }
    }

    /// Current fill ratio, read from the foreground rectangle.
    pub fn progress(&self) -> f32 {
        self.foreground
            .with(|n| n.transform().map(|t| t.offset_max().x))
            .unwrap_or_default()
    }

    /// Set the fill ratio directly; values clamp to [0, 1].
    pub fn set_progress(&self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        self.foreground.with(|n| {
            if let Some(transform) = n.transform_mut() {
                let y = transform.offset_max().y;
                transform.set_offset_max(vec2(value, y));
            }
        });
    }

    /// Bind with an explicit source property name.
    pub fn bind_property(&mut self, source: BindSource, property: &str) {
        match &source {
            BindSource::Literal(value) => match value.as_f32() {
                Some(ratio) => self.set_progress(ratio),
                None => warn!(
                    value = %value,
                    "progress bind source literal is not numeric; ignored"
                ),
            },
            BindSource::Model(model) => {
                bind(
                    model,
                    BindingSet::new().insert(
                        property,
                        Binding::with_converter(
                            BindTarget::new(
                                &self.foreground,
                                ComponentKind::Transform,
                                "offsetmax.x",
                            ),
                            |value| {
                                PropertyValue::Float(
                                    value.as_f32().unwrap_or(0.0).clamp(0.0, 1.0),
                                )
                            },
                        ),
                    ),
                );
            }
            BindSource::Snapshot(model) => match model.get(property).and_then(|v| v.as_f32()) {
                Some(ratio) => self.set_progress(ratio),
                None => warn!(property, "snapshot progress property missing or non-numeric"),
            },
        }
        self.model = Some(source);
    }

    pub fn model(&self) -> Option<&BindSource> {
        self.model.as_ref()
    }
}

impl Element for ProgressBar {
    fn kind(&self) -> &'static str {
        "ProgressBar"
    }

    fn discriminator(&self) -> u64 {
        self.discriminator
    }

    fn parent(&self) -> String {
        self.background.parent()
    }

    fn set_parent(&mut self, parent: &str) {
        self.background.set_parent(parent);
    }

    fn transform(&self) -> Option<TransformRef> {
        Some(TransformRef::new(&self.background))
    }

    fn bind(&mut self, source: BindSource) {
        self.bind_property(source, "progress");
    }

    fn render(&self) -> Vec<Node> {
        vec![self.background.clone(), self.foreground.clone()]
    }

    fn properties(&self) -> PropertyBag {
        PropertyBag::from([
            ("parent".to_string(), self.parent().into()),
            ("progress".to_string(), self.progress().into()),
        ])
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "progress" => match value.as_f32() {
                Some(ratio) => {
                    self.set_progress(ratio);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "ProgressBar",
                    property: name.to_string(),
                    expected: "float",
                    got: value.type_name(),
                }),
            },
            "parent" => match value.as_str() {
                Some(parent) => {
                    self.set_parent(parent);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "ProgressBar",
                    property: name.to_string(),
                    expected: "string",
                    got: value.type_name(),
                }),
            },
            _ => Err(UiError::UnknownProperty {
                target: "ProgressBar",
                property: name.to_string(),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_render_is_background_then_foreground() {
        let ctx = UiContext::detached();
        let bar = ProgressBar::named(&ctx, Some("hp"), None);

        let nodes = bar.render();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name(), "hp_background");
        assert_eq!(nodes[1].name(), "hp_foreground");
        assert_eq!(nodes[1].parent(), "hp_background");
    }

    #[test]
    fn test_bound_model_drives_fill() {
        let ctx = UiContext::detached();
        let mut bar = ProgressBar::new(&ctx);

        let model = Model::new();
        model.set("progress", 0.4f32);
        bar.bind(model.clone().into());

        assert_eq!(bar.progress(), 0.4);
        assert_eq!(
            bar.render()[1].serialize()["components"][1]["offsetmax"],
            "0.4 0.8"
        );

        model.set("progress", 0.9f32);
        assert_eq!(bar.progress(), 0.9);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let ctx = UiContext::detached();
        let mut bar = ProgressBar::new(&ctx);

        let model = Model::new();
        bar.bind(model.clone().into());

        model.set("progress", 1.8f32);
        assert_eq!(bar.progress(), 1.0);

        model.set("progress", -0.3f32);
        assert_eq!(bar.progress(), 0.0);
    }

    #[test]
    fn test_literal_and_snapshot_sources_are_one_shot() {
        let ctx = UiContext::detached();
        let mut bar = ProgressBar::new(&ctx);
        bar.bind(0.25f32.into());
        assert_eq!(bar.progress(), 0.25);

        let model = Model::new();
        model.set("progress", 0.5f32);
        bar.bind_property(BindSource::Snapshot(model.clone()), "progress");
        assert_eq!(bar.progress(), 0.5);

        model.set("progress", 0.75f32);
        assert_eq!(bar.progress(), 0.5);
    }
}
