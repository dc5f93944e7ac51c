//! Render node - a single named, flat UI node delivered to the transport.
//!
//! A node owns an ordered list of visual components and serializes them
//! lazily: the cached payload is rebuilt only when a component is dirty or
//! the node was never serialized. `show`/`hide`/`update` are side-effecting
//! deliveries through the transport, fire-and-forget.
//!
//! Mutation goes through [`Node::with`]; when the scope ends, events staged
//! by component mutators are drained and a full-update event that names a
//! viewer re-issues hide+show for that viewer immediately.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::{Value, json};

use crate::components::{
    Button, Component, ComponentKind, InputField, RectTransform, StateChange, Text,
};
use crate::context::{self, UiContext};
use crate::transport::{CommandArgs, CommandHandler};
use crate::types::ViewerId;

/// The fixed root identifier nodes attach to when no parent is given.
///
/// A parent name that matches no sibling node is valid and inert; the host
/// resolves or ignores it.
pub const ROOT_PARENT: &str = "root";

// =============================================================================
// RenderNode
// =============================================================================

/// A named node: parent back-reference, fade-out, ordered components.
#[derive(Debug)]
pub struct RenderNode {
    name: String,
    parent: String,
    fade_out: f32,
    components: Vec<Component>,
    cached: Option<Value>,
}

impl RenderNode {
    fn new(name: String, parent: String) -> Self {
        Self {
            name,
            parent,
            fade_out: 0.0,
            components: Vec::new(),
            cached: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn set_parent(&mut self, parent: impl Into<String>) {
        self.parent = parent.into();
        self.cached = None;
    }

    pub fn fade_out(&self) -> f32 {
        self.fade_out
    }

    pub fn set_fade_out(&mut self, seconds: f32) {
        self.fade_out = seconds;
        self.cached = None;
    }

    /// Append a component; order is preserved on the wire.
    pub fn push_component(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
        self.cached = None;
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    pub fn transform(&self) -> Option<&RectTransform> {
        self.component(ComponentKind::Transform)?.as_transform()
    }

    pub fn transform_mut(&mut self) -> Option<&mut RectTransform> {
        self.component_mut(ComponentKind::Transform)?
            .as_transform_mut()
    }

    pub fn text(&self) -> Option<&Text> {
        self.component(ComponentKind::Text)?.as_text()
    }

    pub fn text_mut(&mut self) -> Option<&mut Text> {
        self.component_mut(ComponentKind::Text)?.as_text_mut()
    }

    pub fn button(&self) -> Option<&Button> {
        self.component(ComponentKind::Button)?.as_button()
    }

    pub fn button_mut(&mut self) -> Option<&mut Button> {
        self.component_mut(ComponentKind::Button)?.as_button_mut()
    }

    pub fn input_field(&self) -> Option<&InputField> {
        self.component(ComponentKind::InputField)?.as_input_field()
    }

    pub fn input_field_mut(&mut self) -> Option<&mut InputField> {
        self.component_mut(ComponentKind::InputField)?
            .as_input_field_mut()
    }

    /// True when the next `serialize` call will rebuild.
    pub fn is_dirty(&self) -> bool {
        self.cached.is_none() || self.components.iter().any(Component::is_dirty)
    }

    /// Serialize to `{name, parent, fadeOut?, components}`.
    ///
    /// `fadeOut` is omitted when zero. The cached payload is returned
    /// untouched unless a component is dirty or the node was never
    /// serialized.
    pub fn serialize(&mut self) -> Value {
        if let Some(cached) = &self.cached {
            if !self.components.iter().any(Component::is_dirty) {
                return cached.clone();
            }
        }

        let mut json = json!({
            "name": self.name,
            "parent": self.parent,
        });

        if self.fade_out != 0.0 {
            json["fadeOut"] = json!(self.fade_out);
        }

        let components: Vec<Value> = self
            .components
            .iter_mut()
            .map(Component::serialize)
            .collect();
        json["components"] = Value::Array(components);

        self.cached = Some(json.clone());
        json
    }

    fn drain_events(&mut self) -> Vec<StateChange> {
        let mut events = Vec::new();
        for component in &mut self.components {
            events.append(&mut component.take_events());
        }
        events
    }
}

// =============================================================================
// Node handle
// =============================================================================

/// Shared handle to a render node.
///
/// Cheap to clone; clones refer to the same node. All mutation flows
/// through [`Node::with`], which dispatches staged component events when
/// the scope ends. Nested `with` calls on the same node are not supported.
#[derive(Clone)]
pub struct Node {
    inner: Rc<RefCell<RenderNode>>,
    ctx: UiContext,
}

impl Node {
    /// Create a node with a generated name under the root parent.
    pub fn new(ctx: &UiContext) -> Self {
        Self::named(ctx, context::generate_name(), None)
    }

    /// Create a node with an explicit name and optional parent.
    pub fn named(ctx: &UiContext, name: impl Into<String>, parent: Option<&str>) -> Self {
        let parent = parent.unwrap_or(ROOT_PARENT).to_string();
        Self {
            inner: Rc::new(RefCell::new(RenderNode::new(name.into(), parent))),
            ctx: ctx.clone(),
        }
    }

    /// Builder-style component append, for construction chains.
    pub fn with_component(self, component: impl Into<Component>) -> Self {
        self.inner.borrow_mut().push_component(component);
        self
    }

    /// Run `f` against the node, then dispatch staged component events.
    ///
    /// An event that requests a full update for a specific viewer triggers
    /// an immediate hide+show for that viewer; events without a viewer are
    /// dropped.
    pub fn with<R>(&self, f: impl FnOnce(&mut RenderNode) -> R) -> R {
        let (result, events) = {
            let mut node = self.inner.borrow_mut();
            let result = f(&mut node);
            (result, node.drain_events())
        };
        self.dispatch_events(events);
        result
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name().to_string()
    }

    pub fn parent(&self) -> String {
        self.inner.borrow().parent().to_string()
    }

    pub fn set_parent(&self, parent: &str) {
        self.with(|node| node.set_parent(parent));
    }

    pub fn set_fade_out(&self, seconds: f32) {
        self.with(|node| node.set_fade_out(seconds));
    }

    /// Serialize this node's wire object.
    pub fn serialize(&self) -> Value {
        self.with(RenderNode::serialize)
    }

    /// Deliver this node alone to a viewer (a one-element payload array).
    pub fn show(&self, viewer: &ViewerId) {
        let payload = Value::Array(vec![self.serialize()]).to_string();
        self.ctx.transport().show_payload(viewer, &payload);
    }

    /// Remove this node from a viewer's screen.
    pub fn hide(&self, viewer: &ViewerId) {
        self.ctx.transport().hide_payload(viewer, &self.name());
    }

    /// Hide then show, re-pushing current state.
    pub fn update(&self, viewer: &ViewerId) {
        self.hide(viewer);
        self.show(viewer);
    }

    /// Wire a submit callback to this node's input field.
    ///
    /// Allocates a unique command name (stored in the component's `command`
    /// field, reused on repeated calls) and registers the handler. Returns
    /// the command name, or `None` when the node has no input field. The
    /// caller owns the registration: unregister the returned name when the
    /// node is discarded, or the command leaks.
    pub fn on_submit(
        &self,
        mut callback: impl FnMut(&CommandArgs) + 'static,
    ) -> Option<String> {
        let command = self.with(|node| {
            let input = node.input_field_mut()?;
            if input.command().is_none() {
                input.set_command(Some(context::next_input_command()));
            }
            input.command().map(str::to_string)
        })?;

        let weak = self.downgrade();
        let handler: CommandHandler = Box::new(move |args| {
            callback(args);
            if let Some(node) = weak.upgrade() {
                node.with(|n| {
                    if let Some(input) = n.input_field_mut() {
                        input.emit_state_changed(Some(args.viewer.clone()), false);
                    }
                });
            }
            true
        });
        self.ctx.commands().register(&command, handler);
        Some(command)
    }

    pub(crate) fn downgrade(&self) -> WeakNode {
        WeakNode {
            inner: Rc::downgrade(&self.inner),
            ctx: self.ctx.clone(),
        }
    }

    fn dispatch_events(&self, events: Vec<StateChange>) {
        for event in events {
            if event.needs_full_update {
                if let Some(viewer) = event.viewer {
                    self.update(&viewer);
                }
            }
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.inner.borrow();
        f.debug_struct("Node")
            .field("name", &node.name())
            .field("parent", &node.parent())
            .field("components", &node.components().len())
            .finish()
    }
}

/// Weak counterpart of [`Node`] for callbacks that must not keep the node
/// alive.
pub(crate) struct WeakNode {
    inner: Weak<RefCell<RenderNode>>,
    ctx: UiContext,
}

impl WeakNode {
    pub(crate) fn upgrade(&self) -> Option<Node> {
        Some(Node {
            inner: self.inner.upgrade()?,
            ctx: self.ctx.clone(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Image, InputField, Text};
    use crate::transport::{InMemoryCommands, RecordingTransport, TransportEvent};
    use crate::types::vec2;

    fn recording_ctx() -> (UiContext, Rc<RecordingTransport>, Rc<InMemoryCommands>) {
        let transport = Rc::new(RecordingTransport::new());
        let commands = Rc::new(InMemoryCommands::new());
        let ctx = UiContext::new(transport.clone(), commands.clone());
        (ctx, transport, commands)
    }

    #[test]
    fn test_payload_shape() {
        let ctx = UiContext::detached();
        let node = Node::named(&ctx, "panel", None)
            .with_component(Image::panel())
            .with_component(RectTransform::new());

        let json = node.serialize();
        assert_eq!(json["name"], "panel");
        assert_eq!(json["parent"], ROOT_PARENT);
        assert!(json.get("fadeOut").is_none());
        assert_eq!(json["components"].as_array().unwrap().len(), 2);
        assert_eq!(json["components"][0]["type"], "UnityEngine.UI.Image");
        assert_eq!(json["components"][1]["type"], "RectTransform");
    }

    #[test]
    fn test_fade_out_serialized_when_nonzero() {
        let ctx = UiContext::detached();
        let node = Node::named(&ctx, "fading", None);
        node.set_fade_out(1.5);
        assert_eq!(node.serialize()["fadeOut"], 1.5);
    }

    #[test]
    fn test_generated_name_when_omitted() {
        let ctx = UiContext::detached();
        let a = Node::new(&ctx);
        let b = Node::new(&ctx);
        assert_ne!(a.name(), b.name());
        assert_eq!(a.parent(), ROOT_PARENT);
    }

    #[test]
    fn test_serialize_rebuilds_only_when_dirty() {
        let ctx = UiContext::detached();
        let node = Node::named(&ctx, "lazy", None).with_component(Text::with_text("a"));

        let first = node.serialize();
        assert!(node.with(|n| !n.is_dirty()));
        assert_eq!(node.serialize(), first);

        node.with(|n| n.text_mut().unwrap().set_text("b"));
        assert!(node.with(|n| n.is_dirty()));
        assert_eq!(node.serialize()["components"][0]["text"], "b");
    }

    #[test]
    fn test_parent_change_invalidates_cache() {
        let ctx = UiContext::detached();
        let node = Node::named(&ctx, "child", None);
        node.serialize();

        node.set_parent("other");
        assert_eq!(node.serialize()["parent"], "other");
    }

    #[test]
    fn test_update_is_hide_then_show() {
        let (ctx, transport, _) = recording_ctx();
        let node = Node::named(&ctx, "panel", None).with_component(Image::new());
        let viewer = ViewerId::from("v1");

        node.update(&viewer);

        let events = transport.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TransportEvent::Hide { node, .. } if node == "panel"));
        assert!(matches!(&events[1], TransportEvent::Show { payload, .. }
            if payload.starts_with('[') && payload.contains("\"name\":\"panel\"")));
    }

    #[test]
    fn test_full_update_event_with_viewer_triggers_refresh() {
        let (ctx, transport, _) = recording_ctx();
        let node = Node::named(&ctx, "live", None).with_component(InputField::new());

        node.with(|n| {
            n.input_field_mut()
                .unwrap()
                .emit_state_changed(Some("v1".into()), true);
        });

        let events = transport.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TransportEvent::Hide { node, .. } if node == "live"));
        assert!(matches!(&events[1], TransportEvent::Show { .. }));
    }

    #[test]
    fn test_anchor_change_without_viewer_stays_local() {
        let (ctx, transport, _) = recording_ctx();
        let node = Node::named(&ctx, "anchored", None).with_component(RectTransform::new());

        node.with(|n| n.transform_mut().unwrap().set_anchor_max(vec2(0.5, 0.5)));

        assert!(transport.is_empty());
        assert_eq!(node.serialize()["components"][0]["anchormax"], "0.5 0.5");
    }

    #[test]
    fn test_on_submit_registers_and_fires() {
        let (ctx, _, commands) = recording_ctx();
        let node = Node::named(&ctx, "entry", None).with_component(InputField::new());

        let submitted = Rc::new(RefCell::new(String::new()));
        let sink = submitted.clone();
        let command = node
            .on_submit(move |args| {
                *sink.borrow_mut() = args.args.first().cloned().unwrap_or_default();
            })
            .unwrap();

        assert!(commands.is_registered(&command));
        assert_eq!(node.serialize()["components"][0]["command"], command);

        commands.dispatch(
            &command,
            &CommandArgs::with_args("v1", vec!["typed text".to_string()]),
        );
        assert_eq!(*submitted.borrow(), "typed text");
    }

    #[test]
    fn test_on_submit_without_input_field_is_none() {
        let ctx = UiContext::detached();
        let node = Node::named(&ctx, "plain", None).with_component(Image::new());
        assert!(node.on_submit(|_| {}).is_none());
    }
}
