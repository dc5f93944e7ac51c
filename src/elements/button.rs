//! Button element - a clickable surface with a centered text label.
//!
//! Construction registers a unique click command with the injected
//! registry and wires it to this instance's handler list. `dispose()`
//! unregisters; dropping a button without disposing leaks the command
//! registration (not memory).

use std::cell::RefCell;
use std::rc::Rc;

use crate::components::{self, RectTransform, Text};
use crate::context::{self, UiContext};
use crate::error::UiError;
use crate::model::BindSource;
use crate::node::Node;
use crate::transport::CommandArgs;
use crate::types::{Color, PropertyBag, PropertyValue, TextAlign};

use super::{Element, TransformRef, apply_text_source};

type ClickHandler = Box<dyn FnMut(&CommandArgs)>;

/// A clickable button: command-bound surface node plus text node.
pub struct Button {
    button_node: Node,
    text_node: Node,
    command: String,
    handlers: Rc<RefCell<Vec<ClickHandler>>>,
    ctx: UiContext,
    discriminator: u64,
    model: Option<BindSource>,
    disposed: bool,
}

impl Button {
    pub fn new(ctx: &UiContext, text: &str) -> Self {
        Self::named(ctx, text, None, None)
    }

    /// Full constructor: explicit base name and parent when given.
    pub fn named(ctx: &UiContext, text: &str, name: Option<&str>, parent: Option<&str>) -> Self {
        let base = name
            .map(str::to_string)
            .unwrap_or_else(context::generate_name);
        let command = context::next_button_command();

        let mut surface = components::Button::new();
        surface.set_command(Some(command.clone()));

        let button_node = Node::named(ctx, format!("{base}_button"), parent)
            .with_component(surface)
            .with_component(RectTransform::new());

        let mut label = Text::with_text(text);
        label.set_align(TextAlign::MiddleCenter);
        label.set_color(Color::BLACK);

        let text_node = Node::named(ctx, format!("{base}_text"), Some(&button_node.name()))
            .with_component(label);

        let handlers: Rc<RefCell<Vec<ClickHandler>>> = Rc::new(RefCell::new(Vec::new()));
        let dispatch = handlers.clone();
        ctx.commands().register(
            &command,
            Box::new(move |args| {
                for handler in dispatch.borrow_mut().iter_mut() {
                    handler(args);
                }
                true
            }),
        );

        Self {
            button_node,
            text_node,
            command,
            handlers,
            ctx: ctx.clone(),
            discriminator: context::next_discriminator(),
            model: None,
            disposed: false,
        }
    }

    /// Add a click handler; all handlers run on every click.
    pub fn on_click(&self, handler: impl FnMut(&CommandArgs) + 'static) {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    /// The registered click command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn text(&self) -> String {
        self.text_node
            .with(|n| n.text().map(|t| t.text().to_string()))
            .unwrap_or_default()
    }

    pub fn set_text(&self, text: &str) {
        let text = text.to_string();
        self.text_node.with(|n| {
            if let Some(component) = n.text_mut() {
                component.set_text(text);
            }
        });
    }

    /// Bind with an explicit source property name.
    pub fn bind_property(&mut self, source: BindSource, property: &str) {
        apply_text_source(&self.text_node, &source, property);
        self.model = Some(source);
    }

    pub fn model(&self) -> Option<&BindSource> {
        self.model.as_ref()
    }
}

impl Element for Button {
    fn kind(&self) -> &'static str {
        "Button"
    }

    fn discriminator(&self) -> u64 {
        self.discriminator
    }

    fn parent(&self) -> String {
        self.button_node.parent()
    }

    fn set_parent(&mut self, parent: &str) {
        self.button_node.set_parent(parent);
    }

    fn transform(&self) -> Option<TransformRef> {
        Some(TransformRef::new(&self.button_node))
    }

    fn bind(&mut self, source: BindSource) {
        self.bind_property(source, "text");
    }

    fn render(&self) -> Vec<Node> {
        vec![self.button_node.clone(), self.text_node.clone()]
    }

    /// Same text and parent, fresh node names, fresh command, no click
    /// subscriptions.
    fn copy(&self) -> Option<Box<dyn Element>> {
        Some(Box::new(Button::named(
            &self.ctx,
            &self.text(),
            None,
            Some(&self.parent()),
        )))
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.ctx.commands().unregister(&self.command);
            self.disposed = true;
        }
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
                        target: "Button",
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
                        target: "Button",
                        property: name.to_string(),
                        expected: "string",
                        got: value.type_name(),
                    });
                }
            },
            _ => {
                return Err(UiError::UnknownProperty {
                    target: "Button",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::transport::{InMemoryCommands, RecordingTransport};

    fn command_ctx() -> (UiContext, Rc<InMemoryCommands>) {
        let commands = Rc::new(InMemoryCommands::new());
        let ctx = UiContext::new(Rc::new(RecordingTransport::new()), commands.clone());
        (ctx, commands)
    }

    #[test]
    fn test_render_is_button_then_text() {
        let ctx = UiContext::detached();
        let button = Button::new(&ctx, "Press");
        let nodes = button.render();

        assert_eq!(nodes.len(), 2);
        let surface = nodes[0].serialize();
        let label = nodes[1].serialize();

        assert_eq!(surface["components"][0]["type"], "UnityEngine.UI.Button");
        assert_eq!(surface["components"][0]["command"], button.command());
        assert_eq!(label["parent"], nodes[0].name());
        assert_eq!(label["components"][0]["text"], "Press");
        assert_eq!(label["components"][0]["color"], "0 0 0 1");
    }

    #[test]
    fn test_click_dispatch_runs_all_handlers() {
        let (ctx, commands) = command_ctx();
        let button = Button::new(&ctx, "Press");

        let hits = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            let sink = hits.clone();
            button.on_click(move |_| *sink.borrow_mut() += 1);
        }

        commands.dispatch(button.command(), &CommandArgs::new("v1"));
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_live_binding_updates_label_without_re_render() {
        let ctx = UiContext::detached();
        let mut button = Button::new(&ctx, "");

        let model = Model::new();
        model.set("text", "first");
        button.bind(model.clone().into());
        assert_eq!(button.text(), "first");

        model.set("text", "second");
        assert_eq!(button.text(), "second");
    }

    #[test]
    fn test_literal_binding_is_one_shot() {
        let ctx = UiContext::detached();
        let mut button = Button::new(&ctx, "");
        button.bind("fixed".into());
        assert_eq!(button.text(), "fixed");
    }

    #[test]
    fn test_copy_has_fresh_command_and_no_handlers() {
        let (ctx, commands) = command_ctx();
        let original = Button::new(&ctx, "Copy me");

        let clicked = Rc::new(RefCell::new(false));
        let sink = clicked.clone();
        original.on_click(move |_| *sink.borrow_mut() = true);

        let copy = original.copy().unwrap();
        let copy_command = copy.render()[0].serialize()["components"][0]["command"]
            .as_str()
            .unwrap()
            .to_string();

        assert_ne!(copy_command, original.command());
        commands.dispatch(&copy_command, &CommandArgs::new("v1"));
        assert!(!*clicked.borrow());
    }

    #[test]
    fn test_dispose_unregisters_command() {
        let (ctx, commands) = command_ctx();
        let mut button = Button::new(&ctx, "Bye");
        let command = button.command().to_string();
        assert!(commands.is_registered(&command));

        button.dispose();
        assert!(!commands.is_registered(&command));
        assert!(!commands.dispatch(&command, &CommandArgs::new("v1")));

        // Idempotent.
        button.dispose();
    }
}
