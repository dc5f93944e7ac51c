//! Window element - a titled container with a close button and a body.

use crate::components::{Cursor, Image, RectTransform, Text};
use crate::context::{self, UiContext};
use crate::error::{Result, UiError};
use crate::node::Node;
use crate::types::{Color, PropertyBag, PropertyValue, vec2};

use super::{Button, Element, ElementRef, TransformRef};

/// Container node + title node + close button + body node hosting an
/// optional child element.
///
/// The close button hides the window node for the clicking viewer only;
/// other viewers keep seeing it.
pub struct Window {
    window: Node,
    title_node: Node,
    close_button: Button,
    body_node: Node,
    body: Option<ElementRef>,
    discriminator: u64,
}

impl Window {
    pub fn new(ctx: &UiContext, title: &str, body: Option<ElementRef>) -> Self {
        Self::named(ctx, title, body, None)
    }

    /// Full constructor: explicit base name when given.
    pub fn named(
        ctx: &UiContext,
        title: &str,
        body: Option<ElementRef>,
        name: Option<&str>,
    ) -> Self {
        let base = name
            .map(str::to_string)
            .unwrap_or_else(context::generate_name);

        let mut backdrop = Image::new();
        backdrop.set_color(Color::new(0.1, 0.8, 0.5, 0.7));
        let window = Node::named(ctx, base.clone(), None)
            .with_component(backdrop)
            .with_component(Cursor::new())
            .with_component(RectTransform::new());

        let mut title_transform = RectTransform::new();
        title_transform.set_anchor_min(vec2(0.0, 0.9));
        let title_node = Node::named(ctx, format!("{base}_title"), Some(&window.name()))
            .with_component(Text::with_text(title))
            .with_component(title_transform);

        let close_button = Button::named(
            ctx,
            "X",
            Some(&format!("{base}_close")),
            Some(&window.name()),
        );
        if let Some(transform) = close_button.transform() {
            transform.set_anchor_min(vec2(0.9, 0.9));
        }
        let window_handle = window.clone();
        close_button.on_click(move |args| {
            window_handle.hide(&args.viewer);
        });

        let mut body_transform = RectTransform::new();
        body_transform.set_anchor_max(vec2(1.0, 0.9));
        let body_node = Node::named(ctx, format!("{base}_body"), Some(&window.name()))
            .with_component(Image::panel())
            .with_component(body_transform);

        if let Some(child) = &body {
            child.borrow_mut().set_parent(&body_node.name());
        }

        Self {
            window,
            title_node,
            close_button,
            body_node,
            body,
            discriminator: context::next_discriminator(),
        }
    }

    pub fn title(&self) -> String {
        self.title_node
            .with(|n| n.text().map(|t| t.text().to_string()))
            .unwrap_or_default()
    }

    pub fn set_title(&self, title: &str) {
        let title = title.to_string();
        self.title_node.with(|n| {
            if let Some(component) = n.text_mut() {
                component.set_text(title);
            }
        });
    }

    pub fn body(&self) -> Option<ElementRef> {
        self.body.clone()
    }

    /// The close button, for additional click wiring.
    pub fn close_button(&self) -> &Button {
        &self.close_button
    }
}

impl Element for Window {
    fn kind(&self) -> &'static str {
        "Window"
    }

    fn discriminator(&self) -> u64 {
        self.discriminator
    }

    fn parent(&self) -> String {
        self.window.parent()
    }

    fn set_parent(&mut self, parent: &str) {
        self.window.set_parent(parent);
    }

    fn transform(&self) -> Option<TransformRef> {
        Some(TransformRef::new(&self.window))
    }

    /// Fixed order: window, title, close-button render, body node, body
    /// element render.
    fn render(&self) -> Vec<Node> {
        let mut nodes = vec![self.window.clone(), self.title_node.clone()];
        nodes.extend(self.close_button.render());
        nodes.push(self.body_node.clone());
        if let Some(body) = &self.body {
            nodes.extend(body.borrow().render());
        }
        nodes
    }

    fn dispose(&mut self) {
        self.close_button.dispose();
        if let Some(body) = &self.body {
            body.borrow_mut().dispose();
        }
    }

    fn properties(&self) -> PropertyBag {
        PropertyBag::from([
            ("title".to_string(), self.title().into()),
            ("parent".to_string(), self.parent().into()),
        ])
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "title" => match value.as_str() {
                Some(title) => {
                    self.set_title(title);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "Window",
                    property: name.to_string(),
                    expected: "string",
                    got: value.type_name(),
                }),
            },
            "parent" => match value.as_str() {
                Some(parent) => {
                    self.set_parent(parent);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "Window",
                    property: name.to_string(),
                    expected: "string",
                    got: value.type_name(),
                }),
            },
            _ => Err(UiError::UnknownProperty {
                target: "Window",
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
    use crate::elements::{Label, shared};
    use crate::node::ROOT_PARENT;
    use crate::transport::{
        CommandArgs, InMemoryCommands, RecordingTransport, TransportEvent,
    };
    use std::rc::Rc;

    fn wired_ctx() -> (UiContext, Rc<RecordingTransport>, Rc<InMemoryCommands>) {
        let transport = Rc::new(RecordingTransport::new());
        let commands = Rc::new(InMemoryCommands::new());
        let ctx = UiContext::new(transport.clone(), commands.clone());
        (ctx, transport, commands)
    }

    #[test]
    fn test_render_order() {
        let ctx = UiContext::detached();
        let body = shared(Label::new(&ctx, "content"));
        let window = Window::named(&ctx, "Settings", Some(body), Some("win"));

        let nodes = window.render();
        let names: Vec<String> = nodes.iter().map(|n| n.name()).collect();
        assert_eq!(names[0], "win");
        assert_eq!(names[1], "win_title");
        assert_eq!(names[2], "win_close_button");
        assert_eq!(names[3], "win_close_text");
        assert_eq!(names[4], "win_body");
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[5].parent(), "win_body");
    }

    #[test]
    fn test_topological_parent_order() {
        let ctx = UiContext::detached();
        let body = shared(Label::new(&ctx, "x"));
        let window = Window::new(&ctx, "t", Some(body));

        let mut seen = vec![ROOT_PARENT.to_string()];
        for node in window.render() {
            assert!(seen.contains(&node.parent()));
            seen.push(node.name());
        }
    }

    #[test]
    fn test_close_click_hides_window_for_clicking_viewer_only() {
        let (ctx, transport, commands) = wired_ctx();
        let window = Window::named(&ctx, "Popup", None, Some("popup"));

        commands.dispatch(window.close_button().command(), &CommandArgs::new("clicker"));

        assert_eq!(
            transport.events(),
            vec![TransportEvent::Hide {
                viewer: "clicker".into(),
                node: "popup".to_string()
            }]
        );
    }

    #[test]
    fn test_title_updates() {
        let ctx = UiContext::detached();
        let window = Window::new(&ctx, "Before", None);
        window.set_title("After");
        assert_eq!(window.title(), "After");
        assert_eq!(
            window.render()[1].serialize()["components"][0]["text"],
            "After"
        );
    }
}
