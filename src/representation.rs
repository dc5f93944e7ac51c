//! Representation - the root aggregate shown or hidden as one unit.

use serde_json::Value;

use crate::context::UiContext;
use crate::elements::{Element, ElementRef, shared};
use crate::types::ViewerId;

/// An ordered collection of top-level elements.
///
/// Elements may be shared across representations; only one representation
/// should be shown to a given viewer at a time.
pub struct Representation {
    ctx: UiContext,
    elements: Vec<ElementRef>,
}

impl Representation {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            ctx: ctx.clone(),
            elements: Vec::new(),
        }
    }

    pub fn add(&mut self, element: ElementRef) {
        self.elements.push(element);
    }

    /// Wrap and add an owned element, returning the shared handle.
    pub fn adopt(&mut self, element: impl Element + 'static) -> ElementRef {
        let shared = shared(element);
        self.add(shared.clone());
        shared
    }

    /// Remove one element by handle identity.
    pub fn remove(&mut self, element: &ElementRef) -> bool {
        let before = self.elements.len();
        self.elements
            .retain(|existing| !std::rc::Rc::ptr_eq(existing, element));
        self.elements.len() != before
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the whole tree: every element's render nodes, in element
    /// order, as one JSON array.
    pub fn to_payload(&self) -> Value {
        let mut nodes = Vec::new();
        for element in &self.elements {
            for node in element.borrow().render() {
                nodes.push(node.serialize());
            }
        }
        Value::Array(nodes)
    }

    /// Deliver the whole tree to a viewer.
    pub fn show(&self, viewer: &ViewerId) {
        self.ctx
            .transport()
            .show_payload(viewer, &self.to_payload().to_string());
    }

    /// Remove every rendered node from a viewer's screen, node by node.
    pub fn hide(&self, viewer: &ViewerId) {
        for element in &self.elements {
            for node in element.borrow().render() {
                node.hide(viewer);
            }
        }
    }

    /// Hide then show.
    pub fn update(&self, viewer: &ViewerId) {
        self.hide(viewer);
        self.show(viewer);
    }

    /// Dispose every element, releasing command registrations.
    pub fn dispose(&mut self) {
        for element in &self.elements {
            element.borrow_mut().dispose();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Grid, Label, Window};
    use crate::transport::{InMemoryCommands, RecordingTransport, TransportEvent};
    use std::rc::Rc;

    fn recording_ctx() -> (UiContext, Rc<RecordingTransport>) {
        let transport = Rc::new(RecordingTransport::new());
        let ctx = UiContext::new(transport.clone(), Rc::new(InMemoryCommands::new()));
        (ctx, transport)
    }

    #[test]
    fn test_payload_is_ordered_array_of_nodes() {
        let ctx = UiContext::detached();
        let mut display = Representation::new(&ctx);

        let mut grid = Grid::new(&ctx, 1, 1);
        grid.set_element(0, 0, shared(Label::new(&ctx, "cell")))
            .unwrap();
        display.adopt(grid);
        display.adopt(Label::new(&ctx, "footer"));

        let payload = display.to_payload();
        let nodes = payload.as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        for node in nodes {
            assert!(node.get("name").is_some());
            assert!(node.get("parent").is_some());
            assert!(node.get("components").is_some());
        }
    }

    #[test]
    fn test_show_delivers_one_payload() {
        let (ctx, transport) = recording_ctx();
        let mut display = Representation::new(&ctx);
        display.adopt(Label::new(&ctx, "hello"));

        display.show(&"v1".into());

        let events = transport.events();
        assert_eq!(events.len(), 1);
        let TransportEvent::Show { payload, .. } = &events[0] else {
            panic!("expected a show event");
        };
        let parsed: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_hide_removes_each_node() {
        let (ctx, transport) = recording_ctx();
        let mut display = Representation::new(&ctx);
        let window = Window::named(&ctx, "t", None, Some("win"));
        display.adopt(window);

        display.hide(&"v1".into());

        let hidden: Vec<String> = transport
            .events()
            .into_iter()
            .map(|event| match event {
                TransportEvent::Hide { node, .. } => node,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(hidden, vec!["win", "win_title", "win_close_button", "win_close_text", "win_body"]);
    }

    #[test]
    fn test_update_is_hide_then_show() {
        let (ctx, transport) = recording_ctx();
        let mut display = Representation::new(&ctx);
        display.adopt(Label::new(&ctx, "x"));

        display.update(&"v1".into());

        let events = transport.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TransportEvent::Hide { .. }));
        assert!(matches!(events[1], TransportEvent::Show { .. }));
    }

    #[test]
    fn test_remove_by_handle() {
        let ctx = UiContext::detached();
        let mut display = Representation::new(&ctx);
        let kept = display.adopt(Label::new(&ctx, "kept"));
        let dropped = display.adopt(Label::new(&ctx, "dropped"));

        assert!(display.remove(&dropped));
        assert!(!display.remove(&dropped));
        assert_eq!(display.len(), 1);
        assert!(display.remove(&kept));
        assert!(display.is_empty());
    }
}
