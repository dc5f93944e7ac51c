//! List element - a vertically stacked, paged view over a bound sequence.
//!
//! Binding a collection copies the item template once per visible member
//! and recomputes whenever the collection notifies. The page index selects
//! a contiguous window of `visible_element_count` members before the
//! per-row loop; navigation buttons are rendered but not self-wired -
//! applications connect `on_click` to `set_page`/`next_page`/`prev_page`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::components::{Image, RectTransform};
use crate::context::{self, UiContext};
use crate::error::{Result, UiError};
use crate::model::{BindSource, ObservableCollection};
use crate::node::Node;
use crate::types::{PropertyBag, PropertyValue, vec2};

use super::{Button, Element, Label, TransformRef};

struct ListInner {
    wrap: Node,
    list_wrap: Node,
    next_button: Button,
    prev_button: Button,
    template: Box<dyn Element>,
    collection: Option<ObservableCollection>,
    items: Vec<Box<dyn Element>>,
    item_nodes: Vec<Node>,
    visible_count: usize,
    page: usize,
}

/// Shared handle to a list; clones refer to the same list.
pub struct List {
    inner: Rc<RefCell<ListInner>>,
    discriminator: u64,
}

impl List {
    /// A list with the default single-node [`Label`] item template.
    pub fn new(ctx: &UiContext) -> Self {
        Self::build(ctx, None, None)
    }

    /// A list with a custom item template; the template must support
    /// `copy()` by the time a collection is bound.
    pub fn with_template(ctx: &UiContext, template: Box<dyn Element>) -> Self {
        Self::build(ctx, None, Some(template))
    }

    fn build(ctx: &UiContext, name: Option<&str>, template: Option<Box<dyn Element>>) -> Self {
        let base = name
            .map(str::to_string)
            .unwrap_or_else(context::generate_name);

        let wrap = Node::named(ctx, format!("{base}_wrap"), None)
            .with_component(Image::panel())
            .with_component(RectTransform::new());

        let mut body_transform = RectTransform::new();
        body_transform.set_offset_min(vec2(0.0, 0.2));
        let list_wrap = Node::named(ctx, format!("{base}_list"), Some(&wrap.name()))
            .with_component(Image::panel())
            .with_component(body_transform);

        let template = template
            .unwrap_or_else(|| Box::new(Label::named(ctx, "", None, Some(&list_wrap.name()))));

        let prev_button = Button::named(ctx, "<", Some(&format!("{base}_prev")), Some(&wrap.name()));
        if let Some(transform) = prev_button.transform() {
            transform.set_anchor_max(vec2(0.5, 0.2));
            transform.set_anchor_min(vec2(0.0, 0.0));
        }

        let next_button = Button::named(ctx, ">", Some(&format!("{base}_next")), Some(&wrap.name()));
        if let Some(transform) = next_button.transform() {
            transform.set_anchor_min(vec2(0.5, 0.0));
            transform.set_anchor_max(vec2(1.0, 0.2));
        }

        Self {
            inner: Rc::new(RefCell::new(ListInner {
                wrap,
                list_wrap,
                next_button,
                prev_button,
                template,
                collection: None,
                items: Vec::new(),
                item_nodes: Vec::new(),
                visible_count: 10,
                page: 0,
            })),
            discriminator: context::next_discriminator(),
        }
    }

    /// Bind a sequence and recompute immediately; future collection
    /// mutations recompute automatically.
    ///
    /// Fails fast when the item template does not support copying.
    pub fn bind_collection(&self, collection: &ObservableCollection) -> Result<()> {
        {
            let mut inner = self.inner.borrow_mut();
            match inner.template.copy() {
                Some(mut probe) => probe.dispose(),
                None => return Err(UiError::TemplateNotCopyable(inner.template.kind())),
            }
            inner.collection = Some(collection.clone());
        }
        recompute(&self.inner);

        let weak = Rc::downgrade(&self.inner);
        collection.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                recompute(&inner);
            }
        });
        Ok(())
    }

    pub fn collection(&self) -> Option<ObservableCollection> {
        self.inner.borrow().collection.clone()
    }

    pub fn visible_element_count(&self) -> usize {
        self.inner.borrow().visible_count
    }

    /// Change the page size; the row height is `1 / count`.
    pub fn set_visible_element_count(&self, count: usize) {
        self.inner.borrow_mut().visible_count = count.max(1);
        recompute(&self.inner);
    }

    pub fn page(&self) -> usize {
        self.inner.borrow().page
    }

    /// Select which window of the bound sequence is visible.
    pub fn set_page(&self, page: usize) {
        self.inner.borrow_mut().page = page;
        recompute(&self.inner);
    }

    pub fn next_page(&self) {
        let page = self.inner.borrow().page;
        self.set_page(page.saturating_add(1));
    }

    pub fn prev_page(&self) {
        let page = self.inner.borrow().page;
        self.set_page(page.saturating_sub(1));
    }

    /// The navigation buttons, for application click wiring.
    pub fn with_nav_buttons<R>(&self, f: impl FnOnce(&Button, &Button) -> R) -> R {
        let inner = self.inner.borrow();
        f(&inner.prev_button, &inner.next_button)
    }
}

impl Clone for List {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            discriminator: self.discriminator,
        }
    }
}

/// Rebuild the item elements for the current window.
fn recompute(inner: &Rc<RefCell<ListInner>>) {
    let mut state = inner.borrow_mut();
    let Some(collection) = state.collection.clone() else {
        return;
    };
    let snapshot = collection.items();

    for mut item in std::mem::take(&mut state.items) {
        item.dispose();
    }
    state.item_nodes.clear();

    let visible = state.visible_count.max(1);
    let height = 1.0 / visible as f32;
    let start = state.page * visible;
    let parent = state.list_wrap.name();

    for (row, source) in snapshot.into_iter().skip(start).take(visible).enumerate() {
        let Some(mut item) = state.template.copy() else {
            warn!(
                template = state.template.kind(),
                "item template lost copy support; list left empty"
            );
            break;
        };
        item.bind(source);
        if let Some(transform) = item.transform() {
            transform.set_anchor_max(vec2(1.0, 1.0 - row as f32 * height));
            transform.set_anchor_min(vec2(0.0, 1.0 - row as f32 * height - height));
        }
        item.set_parent(&parent);
        state.item_nodes.extend(item.render());
        state.items.push(item);
    }
}

impl Element for List {
    fn kind(&self) -> &'static str {
        "List"
    }

    fn discriminator(&self) -> u64 {
        self.discriminator
    }

    fn parent(&self) -> String {
        self.inner.borrow().wrap.parent()
    }

    fn set_parent(&mut self, parent: &str) {
        self.inner.borrow().wrap.set_parent(parent);
    }

    fn transform(&self) -> Option<TransformRef> {
        Some(TransformRef::new(&self.inner.borrow().wrap))
    }

    fn bind(&mut self, _source: BindSource) {
        debug!("lists bind sequences; use bind_collection");
    }

    /// Wrap, scroll body, navigation buttons, then the item window.
    fn render(&self) -> Vec<Node> {
        let inner = self.inner.borrow();
        let mut nodes = vec![inner.wrap.clone(), inner.list_wrap.clone()];
        nodes.extend(inner.next_button.render());
        nodes.extend(inner.prev_button.render());
        nodes.extend(inner.item_nodes.iter().cloned());
        nodes
    }

    fn dispose(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.next_button.dispose();
        inner.prev_button.dispose();
        inner.template.dispose();
        for item in &mut inner.items {
            item.dispose();
        }
    }

    fn properties(&self) -> PropertyBag {
        let inner = self.inner.borrow();
        PropertyBag::from([
            (
                "visible_element_count".to_string(),
                PropertyValue::Int(inner.visible_count as i64),
            ),
            ("index".to_string(), PropertyValue::Int(inner.page as i64)),
            ("parent".to_string(), inner.wrap.parent().into()),
        ])
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "visible_element_count" => match value.as_i64() {
                Some(count) => {
                    self.set_visible_element_count(count.max(1) as usize);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "List",
                    property: name.to_string(),
                    expected: "int",
                    got: value.type_name(),
                }),
            },
            "index" => match value.as_i64() {
                Some(page) => {
                    self.set_page(page.max(0) as usize);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "List",
                    property: name.to_string(),
                    expected: "int",
                    got: value.type_name(),
                }),
            },
            "parent" => match value.as_str() {
                Some(parent) => {
                    self.set_parent(parent);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "List",
                    property: name.to_string(),
                    expected: "string",
                    got: value.type_name(),
                }),
            },
            _ => Err(UiError::UnknownProperty {
                target: "List",
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
    use crate::node::ROOT_PARENT;

    fn greetings(count: usize) -> ObservableCollection {
        let collection = ObservableCollection::new();
        for i in 0..count {
            collection.push(format!("item {i}"));
        }
        collection
    }

    fn item_texts(list: &List) -> Vec<String> {
        let inner = list.inner.borrow();
        inner
            .item_nodes
            .iter()
            .map(|n| {
                n.serialize()["components"][0]["text"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_six_items_render_twelve_nodes() {
        let ctx = UiContext::detached();
        let list = List::new(&ctx);
        list.bind_collection(&greetings(6)).unwrap();

        // wrap + body (2) + nav buttons (2 nodes each) + 6 single-node items
        assert_eq!(list.render().len(), 2 + 4 + 6);
    }

    #[test]
    fn test_render_order_and_topology() {
        let ctx = UiContext::detached();
        let list = List::new(&ctx);
        list.bind_collection(&greetings(3)).unwrap();

        let nodes = list.render();
        let mut seen = vec![ROOT_PARENT.to_string()];
        for node in &nodes {
            assert!(
                seen.contains(&node.parent()),
                "node {} references unemitted parent {}",
                node.name(),
                node.parent()
            );
            seen.push(node.name());
        }

        // Body follows wrap, items come last under the body.
        assert_eq!(nodes[1].parent(), nodes[0].name());
        assert_eq!(nodes.last().unwrap().parent(), nodes[1].name());
    }

    #[test]
    fn test_rows_stack_top_down() {
        let ctx = UiContext::detached();
        let list = List::new(&ctx);
        list.set_visible_element_count(4);
        list.bind_collection(&greetings(2)).unwrap();

        let inner = list.inner.borrow();
        let first = inner.item_nodes[0].with(|n| n.transform().unwrap().anchor_max());
        let second = inner.item_nodes[1].with(|n| n.transform().unwrap().anchor_max());
        assert_eq!(first, vec2(1.0, 1.0));
        assert_eq!(second, vec2(1.0, 0.75));
    }

    #[test]
    fn test_collection_mutation_recomputes() {
        let ctx = UiContext::detached();
        let list = List::new(&ctx);
        let collection = greetings(2);
        list.bind_collection(&collection).unwrap();
        assert_eq!(item_texts(&list).len(), 2);

        collection.push("late arrival");
        assert_eq!(item_texts(&list), vec!["item 0", "item 1", "late arrival"]);
    }

    #[test]
    fn test_paging_selects_window() {
        let ctx = UiContext::detached();
        let list = List::new(&ctx);
        list.set_visible_element_count(2);
        list.bind_collection(&greetings(6)).unwrap();
        assert_eq!(item_texts(&list), vec!["item 0", "item 1"]);

        list.set_page(1);
        assert_eq!(item_texts(&list), vec!["item 2", "item 3"]);

        list.next_page();
        assert_eq!(item_texts(&list), vec!["item 4", "item 5"]);

        // Past the end: empty window.
        list.next_page();
        assert!(item_texts(&list).is_empty());

        list.set_page(0);
        list.prev_page();
        assert_eq!(list.page(), 0);
    }

    #[test]
    fn test_nav_buttons_can_drive_paging() {
        use crate::transport::{CommandArgs, InMemoryCommands, RecordingTransport};
        use std::rc::Rc;

        let commands = Rc::new(InMemoryCommands::new());
        let ctx = UiContext::new(Rc::new(RecordingTransport::new()), commands.clone());

        let list = List::new(&ctx);
        list.set_visible_element_count(2);
        list.bind_collection(&greetings(6)).unwrap();

        let pager = list.clone();
        let next_command = list.with_nav_buttons(|_prev, next| {
            next.on_click(move |_| pager.next_page());
            next.command().to_string()
        });

        commands.dispatch(&next_command, &CommandArgs::new("v1"));
        assert_eq!(list.page(), 1);
        assert_eq!(item_texts(&list), vec!["item 2", "item 3"]);
    }

    #[test]
    fn test_window_larger_than_sequence_shows_everything() {
        let ctx = UiContext::detached();
        let list = List::new(&ctx);
        list.bind_collection(&greetings(6)).unwrap();
        assert_eq!(item_texts(&list).len(), 6);
    }
}
