//! Observable models - the data side of the binding engine.
//!
//! A [`Model`] is a shared property bag that notifies listeners on every
//! set. An [`ObservableCollection`] is an ordered sequence with
//! whole-collection change notification, used to drive list recomputation.
//! [`BindSource`] is the closed union of everything an element can bind to.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::types::{PropertyBag, PropertyValue};

// =============================================================================
// Model
// =============================================================================

type PropertyListener = Rc<dyn Fn(&str, &PropertyValue)>;

#[derive(Default)]
struct ModelInner {
    values: PropertyBag,
    listeners: Vec<PropertyListener>,
}

/// A shared observable property bag.
///
/// Clones refer to the same underlying model; equality is identity.
/// Listeners receive the changed property's name and new value, and are
/// invoked outside the model's internal borrow so they may freely read or
/// write other models.
#[derive(Clone, Default)]
pub struct Model {
    inner: Rc<RefCell<ModelInner>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property and notify listeners.
    pub fn set(&self, name: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        self.inner
            .borrow_mut()
            .values
            .insert(name.to_string(), value.clone());
        self.notify(name, &value);
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.inner.borrow().values.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().values.contains_key(name)
    }

    pub fn property_names(&self) -> Vec<String> {
        self.inner.borrow().values.keys().cloned().collect()
    }

    /// Subscribe to property changes.
    pub fn subscribe(&self, listener: impl Fn(&str, &PropertyValue) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Drop every listener at once.
    ///
    /// Coarse-grained on purpose: unbinding a model detaches all of its
    /// bindings, across all properties.
    pub fn clear_subscribers(&self) {
        self.inner.borrow_mut().listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Identity comparison: do both handles refer to the same model?
    pub fn same_model(&self, other: &Model) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, name: &str, value: &PropertyValue) {
        let listeners = self.inner.borrow().listeners.clone();
        for listener in listeners {
            listener(name, value);
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Model")
            .field("values", &inner.values)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

// =============================================================================
// BindSource
// =============================================================================

/// Everything an element can bind to, resolved once at bind time.
///
/// - `Literal`: a plain value, applied once, never tracked.
/// - `Model`: a live model; changes to the bound property re-push.
/// - `Snapshot`: a one-shot read of a model property, no live tracking.
#[derive(Debug, Clone)]
pub enum BindSource {
    Literal(PropertyValue),
    Model(Model),
    Snapshot(Model),
}

impl From<&str> for BindSource {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

impl From<String> for BindSource {
    fn from(value: String) -> Self {
        Self::Literal(value.into())
    }
}

impl From<f32> for BindSource {
    fn from(value: f32) -> Self {
        Self::Literal(value.into())
    }
}

impl From<PropertyValue> for BindSource {
    fn from(value: PropertyValue) -> Self {
        Self::Literal(value)
    }
}

impl From<Model> for BindSource {
    fn from(model: Model) -> Self {
        Self::Model(model)
    }
}

// =============================================================================
// ObservableCollection
// =============================================================================

type CollectionListener = Rc<dyn Fn()>;

#[derive(Default)]
struct CollectionInner {
    items: Vec<BindSource>,
    listeners: Vec<CollectionListener>,
}

/// An ordered sequence of bind sources with change notification.
///
/// Every mutation notifies all listeners; clones refer to the same
/// underlying sequence.
#[derive(Clone, Default)]
pub struct ObservableCollection {
    inner: Rc<RefCell<CollectionInner>>,
}

impl ObservableCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: impl Into<BindSource>) {
        self.inner.borrow_mut().items.push(item.into());
        self.notify();
    }

    pub fn insert(&self, index: usize, item: impl Into<BindSource>) {
        self.inner.borrow_mut().items.insert(index, item.into());
        self.notify();
    }

    /// Replace the item at `index`.
    pub fn set(&self, index: usize, item: impl Into<BindSource>) {
        self.inner.borrow_mut().items[index] = item.into();
        self.notify();
    }

    pub fn remove(&self, index: usize) -> BindSource {
        let item = self.inner.borrow_mut().items.remove(index);
        self.notify();
        item
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().items.clear();
        self.notify();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<BindSource> {
        self.inner.borrow().items.get(index).cloned()
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<BindSource> {
        self.inner.borrow().items.clone()
    }

    /// Subscribe to whole-collection change notification.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn clear_subscribers(&self) {
        self.inner.borrow_mut().listeners.clear();
    }

    fn notify(&self) {
        let listeners = self.inner.borrow().listeners.clone();
        for listener in listeners {
            listener();
        }
    }
}

impl fmt::Debug for ObservableCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ObservableCollection")
            .field("items", &inner.items.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_with_name_and_value() {
        let model = Model::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        model.subscribe(move |name, value| {
            sink.borrow_mut().push((name.to_string(), value.clone()));
        });

        model.set("text", "hello");
        model.set("progress", 0.5f32);

        let seen = seen.borrow();
        assert_eq!(seen[0], ("text".to_string(), "hello".into()));
        assert_eq!(seen[1], ("progress".to_string(), 0.5f32.into()));
    }

    #[test]
    fn test_clear_subscribers_detaches_everything() {
        let model = Model::new();
        let hits = Rc::new(RefCell::new(0));
        for _ in 0..3 {
            let sink = hits.clone();
            model.subscribe(move |_, _| *sink.borrow_mut() += 1);
        }
        assert_eq!(model.listener_count(), 3);

        model.clear_subscribers();
        model.set("text", "silent");
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_clones_share_identity() {
        let model = Model::new();
        let alias = model.clone();
        alias.set("x", 1i64);
        assert_eq!(model.get("x"), Some(PropertyValue::Int(1)));
        assert!(model.same_model(&alias));
        assert!(!model.same_model(&Model::new()));
    }

    #[test]
    fn test_listener_may_touch_other_models() {
        let a = Model::new();
        let b = Model::new();
        let b_in_listener = b.clone();
        a.subscribe(move |_, value| b_in_listener.set("mirror", value.clone()));

        a.set("source", "copied");
        assert_eq!(b.get("mirror"), Some("copied".into()));
    }

    #[test]
    fn test_collection_mutations_notify() {
        let collection = ObservableCollection::new();
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        collection.subscribe(move || *sink.borrow_mut() += 1);

        collection.push("a");
        collection.push("b");
        collection.insert(0, "c");
        collection.remove(1);
        collection.clear();

        assert_eq!(*hits.borrow(), 5);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_collection_snapshot() {
        let collection = ObservableCollection::new();
        collection.push("one");
        collection.push(Model::new());

        let items = collection.items();
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], BindSource::Literal(v) if v.as_str() == Some("one")));
        assert!(matches!(&items[1], BindSource::Model(_)));
    }
}
