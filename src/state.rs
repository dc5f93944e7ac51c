//! Viewer state manager - per-viewer overlays on element default state.
//!
//! Each element registers a default snapshot of its externally-visible
//! properties; viewers then accumulate their own state bags on top.
//! Lookup resolves viewer-specific state first, then the default, then
//! nothing. Applying a bag writes every key back onto the live element
//! through its typed property table; unknown keys are skipped with a
//! warning and never abort the rest of the bag.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::elements::Element;
use crate::types::{PropertyBag, ViewerId};

/// Stable identity for an element instance: variant kind, first rendered
/// node name, and the per-instance discriminator.
fn element_key(element: &dyn Element) -> String {
    let first_node = element
        .render()
        .first()
        .map(|node| node.name())
        .unwrap_or_default();
    format!("{}/{}/{}", element.kind(), first_node, element.discriminator())
}

/// Default and per-viewer state tables.
#[derive(Default)]
pub struct ViewerStateManager {
    defaults: HashMap<String, PropertyBag>,
    viewers: HashMap<ViewerId, HashMap<String, PropertyBag>>,
}

impl ViewerStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `element`'s property table as its default state.
    ///
    /// With `full`, the rendered nodes are walked as well; node-level
    /// defaults are not captured, only traced.
    pub fn register_default_state(&mut self, element: &dyn Element, full: bool) {
        let key = element_key(element);
        let snapshot = element.properties();

        if full {
            for node in element.render() {
                trace!(node = %node.name(), "node-level default state not captured");
            }
        }

        if self.defaults.insert(key.clone(), snapshot).is_some() {
            debug!(key = %key, "default state replaced");
        }
    }

    /// Viewer-specific state if present, else the default, else `None`.
    pub fn get_state(&self, viewer: &ViewerId, element: &dyn Element) -> Option<PropertyBag> {
        let key = element_key(element);
        self.viewers
            .get(viewer)
            .and_then(|states| states.get(&key))
            .or_else(|| self.defaults.get(&key))
            .cloned()
    }

    /// Run `updater` over the resolved state and store the result as the
    /// viewer's state, writing every key back onto the live element.
    ///
    /// An updater returning `None` opts out: nothing is stored or applied.
    pub fn change_state(
        &mut self,
        viewer: &ViewerId,
        element: &mut dyn Element,
        updater: impl FnOnce(Option<&PropertyBag>) -> Option<PropertyBag>,
    ) {
        let current = self.get_state(viewer, element);
        let Some(next) = updater(current.as_ref()) else {
            return;
        };

        let key = element_key(element);
        self.viewers
            .entry(viewer.clone())
            .or_default()
            .insert(key, next.clone());

        apply_bag(element, &next);
    }

    /// Re-apply the currently stored (viewer or default) state onto the
    /// element without mutating what is stored.
    pub fn set_state(&self, viewer: &ViewerId, element: &mut dyn Element) {
        if let Some(bag) = self.get_state(viewer, element) {
            apply_bag(element, &bag);
        }
    }

    /// Whether any state has been stored for this viewer.
    pub fn has_viewer(&self, viewer: &ViewerId) -> bool {
        self.viewers.contains_key(viewer)
    }
}

fn apply_bag(element: &mut dyn Element, bag: &PropertyBag) {
    for (name, value) in bag {
        if let Err(err) = element.set_property(name, value) {
            warn!(kind = element.kind(), error = %err, "state key skipped");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::UiContext;
    use crate::elements::Button;
    use crate::types::PropertyValue;

    fn manager_with_button() -> (ViewerStateManager, Button) {
        let ctx = UiContext::detached();
        let button = Button::new(&ctx, "Welcome");
        let mut manager = ViewerStateManager::new();
        manager.register_default_state(&button, false);
        (manager, button)
    }

    #[test]
    fn test_default_state_resolves_before_any_change() {
        let (manager, button) = manager_with_button();
        let viewer = ViewerId::from("v1");

        let state = manager.get_state(&viewer, &button).unwrap();
        assert_eq!(state.get("text"), Some(&"Welcome".into()));
    }

    #[test]
    fn test_change_state_overlays_viewer_and_applies() {
        let (mut manager, mut button) = manager_with_button();
        let viewer = ViewerId::from("v1");

        manager.change_state(&viewer, &mut button, |current| {
            let mut bag = current.cloned().unwrap_or_default();
            bag.insert("text".to_string(), "Hello again".into());
            bag.insert("seen".to_string(), true.into());
            Some(bag)
        });

        // Applied to the live element...
        assert_eq!(button.text(), "Hello again");

        // ...and stored for this viewer only.
        let stored = manager.get_state(&viewer, &button).unwrap();
        assert_eq!(stored.get("seen"), Some(&PropertyValue::Bool(true)));

        let other = ViewerId::from("v2");
        let fallback = manager.get_state(&other, &button).unwrap();
        assert_eq!(fallback.get("text"), Some(&"Welcome".into()));
        assert!(fallback.get("seen").is_none());
    }

    #[test]
    fn test_null_updater_is_a_no_op() {
        let (mut manager, mut button) = manager_with_button();
        let viewer = ViewerId::from("v1");

        manager.change_state(&viewer, &mut button, |_| None);

        assert!(!manager.has_viewer(&viewer));
        assert_eq!(button.text(), "Welcome");
    }

    #[test]
    fn test_unknown_keys_skip_without_losing_the_rest() {
        let (mut manager, mut button) = manager_with_button();
        let viewer = ViewerId::from("v1");

        manager.change_state(&viewer, &mut button, |_| {
            let mut bag = PropertyBag::new();
            bag.insert("bogus".to_string(), 1i64.into());
            bag.insert("text".to_string(), "still applied".into());
            Some(bag)
        });

        assert_eq!(button.text(), "still applied");
    }

    #[test]
    fn test_set_state_reapplies_without_mutating_store() {
        let (mut manager, mut button) = manager_with_button();
        let viewer = ViewerId::from("v1");

        manager.change_state(&viewer, &mut button, |current| {
            let mut bag = current.cloned().unwrap_or_default();
            bag.insert("text".to_string(), "viewer copy".into());
            Some(bag)
        });

        // Drift the live element, then restore from the store.
        button.set_text("drifted");
        manager.set_state(&viewer, &mut button);
        assert_eq!(button.text(), "viewer copy");
    }

    #[test]
    fn test_identity_distinguishes_instances() {
        let ctx = UiContext::detached();
        let first = Button::new(&ctx, "one");
        let second = Button::new(&ctx, "two");

        let mut manager = ViewerStateManager::new();
        manager.register_default_state(&first, false);
        manager.register_default_state(&second, false);

        let viewer = ViewerId::from("v1");
        let state = manager.get_state(&viewer, &second).unwrap();
        assert_eq!(state.get("text"), Some(&"two".into()));
    }
}
