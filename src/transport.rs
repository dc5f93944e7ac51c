//! External collaborators: payload transport and command registry.
//!
//! The core hands serialized payloads to a [`Transport`] and wires
//! interactive components through a [`CommandRegistry`]; both are
//! fire-and-forget from the core's point of view. In-memory
//! implementations live here for tests, demos, and host adapters.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::types::ViewerId;

// =============================================================================
// Transport
// =============================================================================

/// Delivers serialized render output to a remote viewer.
///
/// Both operations are fire-and-forget: the core does not wait for
/// delivery or viewer-side acknowledgment, and never retries.
pub trait Transport {
    /// Show a JSON array of render node objects to a viewer.
    fn show_payload(&self, viewer: &ViewerId, payload: &str);

    /// Hide one named render node for a viewer.
    fn hide_payload(&self, viewer: &ViewerId, node_name: &str);
}

/// A transport that discards everything.
pub struct NullTransport;

impl Transport for NullTransport {
    fn show_payload(&self, _viewer: &ViewerId, _payload: &str) {}

    fn hide_payload(&self, _viewer: &ViewerId, _node_name: &str) {}
}

/// One delivery observed by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Show { viewer: ViewerId, payload: String },
    Hide { viewer: ViewerId, node: String },
}

/// A transport that records every delivery, in order.
#[derive(Default)]
pub struct RecordingTransport {
    events: RefCell<Vec<TransportEvent>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn events(&self) -> Vec<TransportEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn show_payload(&self, viewer: &ViewerId, payload: &str) {
        self.events.borrow_mut().push(TransportEvent::Show {
            viewer: viewer.clone(),
            payload: payload.to_string(),
        });
    }

    fn hide_payload(&self, viewer: &ViewerId, node_name: &str) {
        self.events.borrow_mut().push(TransportEvent::Hide {
            viewer: viewer.clone(),
            node: node_name.to_string(),
        });
    }
}

// =============================================================================
// Command registry
// =============================================================================

/// Arguments delivered with a viewer-originated command.
#[derive(Debug, Clone)]
pub struct CommandArgs {
    /// The viewer that triggered the command.
    pub viewer: ViewerId,
    /// Positional string arguments (e.g. submitted text).
    pub args: Vec<String>,
}

impl CommandArgs {
    pub fn new(viewer: impl Into<ViewerId>) -> Self {
        Self {
            viewer: viewer.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(viewer: impl Into<ViewerId>, args: Vec<String>) -> Self {
        Self {
            viewer: viewer.into(),
            args,
        }
    }
}

/// Handler invoked when a registered command fires.
pub type CommandHandler = Box<dyn FnMut(&CommandArgs) -> bool>;

/// Routes viewer-originated events back into the composition layer.
///
/// Command names are generated by the core, one per interactive component
/// instance; a registration stays active until explicitly unregistered.
pub trait CommandRegistry {
    fn register(&self, name: &str, handler: CommandHandler);
    fn unregister(&self, name: &str);
}

/// An in-memory registry with local dispatch.
///
/// Host adapters forward incoming viewer events to [`dispatch`]; tests use
/// it to simulate clicks and submissions.
///
/// [`dispatch`]: InMemoryCommands::dispatch
#[derive(Default)]
pub struct InMemoryCommands {
    handlers: RefCell<HashMap<String, Rc<RefCell<CommandHandler>>>>,
}

impl InMemoryCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the handler registered under `name`.
    ///
    /// Returns the handler's result, or `false` when nothing is registered
    /// under that name. Handlers may unregister themselves.
    pub fn dispatch(&self, name: &str, args: &CommandArgs) -> bool {
        let handler = self.handlers.borrow().get(name).cloned();
        match handler {
            Some(handler) => {
                let mut handler = handler.borrow_mut();
                (&mut **handler)(args)
            }
            None => {
                trace!(command = name, "dispatch on unregistered command");
                false
            }
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl CommandRegistry for InMemoryCommands {
    fn register(&self, name: &str, handler: CommandHandler) {
        self.handlers
            .borrow_mut()
            .insert(name.to_string(), Rc::new(RefCell::new(handler)));
    }

    fn unregister(&self, name: &str) {
        self.handlers.borrow_mut().remove(name);
    }
}

// =============================================================================
// Tests
// =============================================================================
