//! # relay-ui
//!
//! Retained-mode UI composition layer for remote viewers.
//!
//! Application code builds a tree of declarative elements; relay-ui
//! flattens the tree into named render nodes, serializes them lazily into
//! a JSON wire payload, and hands the payload to a transport collaborator
//! for delivery to a viewer. Property bindings push model changes into
//! live components, and a per-viewer state manager overlays
//! viewer-specific state on element defaults.
//!
//! ## Architecture
//!
//! ```text
//! Element tree → render() → RenderNode list → serialize (dirty-gated) → Transport
//!       ↑                        ↑
//!   Viewer state            Bindings (Model → component property)
//! ```
//!
//! ## Execution model
//!
//! Single-threaded and callback-driven: the object graph is `Rc`/`RefCell`
//! with no locking, and transport deliveries are fire-and-forget. Viewer
//! input re-enters through the command registry on the same thread.
//!
//! ## Modules
//!
//! - [`types`] - Core value types (Vec2, Color, PropertyValue, ViewerId)
//! - [`components`] - Visual components with dirty-tracked serialization
//! - [`node`] - Render nodes and per-viewer show/hide/update
//! - [`elements`] - Composite elements (Grid, List, Window, Button, ...)
//! - [`model`] / [`binding`] - Observable models and the binding engine
//! - [`state`] - Per-viewer state overlays
//! - [`representation`] - The root aggregate
//! - [`transport`] - Collaborator traits and in-memory implementations
//! - [`context`] - Dependency injection of the collaborators

pub mod binding;
pub mod components;
pub mod context;
pub mod elements;
pub mod error;
pub mod model;
pub mod node;
pub mod representation;
pub mod state;
pub mod transport;
pub mod types;

// Re-export commonly used items
pub use binding::{Binding, BindingSet, BindTarget, bind, unbind};
pub use context::{UiContext, generate_name};
pub use elements::{
    Button, Element, ElementRef, Grid, Label, List, ProgressBar, TransformRef, Window, shared,
};
pub use error::{Result, UiError};
pub use model::{BindSource, Model, ObservableCollection};
pub use node::{Node, RenderNode, ROOT_PARENT};
pub use representation::Representation;
pub use state::ViewerStateManager;
pub use transport::{
    CommandArgs, CommandHandler, CommandRegistry, InMemoryCommands, NullTransport,
    RecordingTransport, Transport, TransportEvent,
};
pub use types::{Color, ImageKind, PropertyBag, PropertyValue, TextAlign, Vec2, ViewerId, vec2};
