//! UiContext - explicit access to the external collaborators.
//!
//! Every element that talks to the transport or registers commands receives
//! a [`UiContext`] at construction and passes it down the composition tree.
//! Also home to the id generators: node names are collision-resistant
//! UUIDs, command names come from per-kind monotonic counters.

use std::cell::Cell;
use std::rc::Rc;

use uuid::Uuid;

use crate::transport::{CommandRegistry, InMemoryCommands, NullTransport, Transport};

// =============================================================================
// Id generation
// =============================================================================

thread_local! {
    /// Per-instance discriminator for element identity hashing.
    static ELEMENT_SEQ: Cell<u64> = const { Cell::new(0) };

    /// Monotonic counter for button click command names.
    static BUTTON_COMMAND_SEQ: Cell<u64> = const { Cell::new(0) };

    /// Monotonic counter for input submit command names.
    static INPUT_COMMAND_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Generate a collision-resistant node name.
pub fn generate_name() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Next element instance discriminator.
pub(crate) fn next_discriminator() -> u64 {
    ELEMENT_SEQ.with(|seq| {
        let id = seq.get();
        seq.set(id + 1);
        id
    })
}

/// Next unique click command name.
pub(crate) fn next_button_command() -> String {
    BUTTON_COMMAND_SEQ.with(|seq| {
        let id = seq.get();
        seq.set(id + 1);
        format!("ui_button_click_{id}")
    })
}

/// Next unique submit command name.
pub(crate) fn next_input_command() -> String {
    INPUT_COMMAND_SEQ.with(|seq| {
        let id = seq.get();
        seq.set(id + 1);
        format!("ui_input_change_{id}")
    })
}

/// Reset all id counters (for testing).
pub fn reset_id_state() {
    ELEMENT_SEQ.with(|seq| seq.set(0));
    BUTTON_COMMAND_SEQ.with(|seq| seq.set(0));
    INPUT_COMMAND_SEQ.with(|seq| seq.set(0));
}

// =============================================================================
// UiContext
// =============================================================================

/// Shared handle to the transport and command registry.
///
/// Cheap to clone; clones refer to the same collaborators.
#[derive(Clone)]
pub struct UiContext {
    transport: Rc<dyn Transport>,
    commands: Rc<dyn CommandRegistry>,
}

impl UiContext {
    pub fn new(transport: Rc<dyn Transport>, commands: Rc<dyn CommandRegistry>) -> Self {
        Self {
            transport,
            commands,
        }
    }

    /// A context wired to a no-op transport and an in-memory registry.
    ///
    /// Suitable for offline composition and tests.
    pub fn detached() -> Self {
        Self::new(Rc::new(NullTransport), Rc::new(InMemoryCommands::new()))
    }

    pub fn transport(&self) -> &Rc<dyn Transport> {
        &self.transport
    }

    pub fn commands(&self) -> &Rc<dyn CommandRegistry> {
        &self.commands
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_unique() {
        let a = generate_name();
        let b = generate_name();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_command_counters_are_per_kind() {
        reset_id_state();
        assert_eq!(next_button_command(), "ui_button_click_0");
        assert_eq!(next_button_command(), "ui_button_click_1");
        assert_eq!(next_input_command(), "ui_input_change_0");
    }
}
