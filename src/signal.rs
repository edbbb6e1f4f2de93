//! Connectable notification signals.
//!
//! A [`Signal`] is a list of boxed callbacks invoked synchronously on
//! `emit`. The table allocates its signals lazily (on first access) so
//! consumers that never listen pay nothing. Handlers are keyed through a
//! slotmap so disconnection is O(1) and ids stay stable while other
//! handlers come and go.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies one connected handler inside a [`Signal`].
    pub struct HandlerId;
}

/// A synchronous multicast callback list.
pub struct Signal<T> {
    handlers: SlotMap<HandlerId, Box<dyn FnMut(T)>>,
}

impl<T: Copy> Signal<T> {
    /// Create an empty signal.
    pub fn new() -> Self {
        Self { handlers: SlotMap::with_key() }
    }

    /// Connect a handler; returns an id usable with [`Signal::disconnect`].
    pub fn connect(&mut self, handler: impl FnMut(T) + 'static) -> HandlerId {
        self.handlers.insert(Box::new(handler))
    }

    /// Disconnect a previously connected handler.
    ///
    /// Returns `false` if the id was already disconnected.
    pub fn disconnect(&mut self, id: HandlerId) -> bool {
        self.handlers.remove(id).is_some()
    }

    /// Invoke every connected handler with `arg`.
    pub fn emit(&mut self, arg: T) {
        for handler in self.handlers.values_mut() {
            handler(arg);
        }
    }

    /// Number of connected handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is connected.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T: Copy> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
