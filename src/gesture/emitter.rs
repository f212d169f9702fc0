//! Minimal observer-list event emitter
//!
//! Maps an event name to an ordered list of handlers. Dispatch is
//! synchronous, in registration order. No engine base class, no queuing -
//! any host can wire its own input events into a consumer of this.

use std::collections::HashMap;

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type HandlerList<E> = Vec<(ListenerId, Box<dyn FnMut(&E)>)>;

/// Event emitter for a single payload type `E`.
///
/// Handlers are keyed by event name so one emitter can serve several
/// event kinds that share a payload. A handler panic propagates to the
/// caller of [`emit`](Emitter::emit); the emitter itself holds no state
/// that can be corrupted by it.
pub struct Emitter<E: 'static> {
    channels: HashMap<&'static str, HandlerList<E>>,
    next_id: u64,
}

impl<E: 'static> Emitter<E> {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            next_id: 0,
        }
    }

    /// Subscribe a handler to `event`. Returns an id for [`off`](Emitter::off).
    pub fn on<F>(&mut self, event: &'static str, handler: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.channels
            .entry(event)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Unsubscribe a handler. Returns false if the id was not registered.
    pub fn off(&mut self, event: &'static str, id: ListenerId) -> bool {
        let Some(handlers) = self.channels.get_mut(event) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(hid, _)| *hid != id);
        handlers.len() != before
    }

    /// Invoke every handler registered for `event`, in registration order.
    pub fn emit(&mut self, event: &'static str, payload: &E) {
        if let Some(handlers) = self.channels.get_mut(event) {
            for (_, handler) in handlers.iter_mut() {
                handler(payload);
            }
        }
    }

    /// Number of handlers registered for `event`.
    pub fn listener_count(&self, event: &'static str) -> usize {
        self.channels.get(event).map_or(0, |h| h.len())
    }
}

impl<E: 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}
