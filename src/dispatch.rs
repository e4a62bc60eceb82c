// Event-kind -> handler table, run synchronously by whoever owns the loop.

use std::collections::HashMap;

use crate::input::{EventKind, PointerEvent};

/// What the loop should do after a handler ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Ignored,
    Handled,
    Repaint,
}

pub type Handler<S> = fn(&mut S, &PointerEvent) -> Response;

pub struct DispatchTable<S> {
    handlers: HashMap<EventKind, Handler<S>>,
}

impl<S> Default for DispatchTable<S> {
    fn default() -> Self {
        Self { handlers: HashMap::new() }
    }
}

impl<S> DispatchTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, replacing any previous one.
    pub fn on(mut self, kind: EventKind, handler: Handler<S>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn dispatch(&self, state: &mut S, event: &PointerEvent) -> Response {
        match self.handlers.get(&event.kind) {
            Some(handler) => handler(state, event),
            None => Response::Ignored,
        }
    }

    /// Dispatch a batch; true when any handler asked for a repaint.
    pub fn dispatch_all(&self, state: &mut S, events: &[PointerEvent]) -> bool {
        events
            .iter()
            .fold(false, |repaint, ev| self.dispatch(state, ev) == Response::Repaint || repaint)
    }
}
