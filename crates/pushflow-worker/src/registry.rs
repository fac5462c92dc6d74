//! Event-handler registry keyed by event kind.

use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::events::{WorkerEvent, WorkerEventKind};
use crate::worker::WorkerContext;

/// A registered listener. Receives the shared worker context and its own
/// copy of the event.
pub type EventHandler = Rc<dyn Fn(Rc<WorkerContext>, WorkerEvent) -> LocalBoxFuture<'static, ()>>;

/// Listeners per event kind, invoked in registration order.
#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<WorkerEventKind, Vec<EventHandler>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener for `kind`.
    pub fn on<F, Fut>(&mut self, kind: WorkerEventKind, handler: F)
    where
        F: Fn(Rc<WorkerContext>, WorkerEvent) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let boxed: EventHandler = Rc::new(move |ctx, event| handler(ctx, event).boxed_local());
        self.handlers.entry(kind).or_default().push(boxed);
    }

    /// Listeners registered for `kind`.
    pub fn handlers(&self, kind: WorkerEventKind) -> &[EventHandler] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self, kind: WorkerEventKind) -> usize {
        self.handlers(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Drop every listener for `kind`.
    pub fn clear(&mut self, kind: WorkerEventKind) {
        self.handlers.remove(&kind);
    }
}
