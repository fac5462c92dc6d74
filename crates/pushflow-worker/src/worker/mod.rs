//! The worker instance: shared context plus the event registry.

#[cfg(test)]
mod tests;

use std::future::Future;
use std::rc::Rc;

use crate::config::WorkerConfig;
use crate::delivery::DeliveryTracker;
use crate::events::{WorkerEvent, WorkerEventKind};
use crate::handlers;
use crate::host::WorkerHost;
use crate::registry::EventRegistry;

/// State shared by every handler invocation.
pub struct WorkerContext {
    host: Rc<dyn WorkerHost>,
    config: WorkerConfig,
    tracker: DeliveryTracker,
}

impl WorkerContext {
    pub fn host(&self) -> &dyn WorkerHost {
        self.host.as_ref()
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn tracker(&self) -> &DeliveryTracker {
        &self.tracker
    }
}

/// PushFlow's background worker.
///
/// Created with the four default listeners registered. The host forwards
/// each lifecycle event to [`ServiceWorker::dispatch`] and keeps the event
/// alive until the returned future completes.
pub struct ServiceWorker {
    ctx: Rc<WorkerContext>,
    registry: EventRegistry,
}

impl ServiceWorker {
    pub fn new(config: WorkerConfig, host: impl WorkerHost + 'static) -> Self {
        Self::with_http(config, host, reqwest::Client::new())
    }

    /// Use a caller-supplied `reqwest::Client` for delivery reports.
    pub fn with_http(
        config: WorkerConfig,
        host: impl WorkerHost + 'static,
        http: reqwest::Client,
    ) -> Self {
        let tracker = DeliveryTracker::new(http, config.origin().clone());
        let ctx = Rc::new(WorkerContext {
            host: Rc::new(host),
            config,
            tracker,
        });

        let mut registry = EventRegistry::new();
        registry.on(WorkerEventKind::Push, handlers::on_push);
        registry.on(WorkerEventKind::NotificationClick, handlers::on_click);
        registry.on(WorkerEventKind::NotificationClose, handlers::on_delivered);
        registry.on(WorkerEventKind::NotificationShow, handlers::on_delivered);

        Self { ctx, registry }
    }

    /// Add a listener after the default ones for `kind`.
    pub fn on<F, Fut>(&mut self, kind: WorkerEventKind, handler: F)
    where
        F: Fn(Rc<WorkerContext>, WorkerEvent) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.registry.on(kind, handler);
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EventRegistry {
        &mut self.registry
    }

    pub fn context(&self) -> &Rc<WorkerContext> {
        &self.ctx
    }

    /// Run every listener for the event's kind and wait for all of them.
    pub async fn dispatch(&self, event: WorkerEvent) {
        let kind = event.kind();
        let handlers = self.registry.handlers(kind);
        if handlers.is_empty() {
            tracing::debug!(event = %kind, "No listener registered");
            return;
        }

        let pending = handlers
            .iter()
            .map(|handler| handler(Rc::clone(&self.ctx), event.clone()));
        futures::future::join_all(pending).await;
    }
}
