//! Default listeners installed on every worker.

use std::rc::Rc;

use chrono::Utc;

use pushflow_types::{DeliveryStatus, NotificationPayload};

use crate::display;
use crate::events::{NotificationEvent, WorkerEvent};
use crate::worker::WorkerContext;

/// `push`: parse the payload and show a notification.
pub(crate) async fn on_push(ctx: Rc<WorkerContext>, event: WorkerEvent) {
    let WorkerEvent::Push(message) = event else {
        return;
    };

    let Some(text) = message.text() else {
        tracing::info!("Push event received: No data");
        return;
    };
    tracing::info!(data = %text, "Push event received");

    let payload: NotificationPayload = match message.json() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(error = %e, "Error processing push event");
            return;
        }
    };

    let options = display::build_options(&payload, ctx.config(), Utc::now().timestamp_millis());
    tracing::debug!(tag = %options.tag, title = %payload.title, "Notification options built");

    if let Err(e) = ctx.host().show_notification(&payload.title, &options).await {
        tracing::error!(error = %e, tag = %options.tag, "Failed to show notification");
    }
}

/// `notificationclick`: close, report CLICKED, open the click-through URL.
pub(crate) async fn on_click(ctx: Rc<WorkerContext>, event: WorkerEvent) {
    let WorkerEvent::NotificationClick(NotificationEvent {
        notification,
        action,
    }) = event
    else {
        return;
    };
    tracing::info!(tag = %notification.tag, ?action, "Notification clicked");
    ctx.host().close_notification(&notification);

    let report = async {
        if let Some(delivery_id) = notification.delivery_id() {
            ctx.tracker().track(delivery_id, DeliveryStatus::Clicked).await;
        }
    };
    let open = async {
        if let Some(url) = notification.url() {
            if let Err(e) = ctx.host().open_window(url).await {
                tracing::error!(error = %e, url, "Failed to open notification URL");
            }
        }
    };
    futures::join!(report, open);
}

/// `notificationclose` and `notificationshow`: report DELIVERED.
pub(crate) async fn on_delivered(ctx: Rc<WorkerContext>, event: WorkerEvent) {
    let Some(delivery_id) = event.notification().and_then(|n| n.delivery_id()) else {
        return;
    };
    ctx.tracker().track(delivery_id, DeliveryStatus::Delivered).await;
}
