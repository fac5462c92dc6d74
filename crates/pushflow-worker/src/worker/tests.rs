use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pushflow_types::{HostError, NotificationData, NotificationOptions};

use super::*;
use crate::events::{NotificationEvent, PushMessage, ShownNotification};

#[derive(Default)]
struct HostLog {
    shown: RefCell<Vec<(String, NotificationOptions)>>,
    closed: RefCell<Vec<String>>,
    opened: RefCell<Vec<String>>,
    fail_show: Cell<bool>,
}

struct RecordingHost(Rc<HostLog>);

#[async_trait(?Send)]
impl WorkerHost for RecordingHost {
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), HostError> {
        if self.0.fail_show.get() {
            return Err(HostError::new("notifications blocked"));
        }
        self.0
            .shown
            .borrow_mut()
            .push((title.to_string(), options.clone()));
        Ok(())
    }

    fn close_notification(&self, notification: &ShownNotification) {
        self.0.closed.borrow_mut().push(notification.tag.clone());
    }

    async fn open_window(&self, url: &str) -> Result<(), HostError> {
        self.0.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

fn worker(server: &MockServer, log: &Rc<HostLog>) -> ServiceWorker {
    let config = WorkerConfig::new(&server.uri()).unwrap();
    ServiceWorker::new(config, RecordingHost(Rc::clone(log)))
}

fn shown(delivery_id: Option<&str>, url: Option<&str>) -> ShownNotification {
    ShownNotification {
        title: "Hi".into(),
        tag: "pushflow-n1".into(),
        data: Some(NotificationData {
            url: url.map(str::to_string),
            notification_id: Some("n1".into()),
            delivery_id: delivery_id.map(str::to_string),
        }),
    }
}

async fn expect_no_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[test]
fn default_listeners_are_registered() {
    let log = Rc::new(HostLog::default());
    let config = WorkerConfig::new("https://shop.example.com").unwrap();
    let sw = ServiceWorker::new(config, RecordingHost(log));
    for kind in WorkerEventKind::ALL {
        assert_eq!(sw.registry().len(kind), 1, "{kind}");
    }
}

#[tokio::test]
async fn push_shows_high_priority_notification() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let body = json!({
        "id": "n1",
        "deliveryId": "d1",
        "title": "Hi",
        "body": "there",
        "priority": "HIGH"
    });
    sw.dispatch(WorkerEvent::Push(PushMessage::new(body.to_string()))).await;

    let shown = log.shown.borrow();
    assert_eq!(shown.len(), 1);
    let (title, options) = &shown[0];
    assert_eq!(title, "Hi");
    assert_eq!(options.tag, "pushflow-n1");
    assert!(options.renotify);
    assert!(options.require_interaction);
    assert_eq!(options.data.delivery_id.as_deref(), Some("d1"));
}

#[tokio::test]
async fn malformed_push_is_logged_not_shown() {
    let server = MockServer::start().await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    sw.dispatch(WorkerEvent::Push(PushMessage::new("{not json"))).await;
    sw.dispatch(WorkerEvent::Push(PushMessage::empty())).await;

    assert!(log.shown.borrow().is_empty());
}

#[tokio::test]
async fn push_with_null_or_mistyped_fields_is_still_shown() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let nulls = json!({
        "id": "n1",
        "deliveryId": "d1",
        "title": "Hi",
        "body": null,
        "iconUrl": null,
        "actions": null
    });
    let mistyped = json!({ "id": "n2", "title": "Hi", "body": "x", "priority": 1, "actions": {} });
    sw.dispatch(WorkerEvent::Push(PushMessage::new(nulls.to_string()))).await;
    sw.dispatch(WorkerEvent::Push(PushMessage::new(mistyped.to_string()))).await;

    let shown = log.shown.borrow();
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0].1.body, "");
    assert_eq!(shown[0].1.icon, "/default-icon.png");
    assert!(shown[0].1.actions.is_empty());
    assert_eq!(shown[1].1.tag, "pushflow-n2");
    assert!(!shown[1].1.renotify);
    assert!(shown[1].1.actions.is_empty());
}

#[tokio::test]
async fn show_failure_does_not_escape_handler() {
    let server = MockServer::start().await;
    let log = Rc::new(HostLog::default());
    log.fail_show.set(true);
    let sw = worker(&server, &log);

    sw.dispatch(WorkerEvent::Push(PushMessage::new(r#"{"title":"x"}"#))).await;
    assert!(log.shown.borrow().is_empty());
}

#[tokio::test]
async fn click_reports_clicked_and_opens_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deliveries/d1/status"))
        .and(body_partial_json(json!({ "status": "CLICKED" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let event = NotificationEvent::new(shown(Some("d1"), Some("https://shop.example.com/sale")));
    sw.dispatch(WorkerEvent::NotificationClick(event)).await;

    assert_eq!(*log.closed.borrow(), vec!["pushflow-n1".to_string()]);
    assert_eq!(
        *log.opened.borrow(),
        vec!["https://shop.example.com/sale".to_string()]
    );
}

#[tokio::test]
async fn click_without_delivery_id_sends_nothing() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let event = NotificationEvent::new(shown(None, Some("https://shop.example.com")));
    sw.dispatch(WorkerEvent::NotificationClick(event)).await;

    assert_eq!(log.closed.borrow().len(), 1);
    assert_eq!(log.opened.borrow().len(), 1);
}

#[tokio::test]
async fn click_without_data_only_closes() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let event = NotificationEvent::new(ShownNotification {
        title: "Hi".into(),
        tag: "pushflow-1".into(),
        data: None,
    });
    sw.dispatch(WorkerEvent::NotificationClick(event)).await;

    assert_eq!(log.closed.borrow().len(), 1);
    assert!(log.opened.borrow().is_empty());
}

#[tokio::test]
async fn close_and_show_report_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deliveries/d1/status"))
        .and(body_partial_json(json!({ "status": "DELIVERED" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let event = NotificationEvent::new(shown(Some("d1"), None));
    sw.dispatch(WorkerEvent::NotificationClose(event.clone())).await;
    sw.dispatch(WorkerEvent::NotificationShow(event)).await;

    assert!(log.closed.borrow().is_empty());
}

#[tokio::test]
async fn close_without_delivery_id_sends_nothing() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let event = NotificationEvent::new(shown(None, None));
    sw.dispatch(WorkerEvent::NotificationClose(event)).await;
}

#[tokio::test]
async fn tracking_failure_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .expect(1)
        .mount(&server)
        .await;
    let log = Rc::new(HostLog::default());
    let sw = worker(&server, &log);

    let event = NotificationEvent::new(shown(Some("d9"), Some("https://shop.example.com")));
    sw.dispatch(WorkerEvent::NotificationClick(event)).await;
    assert_eq!(log.opened.borrow().len(), 1);
}

#[tokio::test]
async fn extra_listener_runs_after_default() {
    let server = MockServer::start().await;
    let log = Rc::new(HostLog::default());
    let mut sw = worker(&server, &log);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sw.on(WorkerEventKind::Push, move |ctx, event| {
        let sink = Rc::clone(&sink);
        async move {
            if let WorkerEvent::Push(message) = event {
                let badge = ctx.config().badge().to_string();
                sink.borrow_mut()
                    .push((message.text().map(|t| t.into_owned()), badge));
            }
        }
    });
    assert_eq!(sw.registry().len(WorkerEventKind::Push), 2);

    sw.dispatch(WorkerEvent::Push(PushMessage::new(r#"{"title":"x"}"#))).await;

    assert_eq!(log.shown.borrow().len(), 1);
    assert_eq!(
        *seen.borrow(),
        vec![(Some(r#"{"title":"x"}"#.to_string()), "/badge-icon.png".to_string())]
    );
}

#[tokio::test]
async fn cleared_kind_is_ignored() {
    let server = MockServer::start().await;
    let log = Rc::new(HostLog::default());
    let mut sw = worker(&server, &log);
    sw.registry_mut().clear(WorkerEventKind::Push);

    sw.dispatch(WorkerEvent::Push(PushMessage::new(r#"{"title":"x"}"#))).await;
    assert!(log.shown.borrow().is_empty());
}
