#![allow(missing_docs)]

use std::{
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{body::Body, http::StatusCode, response::Response};
use rusqlite::Connection;
use serde_json::Value;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::db::initialize;

/// An initialized in-memory database, ready to be shared between handlers.
pub(crate) fn get_test_db_connection() -> Arc<Mutex<Connection>> {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    Arc::new(Mutex::new(connection))
}

#[track_caller]
pub(crate) fn assert_status(response: &Response<Body>, status: StatusCode) {
    assert_eq!(response.status(), status);
}

pub(crate) async fn parse_json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

struct ErrorEventCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorEventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `future` and count the `ERROR` level events it emits on this thread.
pub(crate) async fn count_error_events<F: Future>(future: F) -> (F::Output, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let _guard = tracing_subscriber::registry()
        .with(ErrorEventCounter(count.clone()))
        .set_default();

    let output = future.await;

    (output, count.load(Ordering::SeqCst))
}
