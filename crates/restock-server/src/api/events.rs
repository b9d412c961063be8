//! Server-sent progress events.
//!
//! The scrape pipeline publishes through [`BroadcastSink`]; every connected
//! client of `GET /api/v1/events` gets its own broadcast receiver. Sends are
//! fire-and-forget — no subscribers, lagged subscribers, and disconnects are
//! all invisible to the pipeline.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use restock_core::{ProgressEvent, ProgressSink};

use super::AppState;

/// [`ProgressSink`] implementation backed by a `tokio::sync::broadcast`
/// channel.
pub struct BroadcastSink {
    sender: broadcast::Sender<ProgressEvent>,
}

impl BroadcastSink {
    #[must_use]
    pub fn new(sender: broadcast::Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for BroadcastSink {
    fn publish(&self, event: ProgressEvent) {
        // send() errors only when there are no receivers; that is the normal
        // state before any client connects.
        let _ = self.sender.send(event);
    }
}

/// `GET /api/v1/events` — SSE stream of progress events.
pub(super) async fn progress_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.progress.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|message| {
        // Lagged receivers drop missed events and continue; there is no
        // ordering or delivery guarantee on this channel.
        let event = message.ok()?;
        Event::default()
            .event("update")
            .json_data(&event)
            .ok()
            .map(Ok::<_, Infallible>)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
