//! Progress notifications emitted while a scrape or publish runs.
//!
//! The pipeline pushes events through the [`ProgressSink`] capability and
//! never learns what transport (if any) carries them. Delivery is
//! fire-and-forget: a sink with no listeners, a slow listener, or a
//! disconnected listener must never block or fail the caller.

use serde::{Deserialize, Serialize};

use crate::product::ProductRecord;

/// One outbound notification: a human-readable message, optionally carrying
/// the record the message refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRecord>,
}

impl ProgressEvent {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            product: None,
        }
    }

    #[must_use]
    pub fn with_product(message: impl Into<String>, product: ProductRecord) -> Self {
        Self {
            message: message.into(),
            product: Some(product),
        }
    }
}

/// Capability to accept progress events. Implementations must not block.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

/// Sink that drops every event. Used by the CLI and by tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn publish(&self, _event: ProgressEvent) {}
}
