//! Application telemetry events and sinks.
//!
//! The controller records one event per confirmed mutation and per remote
//! rejection, so operators can follow what a session did without scraping
//! logs.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by Vitrine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The remote store accepted a new review.
    ReviewCreated {
        /// Product the review was attached to.
        product_id: u64,
        /// Server-assigned identifier, when the response carried one.
        review_id: Option<u64>,
    },
    /// The remote store accepted an edited review text.
    ReviewUpdated {
        /// Identifier of the edited review.
        review_id: u64,
    },
    /// The remote store deleted a review.
    ReviewDeleted {
        /// Identifier of the deleted review.
        review_id: u64,
    },
    /// The remote store deleted a product.
    ProductDeleted {
        /// Identifier of the deleted product.
        product_id: u64,
    },
    /// A remote call failed and local state was left unchanged.
    RemoteRejected {
        /// Name of the failed operation.
        operation: String,
        /// HTTP status, when the store answered at all.
        status: Option<u16>,
    },
    /// The review list was reloaded from the remote store.
    RefreshCompleted {
        /// Number of reviews now displayed.
        review_count: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Test helpers for capturing telemetry.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every recorded event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Returns a copy of the recorded events.
        #[must_use]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }

        /// Removes and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}
