//! Notification delivery for a transfer run.
//!
//! The executor never invokes caller code directly. It pushes
//! [`DownloadEvent`]s onto a per-run channel and a dedicated notifier task
//! drains them here, sequentially, so progress callbacks always arrive in
//! computation order and the terminal callback is always last. A cancelled
//! run sends no terminal event at all; the channel just closes.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::TransferError;
use super::executor::TransferredFile;

/// Progress callback: percentage in [0, 100], invoked per chunk.
pub(crate) type ProgressCallback = Box<dyn Fn(u8) + Send + 'static>;

/// Success callback: receives the destination file exactly once.
pub(crate) type CompletedCallback = Box<dyn FnOnce(TransferredFile) + Send + 'static>;

/// Error callback: receives the terminal error exactly once.
pub(crate) type ErrorCallback = Box<dyn FnOnce(TransferError) + Send + 'static>;

/// A notification produced by a run, in delivery order.
#[derive(Debug)]
pub(crate) enum DownloadEvent {
    /// Bounded percentage, emitted only when the total size is known.
    Progress(u8),
    /// Terminal: the transfer finished and the file is fully written.
    Completed(TransferredFile),
    /// Terminal: the transfer failed.
    Failed(TransferError),
}

/// Drains the event channel and forwards notifications to the caller's
/// registered callbacks.
///
/// Exactly one terminal event is delivered per run; should a second one ever
/// arrive it is dropped with a warning rather than invoking caller code
/// twice. The `FnOnce` slots are consumed on first delivery, so double
/// invocation is also impossible by construction.
pub(crate) struct CallbackDispatcher {
    on_progress: Option<ProgressCallback>,
    on_completed: Option<CompletedCallback>,
    on_error: Option<ErrorCallback>,
    finished: bool,
}

impl CallbackDispatcher {
    pub(crate) fn new(
        on_progress: Option<ProgressCallback>,
        on_completed: Option<CompletedCallback>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        Self {
            on_progress,
            on_completed,
            on_error,
            finished: false,
        }
    }

    /// Runs until the sender side drops, then returns. This is the
    /// notification context for the run.
    pub(crate) async fn run(mut self, mut events: mpsc::UnboundedReceiver<DownloadEvent>) {
        while let Some(event) = events.recv().await {
            self.deliver(event);
        }
        debug!("notification channel closed");
    }

    fn deliver(&mut self, event: DownloadEvent) {
        match event {
            DownloadEvent::Progress(percent) => {
                debug_assert!(percent <= 100);
                if let Some(on_progress) = &self.on_progress {
                    on_progress(percent);
                }
            }
            DownloadEvent::Completed(file) => {
                if self.mark_finished("completed") {
                    if let Some(on_completed) = self.on_completed.take() {
                        on_completed(file);
                    }
                }
            }
            DownloadEvent::Failed(error) => {
                if self.mark_finished("failed") {
                    if let Some(on_error) = self.on_error.take() {
                        on_error(error);
                    }
                }
            }
        }
    }

    /// Returns false (and warns) if a terminal event was already delivered.
    fn mark_finished(&mut self, kind: &str) -> bool {
        if self.finished {
            warn!(kind, "dropping duplicate terminal event");
            return false;
        }
        self.finished = true;
        true
    }
}
