//! Download task orchestration: lifecycle state machine, background
//! scheduling, and the caller-facing handle.
//!
//! `start` never blocks the caller. It spawns two tasks per run: the
//! executor task doing the network and file I/O, and a notifier task that
//! drains the run's event channel and invokes the registered callbacks in
//! order. The single sequential channel is what guarantees that every
//! progress notification precedes the terminal one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use super::client::HttpClient;
use super::constants::DEFAULT_FILE_NAME;
use super::dispatch::{
    CallbackDispatcher, CompletedCallback, DownloadEvent, ErrorCallback, ProgressCallback,
};
use super::error::TransferError;
use super::executor::{self, Outcome, TransferredFile};
use super::storage::{self, StorageLocator};

/// Cooperative cancellation flag for one run.
///
/// Set by the caller, read by the executor once per chunk. Not preemptive:
/// an in-flight chunk read or write finishes before the flag takes effect.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the run.
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle state of a run. `Completed`, `Failed`, and `Cancelled` are
/// terminal; no transition leaves `Running` more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Created, not yet scheduled.
    Idle,
    /// Transfer in flight on the background task.
    Running,
    /// Success callback delivered (or would have been, if registered).
    Completed,
    /// Error callback delivered (or would have been, if registered).
    Failed,
    /// Cancellation observed; neither terminal callback fires.
    Cancelled,
}

/// Configuration value for one run: the source URL plus optional callback
/// slots. Immutable once handed to [`DownloadTask::start`].
#[derive(Default)]
pub struct DownloadRequest {
    url: String,
    file_name: Option<String>,
    on_progress: Option<ProgressCallback>,
    on_completed: Option<CompletedCallback>,
    on_error: Option<ErrorCallback>,
}

impl DownloadRequest {
    /// Creates a request for `url` with no callbacks registered.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Overrides the destination file name for this run.
    ///
    /// Without an override every run shares [`DEFAULT_FILE_NAME`], so
    /// concurrent runs resolving to the same directory overwrite each other.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Registers the progress callback (percent in [0, 100], per chunk).
    ///
    /// Never invoked when the response carries no usable `Content-Length`.
    #[must_use]
    pub fn on_progress(mut self, callback: impl Fn(u8) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Registers the success callback, invoked at most once with the
    /// destination file.
    #[must_use]
    pub fn on_completed(
        mut self,
        callback: impl FnOnce(TransferredFile) + Send + 'static,
    ) -> Self {
        self.on_completed = Some(Box::new(callback));
        self
    }

    /// Registers the error callback, invoked at most once with the terminal
    /// error.
    #[must_use]
    pub fn on_error(mut self, callback: impl FnOnce(TransferError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

/// Spawns and owns transfer runs.
///
/// Holds the HTTP client (reused across runs for connection pooling) and the
/// storage locator that resolves destination directories.
pub struct DownloadTask {
    client: HttpClient,
    locator: Arc<dyn StorageLocator>,
}

impl DownloadTask {
    /// Creates a task with a default [`HttpClient`].
    #[must_use]
    pub fn new(locator: Arc<dyn StorageLocator>) -> Self {
        Self::with_client(HttpClient::new(), locator)
    }

    /// Creates a task with an explicitly configured client.
    #[must_use]
    pub fn with_client(client: HttpClient, locator: Arc<dyn StorageLocator>) -> Self {
        Self { client, locator }
    }

    /// Begins the run asynchronously and returns immediately.
    ///
    /// The run fails with [`TransferError::Configuration`] before any
    /// network activity when the URL is empty or unparsable. Must be called
    /// from within a tokio runtime.
    pub fn start(&self, request: DownloadRequest) -> DownloadHandle {
        let DownloadRequest {
            url,
            file_name,
            on_progress,
            on_completed,
            on_error,
        } = request;
        let file_name = file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        let cancel = CancelFlag::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(TaskState::Idle);

        // Notification context: one task drains the channel sequentially.
        let dispatcher = CallbackDispatcher::new(on_progress, on_completed, on_error);
        let notifier = tokio::spawn(dispatcher.run(event_rx));

        let runner = tokio::spawn(run(
            self.client.clone(),
            Arc::clone(&self.locator),
            url,
            file_name,
            cancel.clone(),
            event_tx,
            state_tx,
        ));

        DownloadHandle {
            cancel,
            state: state_rx,
            runner,
            notifier,
        }
    }
}

/// Caller-facing handle for an active run.
pub struct DownloadHandle {
    cancel: CancelFlag,
    state: watch::Receiver<TaskState>,
    runner: JoinHandle<TaskState>,
    notifier: JoinHandle<()>,
}

impl DownloadHandle {
    /// Sets the cooperative cancellation flag. Takes effect at the next
    /// chunk boundary; a cancelled run invokes neither terminal callback.
    pub fn cancel(&self) {
        self.cancel.set();
    }

    /// Current lifecycle state snapshot.
    #[must_use]
    pub fn state(&self) -> TaskState {
        *self.state.borrow()
    }

    /// Waits for the run to finish and for every notification (progress and
    /// terminal) to have been delivered, then returns the terminal state.
    pub async fn join(self) -> TaskState {
        let state = match self.runner.await {
            Ok(state) => state,
            Err(error) => {
                warn!(error = %error, "download task panicked");
                TaskState::Failed
            }
        };
        // The notifier ends once the event channel drains; awaiting it means
        // all callbacks for this run have run.
        let _ = self.notifier.await;
        state
    }
}

/// One run end to end. Owns the single `Running -> terminal` transition and
/// sends at most one terminal event.
async fn run(
    client: HttpClient,
    locator: Arc<dyn StorageLocator>,
    url: String,
    file_name: String,
    cancel: CancelFlag,
    events: mpsc::UnboundedSender<DownloadEvent>,
    state: watch::Sender<TaskState>,
) -> TaskState {
    let _ = state.send(TaskState::Running);

    let outcome = run_inner(&client, locator.as_ref(), &url, &file_name, &cancel, &events).await;

    let terminal = match outcome {
        Ok(Outcome::Completed(file)) => {
            let _ = events.send(DownloadEvent::Completed(file));
            TaskState::Completed
        }
        Ok(Outcome::Cancelled) => TaskState::Cancelled,
        Err(error) => {
            debug!(error = %error, "transfer failed");
            let _ = events.send(DownloadEvent::Failed(error));
            TaskState::Failed
        }
    };

    let _ = state.send(terminal);
    terminal
}

async fn run_inner(
    client: &HttpClient,
    locator: &dyn StorageLocator,
    url: &str,
    file_name: &str,
    cancel: &CancelFlag,
    events: &mpsc::UnboundedSender<DownloadEvent>,
) -> Result<Outcome, TransferError> {
    if url.trim().is_empty() {
        return Err(TransferError::configuration("no URL configured"));
    }
    Url::parse(url)
        .map_err(|e| TransferError::configuration(format!("invalid URL {url}: {e}")))?;

    let dest = storage::resolve(locator, file_name)?;
    executor::execute(client, url, &dest, cancel, events).await
}
