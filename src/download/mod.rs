//! Background file transfer: connection setup, streaming, progress, and
//! callback dispatch.
//!
//! A run moves through `Idle -> Running -> {Completed, Failed, Cancelled}`.
//! The caller builds a [`DownloadRequest`], hands it to
//! [`DownloadTask::start`], and gets back a [`DownloadHandle`] immediately;
//! all network and file I/O happens on a spawned background task. Progress
//! and the single terminal outcome are delivered in order on a dedicated
//! notifier task, so callbacks never run on the I/O path and the terminal
//! notification is always the last one a run produces.
//!
//! # Example
//!
//! ```no_run
//! use bgfetch::download::{DownloadRequest, DownloadTask, SystemStorage};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let task = DownloadTask::new(Arc::new(SystemStorage::new("myapp")));
//! let handle = task.start(
//!     DownloadRequest::new("https://example.com/installer.bin")
//!         .on_progress(|percent| println!("{percent}%")),
//! );
//! handle.join().await;
//! # }
//! ```

mod client;
pub mod constants;
mod dispatch;
mod error;
mod executor;
mod progress;
mod storage;
mod task;

pub use client::HttpClient;
pub use constants::DEFAULT_FILE_NAME;
pub use error::TransferError;
pub use executor::TransferredFile;
pub use storage::{StorageLocator, SystemStorage};
pub use task::{CancelFlag, DownloadHandle, DownloadRequest, DownloadTask, TaskState};

// Note: no module-local Result aliases. Use `Result<T, TransferError>`
// explicitly in function signatures.
