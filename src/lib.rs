//! Background HTTP file-transfer library.
//!
//! This library downloads a single file from an HTTP(S) URL to local storage
//! on a background task, reporting progress, completion, or failure back to
//! the host application through callbacks. It is aimed at one-shot large-file
//! downloads (installer packages and the like) kicked off by an application
//! that must stay responsive while the transfer runs.
//!
//! # Architecture
//!
//! Everything lives under the [`download`] module:
//! - [`download::DownloadTask`] - spawns and owns a transfer run
//! - [`download::DownloadRequest`] - URL plus optional callback slots
//! - [`download::StorageLocator`] - destination directory lookup with fallback
//! - [`download::TransferError`] - structured error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use bgfetch::{DownloadRequest, DownloadTask, SystemStorage};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let task = DownloadTask::new(Arc::new(SystemStorage::new("myapp")));
//! let request = DownloadRequest::new("https://example.com/app.bin")
//!     .on_progress(|percent| println!("{percent}%"))
//!     .on_completed(|file| println!("saved to {}", file.path.display()))
//!     .on_error(|error| eprintln!("failed: {error}"));
//! let handle = task.start(request);
//! handle.join().await;
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;

// Re-export commonly used types
pub use download::{
    CancelFlag, DEFAULT_FILE_NAME, DownloadHandle, DownloadRequest, DownloadTask, HttpClient,
    StorageLocator, SystemStorage, TaskState, TransferError, TransferredFile,
};
