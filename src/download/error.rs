//! Error types for the download module.
//!
//! One variant per failure class; all are terminal for a run and none are
//! retried internally. Each carries enough context (kind plus the original
//! message or status) for the host application to build its own messaging.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a transfer run.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-level error (DNS resolution, connect failure, TLS errors,
    /// connect/read timeouts, mid-stream read failures).
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status other than 200 OK.
    #[error("HTTP {status} {message}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The status text accompanying the code.
        message: String,
    },

    /// File system error while writing the destination file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Neither the primary nor the fallback storage directory could be
    /// resolved.
    #[error("no usable storage directory: {message}")]
    StorageUnavailable {
        /// Why both resolution attempts failed.
        message: String,
    },

    /// The request was not runnable as configured (missing or invalid URL).
    #[error("invalid download configuration: {message}")]
    Configuration {
        /// What was wrong with the configuration.
        message: String,
    },
}

impl TransferError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a storage-unavailable error from both failed lookups.
    pub fn storage_unavailable(
        primary: &std::io::Error,
        fallback: &std::io::Error,
    ) -> Self {
        Self::StorageUnavailable {
            message: format!("primary: {primary}; fallback: {fallback}"),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or
// `From<std::io::Error>` because the variants require context (url, path)
// that the source errors don't provide. The helper constructors are the
// correct pattern here as they let callers supply that context.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_carries_code_and_message() {
        let error = TransferError::http_status(404, "Not Found");
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("Not Found"), "Expected status text in: {msg}");
    }

    #[test]
    fn test_io_display_carries_path() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = TransferError::io(PathBuf::from("/tmp/download.bin"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/download.bin"), "Expected path in: {msg}");
    }

    #[test]
    fn test_storage_unavailable_display_mentions_both_failures() {
        let primary = std::io::Error::new(std::io::ErrorKind::NotFound, "no public dir");
        let fallback = std::io::Error::new(std::io::ErrorKind::NotFound, "no private dir");
        let error = TransferError::storage_unavailable(&primary, &fallback);
        let msg = error.to_string();
        assert!(msg.contains("no public dir"), "Expected primary cause in: {msg}");
        assert!(msg.contains("no private dir"), "Expected fallback cause in: {msg}");
    }

    #[test]
    fn test_configuration_display() {
        let error = TransferError::configuration("no URL configured");
        let msg = error.to_string();
        assert!(
            msg.contains("no URL configured"),
            "Expected cause in: {msg}"
        );
    }
}
