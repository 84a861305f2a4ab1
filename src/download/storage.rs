//! Destination-path resolution with fallback.
//!
//! A [`StorageLocator`] supplies two candidate directories: a primary public
//! one (shared downloads area) and an application-private fallback. The
//! resolver computes the destination path only; directory and file creation
//! are left to the write step in the executor.

use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::error::TransferError;

/// Supplies the candidate destination directories for a run.
///
/// Implementations may fail either lookup (missing platform directory,
/// denied permission); the resolver falls back from the public directory to
/// the private one and only errors when both are unavailable.
pub trait StorageLocator: Send + Sync {
    /// Primary public storage directory (e.g. the user's downloads folder).
    fn public_dir(&self) -> io::Result<PathBuf>;

    /// Application-private fallback directory.
    fn private_dir(&self) -> io::Result<PathBuf>;
}

/// Resolves the destination path for `file_name`.
///
/// Never propagates a lookup failure directly: a failed primary lookup falls
/// back transparently, and only when both fail does this return
/// [`TransferError::StorageUnavailable`].
pub(crate) fn resolve(
    locator: &dyn StorageLocator,
    file_name: &str,
) -> Result<PathBuf, TransferError> {
    match locator.public_dir() {
        Ok(dir) => Ok(dir.join(file_name)),
        Err(primary) => {
            debug!(error = %primary, "primary storage unavailable, trying fallback");
            match locator.private_dir() {
                Ok(dir) => Ok(dir.join(file_name)),
                Err(fallback) => {
                    warn!(
                        primary_error = %primary,
                        fallback_error = %fallback,
                        "no usable storage directory"
                    );
                    Err(TransferError::storage_unavailable(&primary, &fallback))
                }
            }
        }
    }
}

/// Default locator backed by the host platform's well-known directories.
///
/// The public directory is the user's download folder; the fallback is a
/// per-application subdirectory of the local data directory. Mirrors the
/// shared-downloads / app-private split the library was designed around.
#[derive(Debug, Clone)]
pub struct SystemStorage {
    app_name: String,
}

impl SystemStorage {
    /// Creates a locator whose private fallback lives under `app_name` in
    /// the platform data directory.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl StorageLocator for SystemStorage {
    fn public_dir(&self) -> io::Result<PathBuf> {
        dirs::download_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "platform has no download directory",
            )
        })
    }

    fn private_dir(&self) -> io::Result<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join(&self.app_name))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "platform has no local data directory",
                )
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FixedLocator {
        public: Option<PathBuf>,
        private: Option<PathBuf>,
    }

    impl StorageLocator for FixedLocator {
        fn public_dir(&self) -> io::Result<PathBuf> {
            self.public
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "public denied"))
        }

        fn private_dir(&self) -> io::Result<PathBuf> {
            self.private
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "private missing"))
        }
    }

    #[test]
    fn test_resolve_prefers_primary_directory() {
        let locator = FixedLocator {
            public: Some(PathBuf::from("/downloads")),
            private: Some(PathBuf::from("/private")),
        };
        let path = resolve(&locator, "download.bin").unwrap();
        assert_eq!(path, PathBuf::from("/downloads/download.bin"));
    }

    #[test]
    fn test_resolve_falls_back_when_primary_fails() {
        let locator = FixedLocator {
            public: None,
            private: Some(PathBuf::from("/private")),
        };
        let path = resolve(&locator, "download.bin").unwrap();
        assert_eq!(path, PathBuf::from("/private/download.bin"));
    }

    #[test]
    fn test_resolve_errors_when_both_fail() {
        let locator = FixedLocator {
            public: None,
            private: None,
        };
        let error = resolve(&locator, "download.bin").unwrap_err();
        match error {
            TransferError::StorageUnavailable { message } => {
                assert!(message.contains("public denied"), "in: {message}");
                assert!(message.contains("private missing"), "in: {message}");
            }
            other => panic!("Expected StorageUnavailable, got: {other:?}"),
        }
    }

    #[test]
    fn test_system_storage_private_dir_is_scoped_to_app() {
        let locator = SystemStorage::new("bgfetch-test");
        if let Ok(dir) = locator.private_dir() {
            assert!(dir.ends_with("bgfetch-test"));
        }
    }
}
