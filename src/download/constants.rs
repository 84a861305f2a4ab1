//! Constants for the download module (timeouts, chunking, file naming).

use std::time::Duration;

/// HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// HTTP read timeout (15 seconds between reads on the response stream).
pub const READ_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Size of one streamed chunk (8 KiB). Cancellation is checked once per
/// chunk, so this bounds how much extra data a cancelled run can write.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Destination file name used when the request does not supply one.
///
/// The name is shared by every run that relies on the default: two
/// concurrent runs resolving to the same directory will overwrite each
/// other's in-progress file. Callers that need isolation must supply a
/// file name per request.
pub const DEFAULT_FILE_NAME: &str = "download.bin";
