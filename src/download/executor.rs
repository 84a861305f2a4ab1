//! Transfer executor: opens the connection, validates the response, and
//! streams the body to the destination file.
//!
//! The executor owns the network connection, the response stream, and the
//! output file for the whole run; nothing else touches them. The body is
//! read in fixed 8 KiB chunks and the cancellation flag is checked once per
//! chunk, before the chunk is written, so a cancelled run stops within one
//! chunk boundary of the signal. Cancellation leaves the partial file in
//! place; no cleanup is attempted.

use std::io;
use std::path::{Path, PathBuf};

use futures_util::TryStreamExt;
use reqwest::StatusCode;
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tracing::{debug, info, instrument};

use super::client::HttpClient;
use super::constants::CHUNK_SIZE;
use super::dispatch::DownloadEvent;
use super::error::TransferError;
use super::progress::ProgressTracker;
use super::task::CancelFlag;

/// Destination file delivered to the success callback.
#[derive(Debug, Clone)]
pub struct TransferredFile {
    /// Final output path.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: u64,
}

/// How a non-failed run ended.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// The body was fully streamed and flushed to `TransferredFile`.
    Completed(TransferredFile),
    /// The cancellation flag was observed mid-stream. Not an error; the
    /// caller gets no terminal notification for this run.
    Cancelled,
}

/// Runs one transfer: GET `url`, require 200, stream the body to `dest`.
///
/// Progress events are emitted per chunk, only when the response carried a
/// usable `Content-Length`. Exactly one `Ok` outcome or one error is
/// produced; all resources are released on every exit path.
#[instrument(skip_all, fields(url = %url))]
pub(crate) async fn execute(
    client: &HttpClient,
    url: &str,
    dest: &Path,
    cancel: &CancelFlag,
    events: &mpsc::UnboundedSender<DownloadEvent>,
) -> Result<Outcome, TransferError> {
    debug!("starting transfer");

    let response = client.get(url).await?;

    let status = response.status();
    if status != StatusCode::OK {
        // Body intentionally not read for non-200 responses.
        return Err(TransferError::http_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
        ));
    }

    // Absent or unparsable Content-Length means unknown size, not an error.
    let total = content_length(&response);
    let mut tracker = ProgressTracker::new(total);
    debug!(total = ?total, path = %dest.display(), "response validated");

    // The destination directory may not exist yet (fresh private fallback).
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TransferError::io(dest, e))?;
    }
    let file = File::create(dest)
        .await
        .map_err(|e| TransferError::io(dest, e))?;
    let mut writer = BufWriter::new(file);

    let mut reader = StreamReader::new(response.bytes_stream().map_err(io::Error::other));
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        let read = reader
            .read(&mut chunk)
            .await
            .map_err(|e| classify_stream_error(url, dest, e))?;
        if read == 0 {
            break;
        }

        // Cooperative cancellation: checked once per chunk, before the write.
        // The run is already cancelled here, so a flush failure must not
        // surface as an error; the partial file is best-effort anyway.
        if cancel.is_set() {
            if let Err(error) = writer.flush().await {
                debug!(error = %error, "ignoring flush failure on cancelled run");
            }
            info!(
                path = %dest.display(),
                bytes = tracker.bytes(),
                "transfer cancelled, partial file left in place"
            );
            return Ok(Outcome::Cancelled);
        }

        writer
            .write_all(&chunk[..read])
            .await
            .map_err(|e| TransferError::io(dest, e))?;

        if let Some(percent) = tracker.advance(read as u64) {
            // Receiver gone means the host stopped listening; keep streaming.
            let _ = events.send(DownloadEvent::Progress(percent));
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| TransferError::io(dest, e))?;

    info!(path = %dest.display(), bytes = tracker.bytes(), "transfer complete");
    Ok(Outcome::Completed(TransferredFile {
        path: dest.to_path_buf(),
        bytes: tracker.bytes(),
    }))
}

/// Reads the Content-Length header as the expected total size.
fn content_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Splits stream-read failures back into the error taxonomy: errors carried
/// over from the HTTP stream are network errors, anything else is local IO.
fn classify_stream_error(url: &str, dest: &Path, error: io::Error) -> TransferError {
    match error.downcast::<reqwest::Error>() {
        Ok(source) => TransferError::network(url, source),
        Err(other) => TransferError::io(dest, other),
    }
}
