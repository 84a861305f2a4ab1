//! Progress computation for a single transfer run.
//!
//! Converts raw byte counts into a bounded percentage. When the total
//! expected size is unknown (or zero), no percentage is ever produced; the
//! terminal outcome still fires without any progress notifications.

/// Tracks bytes transferred against the expected total.
///
/// Percentages are `floor(bytes * 100 / total)`, clamped to [0, 100], and
/// non-decreasing because the byte count only grows.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    bytes: u64,
    total: Option<u64>,
}

impl ProgressTracker {
    /// Creates a tracker. `total` of `None` or `Some(0)` means the size is
    /// unknown and [`advance`](Self::advance) will never yield a percentage.
    pub(crate) fn new(total: Option<u64>) -> Self {
        Self {
            bytes: 0,
            total: total.filter(|t| *t > 0),
        }
    }

    /// Records `count` more bytes and returns the new percentage when the
    /// total is known.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn advance(&mut self, count: u64) -> Option<u8> {
        self.bytes = self.bytes.saturating_add(count);
        self.total.map(|total| {
            let percent = self.bytes.saturating_mul(100) / total;
            percent.min(100) as u8
        })
    }

    /// Total bytes recorded so far.
    pub(crate) fn bytes(&self) -> u64 {
        self.bytes
    }
}
