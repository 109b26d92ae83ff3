//! Per-frame coalescing of high-frequency samples

/// Coalesces bursts of samples into a single run per animation frame.
///
/// The first sample after a run asks the caller to request a frame; samples
/// arriving while that frame is pending only replace the stored value, so the
/// frame always sees the most recent one.
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle<T> {
    pending: bool,
    latest: Option<T>,
}

impl<T> FrameThrottle<T> {
    pub fn new() -> Self {
        Self {
            pending: false,
            latest: None,
        }
    }

    /// Record a sample. Returns `true` when a frame must be requested.
    pub fn offer(&mut self, sample: T) -> bool {
        self.latest = Some(sample);
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// The frame arrived: hand out the latest sample and re-arm
    pub fn take(&mut self) -> Option<T> {
        self.pending = false;
        self.latest.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
