/// Coalesces redraw requests into at most one pending animation frame.
///
/// [`RedrawScheduler::request`] records the latest frame index and reports
/// whether the host must ask for a new animation frame; the per-frame
/// callback drains it with [`RedrawScheduler::take`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedrawScheduler {
    pending: Option<usize>,
    in_flight: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no animation frame is in flight yet.
    #[must_use]
    pub fn request(&mut self, index: usize) -> bool {
        self.pending = Some(index);
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn take(&mut self) -> Option<usize> {
        self.in_flight = false;
        self.pending.take()
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.in_flight = false;
    }
}
