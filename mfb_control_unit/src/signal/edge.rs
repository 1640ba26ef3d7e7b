//! Rising/falling edge detection keyed by signal identifier.
//!
//! Each detector owns its own history, so identifiers only need to be unique
//! within one function block. Unseen signals start out low.

use heapless::LinearMap;
use mfb_common::consts::EDGE_SLOTS;
use tracing::warn;

/// Identifier of one tracked boolean signal within a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalId(pub u16);

/// Per-instance edge history.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    previous: LinearMap<SignalId, bool, EDGE_SLOTS>,
    overflow_reported: bool,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self {
            previous: LinearMap::new(),
            overflow_reported: false,
        }
    }

    /// True iff `id` was low on the previous call and `signal` is high now.
    pub fn rising_edge(&mut self, id: SignalId, signal: bool) -> bool {
        let previous = self.swap(id, signal);
        !previous && signal
    }

    /// True iff `id` was high on the previous call and `signal` is low now.
    pub fn falling_edge(&mut self, id: SignalId, signal: bool) -> bool {
        let previous = self.swap(id, signal);
        previous && !signal
    }

    /// Number of signals with recorded history.
    #[inline]
    pub fn tracked(&self) -> usize {
        self.previous.len()
    }

    /// Store `signal` as the new history for `id`, returning the old value.
    fn swap(&mut self, id: SignalId, signal: bool) -> bool {
        if let Some(slot) = self.previous.get_mut(&id) {
            return core::mem::replace(slot, signal);
        }
        if self.previous.insert(id, signal).is_err() && !self.overflow_reported {
            warn!(
                signal = id.0,
                slots = EDGE_SLOTS,
                "edge history full, signal tracked without memory"
            );
            self.overflow_reported = true;
        }
        false
    }
}
