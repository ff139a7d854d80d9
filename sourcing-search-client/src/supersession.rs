use futures::future::{AbortHandle, AbortRegistration};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[cfg(feature = "graphql")]
use async_graphql::SimpleObject;

/// Handle for one started search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    sequence: u64,
}

impl RequestToken {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Abort handle of the search currently in flight, tagged with its sequence
type InFlight = Option<(u64, AbortHandle)>;

/// Tracks which search is the latest one.
///
/// Every [`begin`](Self::begin) bumps a shared sequence and aborts the search
/// before it. Aborting is best effort; the sequence comparison in
/// [`is_current`](Self::is_current) is what decides whether a settled result
/// may be delivered.
#[derive(Debug, Default)]
pub struct SupersessionTracker {
    sequence: AtomicU64,
    in_flight: Mutex<InFlight>,
}

impl SupersessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding whatever was in flight.
    ///
    /// The returned registration is meant for wrapping the network future in
    /// [`futures::future::Abortable`].
    pub fn begin(&self) -> (RequestToken, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        let mut in_flight = self.lock_in_flight();

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((previous, previous_handle)) = in_flight.take() {
            log::debug!("Search {} superseded by search {}", previous, sequence);
            previous_handle.abort();
        }
        *in_flight = Some((sequence, handle));

        (RequestToken { sequence }, registration)
    }

    /// Whether no newer search has started since `token` was issued
    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.sequence.load(Ordering::SeqCst) == token.sequence
    }

    /// Release the in-flight slot, but only if it still belongs to `token`
    pub fn finish(&self, token: &RequestToken) {
        let mut in_flight = self.lock_in_flight();
        if matches!(*in_flight, Some((sequence, _)) if sequence == token.sequence) {
            *in_flight = None;
        }
    }

    /// Supersede the search in flight without starting a new one
    pub fn cancel_pending(&self) {
        let mut in_flight = self.lock_in_flight();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((previous, handle)) = in_flight.take() {
            log::info!("Cancelled pending search {}", previous);
            handle.abort();
        }
        log::debug!("Search sequence advanced to {}", sequence);
    }

    pub fn stats(&self) -> TrackerStats {
        let in_flight = self.lock_in_flight();
        TrackerStats {
            sequence: self.sequence.load(Ordering::SeqCst),
            in_flight: in_flight.is_some(),
        }
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, InFlight> {
        // The guarded state stays consistent even if a holder panicked
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Statistics for the supersession tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct TrackerStats {
    /// Sequence number of the latest search
    pub sequence: u64,
    /// Whether the latest search has yet to settle
    pub in_flight: bool,
}

/// Thread-safe wrapper for the tracker
pub type SharedSupersessionTracker = Arc<SupersessionTracker>;
