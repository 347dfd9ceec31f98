//! Shared timeout policy
//!
//! A [`Timeout`] is handed out as `Arc<Timeout>` so that a deadline set through
//! any decorator in a chain is observed by the source that actually blocks.

use super::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy)]
struct TimeoutState {
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

/// Timeout and deadline for blocking reads
///
/// `timeout` bounds a single blocking operation; `deadline` bounds the whole
/// exchange. Either may be unset.
#[derive(Debug, Default)]
pub struct Timeout {
    state: Mutex<TimeoutState>,
}

impl Timeout {
    /// Create a shared timeout with neither a timeout nor a deadline
    pub fn new() -> Arc<Self> {
        Arc::new(Timeout::default())
    }

    /// Create a shared timeout bounding each blocking operation
    pub fn with_timeout(timeout: Duration) -> Arc<Self> {
        let shared = Timeout::new();
        shared.set_timeout(Some(timeout));
        shared
    }

    fn state(&self) -> MutexGuard<'_, TimeoutState> {
        // The state is plain data, a poisoned lock still holds a usable value
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the per-operation timeout
    pub fn set_timeout(&self, timeout: Option<Duration>) {
        self.state().timeout = timeout;
    }

    /// Get the per-operation timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.state().timeout
    }

    /// Set an absolute deadline
    pub fn set_deadline(&self, deadline: Instant) {
        self.state().deadline = Some(deadline);
    }

    /// Set a deadline `duration` from now
    pub fn deadline_after(&self, duration: Duration) {
        self.set_deadline(Instant::now() + duration);
    }

    /// Remove the deadline
    pub fn clear_deadline(&self) {
        self.state().deadline = None;
    }

    /// Get the deadline
    pub fn deadline(&self) -> Option<Instant> {
        self.state().deadline
    }

    /// How long the next blocking operation may wait
    ///
    /// The smaller of the timeout and the time left until the deadline.
    /// `None` means wait indefinitely.
    pub fn remaining(&self) -> Option<Duration> {
        let state = *self.state();
        let until_deadline = state
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));

        match (state.timeout, until_deadline) {
            (Some(timeout), Some(left)) => Some(timeout.min(left)),
            (timeout, left) => timeout.or(left),
        }
    }

    /// Fail with [`Error::Timeout`] if the deadline has passed
    pub fn throw_if_reached(&self) -> Result<()> {
        match self.state().deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::Timeout),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_timeout_waits_indefinitely() {
        let timeout = Timeout::new();
        assert_eq!(timeout.remaining(), None);
        assert!(timeout.throw_if_reached().is_ok());
    }

    #[test]
    fn test_remaining_is_bounded_by_timeout() {
        let timeout = Timeout::with_timeout(Duration::from_millis(50));
        timeout.deadline_after(Duration::from_secs(60));

        assert_eq!(timeout.remaining(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_remaining_is_bounded_by_deadline() {
        let timeout = Timeout::with_timeout(Duration::from_secs(60));
        timeout.deadline_after(Duration::from_millis(50));

        let remaining = timeout.remaining().unwrap();
        assert!(remaining <= Duration::from_millis(50));
    }

    #[test]
    fn test_passed_deadline() {
        let timeout = Timeout::new();
        timeout.set_deadline(Instant::now() - Duration::from_millis(1));

        assert_eq!(timeout.remaining(), Some(Duration::ZERO));
        assert!(matches!(timeout.throw_if_reached(), Err(Error::Timeout)));

        timeout.clear_deadline();
        assert!(timeout.throw_if_reached().is_ok());
    }

    #[test]
    fn test_shared_updates_are_visible() {
        let timeout = Timeout::new();
        let other = Arc::clone(&timeout);

        other.set_timeout(Some(Duration::from_secs(3)));
        assert_eq!(timeout.timeout(), Some(Duration::from_secs(3)));
    }
}
