//! Fallback chain over connection suites
//!
//! A connection attempt holds candidate suites ordered most to least
//! restrictive. [`SuiteSelector::configure`] applies the first candidate the
//! socket is compatible with; after a failed handshake,
//! [`SuiteSelector::connection_failed`] says whether retrying with the next
//! candidate makes sense. The retry itself is the caller's.

use super::socket::SocketConfigurable;
use super::suite::ConnectionSuite;
use super::TlsError;
use std::io::ErrorKind;

/// Walks a list of candidate suites across connection attempts
#[derive(Debug, Clone)]
pub struct SuiteSelector {
    candidates: Vec<ConnectionSuite>,
    next_index: usize,
    is_fallback_possible: bool,
    is_fallback: bool,
}

impl SuiteSelector {
    /// Create a selector over `candidates`, most restrictive first
    pub fn new(candidates: Vec<ConnectionSuite>) -> Self {
        SuiteSelector {
            candidates,
            next_index: 0,
            is_fallback_possible: false,
            is_fallback: false,
        }
    }

    /// Pick and apply the next compatible suite
    ///
    /// Fails with [`TlsError::NoCompatibleSuite`] when no remaining candidate
    /// matches the socket. Socket errors from applying the suite are passed
    /// through.
    pub fn configure<S>(&mut self, socket: &mut S) -> Result<ConnectionSuite, TlsError>
    where
        S: SocketConfigurable,
        TlsError: From<S::Error>,
    {
        let found = self.candidates[self.next_index.min(self.candidates.len())..]
            .iter()
            .position(|suite| suite.is_compatible(&*socket))
            .map(|offset| self.next_index + offset);

        let index = match found {
            Some(index) => index,
            None => {
                let names: Vec<String> = self.candidates.iter().map(|s| s.to_string()).collect();
                return Err(TlsError::NoCompatibleSuite(format!(
                    "is_fallback={}, suites={:?}, supported protocols={:?}",
                    self.is_fallback,
                    names,
                    socket.enabled_protocol_versions()
                )));
            }
        };

        let suite = self.candidates[index].clone();
        self.next_index = index + 1;
        self.is_fallback_possible = self.candidates[self.next_index..]
            .iter()
            .any(|candidate| candidate.is_compatible(&*socket));

        log::debug!(
            "selected suite {} of {} (fallback={}): {}",
            index + 1,
            self.candidates.len(),
            self.is_fallback,
            suite
        );
        suite.apply(socket, self.is_fallback)?;

        Ok(suite)
    }

    /// Record a failed attempt; returns whether a fallback attempt should follow
    ///
    /// Only handshake failures and connection-level I/O errors trigger a
    /// fallback. Certificate problems, timeouts and local OpenSSL setup or
    /// configuration errors are not fixed by a weaker suite.
    pub fn connection_failed(&mut self, error: &TlsError) -> bool {
        self.is_fallback = true;

        if !self.is_fallback_possible {
            return false;
        }

        match error {
            TlsError::HandshakeFailed(_) => true,
            TlsError::Io(e) => !matches!(
                e.kind(),
                ErrorKind::TimedOut | ErrorKind::Interrupted | ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }

    /// Whether a later candidate was compatible at the last configure
    pub fn is_fallback_possible(&self) -> bool {
        self.is_fallback_possible
    }

    /// Whether the next configure is a fallback attempt
    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }
}
