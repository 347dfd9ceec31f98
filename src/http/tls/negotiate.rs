//! Connection suite negotiation
//!
//! Reconciles a [`ConnectionSuite`] with what a socket has enabled:
//!
//! 1. `resolve` intersects the suite's lists with the socket's enabled lists,
//!    keeping the suite's preference order and the socket's spelling
//! 2. on fallback attempts, `TLS_FALLBACK_SCSV` is appended when the socket
//!    supports it (RFC 7507)
//! 3. `apply` writes the resolved lists back to the socket
//!
//! `is_compatible` is the pre-flight check a caller runs before choosing a
//! suite from a fallback chain.

use super::cipher::{CipherSuite, FALLBACK_SCSV};
use super::socket::{SocketCapabilities, SocketConfigurable};
use super::suite::ConnectionSuite;
use std::borrow::Cow;

/// Whether the socket, as currently configured, could satisfy `suite`
///
/// An unencrypted suite is never compatible. Absent lists always match;
/// present lists need at least one entry in common with the socket's
/// enabled list.
pub fn is_compatible<S: SocketCapabilities + ?Sized>(
    suite: &ConnectionSuite,
    socket: &S,
) -> bool {
    if !suite.is_encrypted() {
        return false;
    }

    if let Some(versions) = suite.protocol_version_names() {
        let enabled = socket.enabled_protocol_versions();
        if !non_empty_intersection(versions, &enabled, same_version) {
            return false;
        }
    }

    if let Some(suites) = suite.cipher_suite_names() {
        let enabled = socket.enabled_cipher_suites();
        if !non_empty_intersection(suites, &enabled, CipherSuite::same_suite) {
            return false;
        }
    }

    true
}

/// The subset of `suite` the socket can actually use
///
/// Never mutates `socket`. An unencrypted suite is returned unchanged.
pub fn resolve<S: SocketCapabilities + ?Sized>(
    suite: &ConnectionSuite,
    socket: &S,
    is_fallback: bool,
) -> ConnectionSuite {
    if !suite.is_encrypted() {
        return suite.clone();
    }

    let enabled_suites = socket.enabled_cipher_suites();
    let mut cipher_suites = match suite.cipher_suite_names() {
        Some(preferred) => intersect(preferred, &enabled_suites, CipherSuite::same_suite),
        None => enabled_suites,
    };

    let enabled_versions = socket.enabled_protocol_versions();
    let protocol_versions = match suite.protocol_version_names() {
        Some(preferred) => intersect(preferred, &enabled_versions, same_version),
        None => enabled_versions,
    };

    if is_fallback {
        // Linear scan; supported lists are short and this runs once per handshake
        let supported = socket.supported_cipher_suites();
        if let Some(scsv) = supported.iter().find(|s| CipherSuite::same_suite(s, FALLBACK_SCSV)) {
            if !cipher_suites.iter().any(|s| CipherSuite::same_suite(s, scsv)) {
                cipher_suites.push(scsv.clone());
            }
        }
    }

    suite.negotiated(cipher_suites, protocol_versions)
}

/// Resolve `suite` against `socket` and install the result
///
/// Socket errors are returned untouched; the socket's configuration is then
/// undefined and the attempt should be abandoned.
pub fn apply<S: SocketConfigurable + ?Sized>(
    suite: &ConnectionSuite,
    socket: &mut S,
    is_fallback: bool,
) -> Result<(), S::Error> {
    if !suite.is_encrypted() {
        return Ok(());
    }

    let resolved = resolve(suite, socket, is_fallback);

    if let Some(versions) = resolved.protocol_version_names() {
        let versions = to_strings(versions);
        log::debug!("enabling TLS versions {:?}", versions);
        socket.set_enabled_protocol_versions(&versions)?;
    }

    if let Some(suites) = resolved.cipher_suite_names() {
        let suites = to_strings(suites);
        log::debug!(
            "enabling {} cipher suites (fallback={}): {:?}",
            suites.len(),
            is_fallback,
            suites
        );
        socket.set_enabled_cipher_suites(&suites)?;
    }

    Ok(())
}

impl ConnectionSuite {
    /// See [`is_compatible`]
    pub fn is_compatible<S: SocketCapabilities + ?Sized>(&self, socket: &S) -> bool {
        is_compatible(self, socket)
    }

    /// See [`resolve`]
    pub fn resolve<S: SocketCapabilities + ?Sized>(
        &self,
        socket: &S,
        is_fallback: bool,
    ) -> ConnectionSuite {
        resolve(self, socket, is_fallback)
    }

    /// See [`apply`]
    pub fn apply<S: SocketConfigurable + ?Sized>(
        &self,
        socket: &mut S,
        is_fallback: bool,
    ) -> Result<(), S::Error> {
        apply(self, socket, is_fallback)
    }
}

fn same_version(a: &str, b: &str) -> bool {
    a == b
}

fn to_strings(names: &[Cow<'static, str>]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Entries of `enabled` that match `preferred`, in `preferred` order
///
/// Matched entries keep the socket's spelling. Duplicates are dropped.
fn intersect(
    preferred: &[Cow<'static, str>],
    enabled: &[String],
    same: fn(&str, &str) -> bool,
) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(preferred.len().min(enabled.len()));
    for wanted in preferred {
        if let Some(found) = enabled.iter().find(|have| same(wanted, have)) {
            if !result.iter().any(|r| same(r, found)) {
                result.push(found.clone());
            }
        }
    }
    result
}

fn non_empty_intersection(
    preferred: &[Cow<'static, str>],
    enabled: &[String],
    same: fn(&str, &str) -> bool,
) -> bool {
    preferred
        .iter()
        .any(|wanted| enabled.iter().any(|have| same(wanted, have)))
}
