//! Socket capability interfaces
//!
//! The negotiator never talks to a TLS library directly. It queries a
//! [`SocketCapabilities`] implementation and writes its result through
//! [`SocketConfigurable`]. [`SocketProfile`] is the in-memory implementation
//! used by [`super::TlsConfig`] and in tests.

use super::cipher::CipherSuite;
use super::version::TlsVersion;
use super::TlsError;

/// Read access to what a socket supports and has enabled
pub trait SocketCapabilities {
    /// Cipher suites currently enabled, in the socket's order
    fn enabled_cipher_suites(&self) -> Vec<String>;

    /// TLS versions currently enabled, in the socket's order
    fn enabled_protocol_versions(&self) -> Vec<String>;

    /// Every cipher suite the socket could enable, including signalling values
    fn supported_cipher_suites(&self) -> Vec<String>;
}

/// Write access to a socket's enabled TLS parameters
pub trait SocketConfigurable: SocketCapabilities {
    /// Error raised by the socket when a value is rejected
    type Error;

    /// Replace the enabled cipher suites
    fn set_enabled_cipher_suites(&mut self, suites: &[String]) -> Result<(), Self::Error>;

    /// Replace the enabled TLS versions
    fn set_enabled_protocol_versions(&mut self, versions: &[String]) -> Result<(), Self::Error>;
}

/// In-memory socket capabilities
///
/// Setting an enabled list fails if it names anything the profile does not
/// support, matching how TLS sockets reject unknown values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketProfile {
    supported_cipher_suites: Vec<String>,
    enabled_cipher_suites: Vec<String>,
    supported_protocol_versions: Vec<String>,
    enabled_protocol_versions: Vec<String>,
}

impl SocketProfile {
    /// Create a profile that supports nothing
    pub fn new() -> Self {
        SocketProfile::default()
    }

    /// Profile matching what the OpenSSL binding can express
    ///
    /// Supports every catalogued suite and TLS 1.0 through 1.3. Enables the
    /// AEAD and CBC suites, leaving RC4 and signalling values disabled, and
    /// TLS 1.2 and 1.3.
    pub fn openssl() -> Self {
        let supported: Vec<String> = CipherSuite::catalog()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        let enabled: Vec<String> = CipherSuite::catalog()
            .iter()
            .filter(|s| !s.is_signalling() && !s.name().contains("_RC4_"))
            .map(|s| s.name().to_string())
            .collect();

        SocketProfile {
            supported_cipher_suites: supported,
            enabled_cipher_suites: enabled,
            supported_protocol_versions: [
                TlsVersion::Tls13,
                TlsVersion::Tls12,
                TlsVersion::Tls11,
                TlsVersion::Tls10,
            ]
            .iter()
            .map(|v| v.name().to_string())
            .collect(),
            enabled_protocol_versions: vec![
                TlsVersion::Tls13.name().to_string(),
                TlsVersion::Tls12.name().to_string(),
            ],
        }
    }

    /// Set the supported cipher suites
    ///
    /// Enabled suites that are no longer supported are dropped.
    pub fn with_supported_cipher_suites<I, S>(mut self, suites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_cipher_suites = suites.into_iter().map(Into::into).collect();
        let supported = &self.supported_cipher_suites;
        self.enabled_cipher_suites.retain(|s| supported.contains(s));
        self
    }

    /// Set the supported TLS versions
    ///
    /// Enabled versions that are no longer supported are dropped.
    pub fn with_supported_protocol_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_protocol_versions = versions.into_iter().map(Into::into).collect();
        let supported = &self.supported_protocol_versions;
        self.enabled_protocol_versions.retain(|v| supported.contains(v));
        self
    }

    /// Set the enabled cipher suites, adding any to the supported list
    pub fn with_enabled_cipher_suites<I, S>(mut self, suites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_cipher_suites = suites.into_iter().map(Into::into).collect();
        for suite in &self.enabled_cipher_suites {
            if !self.supported_cipher_suites.contains(suite) {
                self.supported_cipher_suites.push(suite.clone());
            }
        }
        self
    }

    /// Set the enabled TLS versions, adding any to the supported list
    pub fn with_enabled_protocol_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_protocol_versions = versions.into_iter().map(Into::into).collect();
        for version in &self.enabled_protocol_versions {
            if !self.supported_protocol_versions.contains(version) {
                self.supported_protocol_versions.push(version.clone());
            }
        }
        self
    }

    /// TLS versions the profile could enable
    pub fn supported_protocol_version_names(&self) -> &[String] {
        &self.supported_protocol_versions
    }
}

impl SocketCapabilities for SocketProfile {
    fn enabled_cipher_suites(&self) -> Vec<String> {
        self.enabled_cipher_suites.clone()
    }

    fn enabled_protocol_versions(&self) -> Vec<String> {
        self.enabled_protocol_versions.clone()
    }

    fn supported_cipher_suites(&self) -> Vec<String> {
        self.supported_cipher_suites.clone()
    }
}

impl SocketConfigurable for SocketProfile {
    type Error = TlsError;

    fn set_enabled_cipher_suites(&mut self, suites: &[String]) -> Result<(), TlsError> {
        if let Some(unknown) = suites
            .iter()
            .find(|s| !self.supported_cipher_suites.contains(s))
        {
            return Err(TlsError::UnknownCipherSuite(unknown.clone()));
        }
        self.enabled_cipher_suites = suites.to_vec();
        Ok(())
    }

    fn set_enabled_protocol_versions(&mut self, versions: &[String]) -> Result<(), TlsError> {
        if let Some(unknown) = versions
            .iter()
            .find(|v| !self.supported_protocol_versions.contains(v))
        {
            return Err(TlsError::InvalidVersion(unknown.clone()));
        }
        self.enabled_protocol_versions = versions.to_vec();
        Ok(())
    }
}
