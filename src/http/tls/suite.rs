//! Connection suites
//!
//! A [`ConnectionSuite`] is the policy for one connection attempt: whether it
//! is encrypted and, if so, which TLS versions and cipher suites may be used.
//! The versions and suites in a connection suite are only used when the
//! socket also has them enabled; the negotiator takes the intersection.
//!
//! Use [`ConnectionSuiteBuilder::with_all_enabled_cipher_suites`] and
//! [`ConnectionSuiteBuilder::with_all_enabled_protocol_versions`] to defer the
//! choice to the socket.

use super::cipher::CipherSuite;
use super::version::TlsVersion;
use super::TlsError;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifiers as reported to and by a socket
pub(crate) type Names = Cow<'static, [Cow<'static, str>]>;

const RESTRICTED_CIPHER_SUITES: &[Cow<'static, str>] = &[
    // TLSv1.3
    Cow::Borrowed(CipherSuite::TLS_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_CHACHA20_POLY1305_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_AES_128_CCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_AES_128_CCM_8_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256.name()),
];

const APPROVED_CIPHER_SUITES: &[Cow<'static, str>] = &[
    // TLSv1.3
    Cow::Borrowed(CipherSuite::TLS_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_CHACHA20_POLY1305_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_AES_128_CCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_AES_128_CCM_8_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256.name()),
    // These are on HTTP/2's bad cipher suite list but still widely deployed
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA.name()),
    Cow::Borrowed(CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA.name()),
    Cow::Borrowed(CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256.name()),
    Cow::Borrowed(CipherSuite::TLS_RSA_WITH_AES_256_GCM_SHA384.name()),
    Cow::Borrowed(CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA.name()),
    Cow::Borrowed(CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA.name()),
    Cow::Borrowed(CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA.name()),
];

const RESTRICTED_TLS_VERSIONS: &[Cow<'static, str>] = &[
    Cow::Borrowed(TlsVersion::Tls13.name()),
    Cow::Borrowed(TlsVersion::Tls12.name()),
];

const MODERN_TLS_VERSIONS: &[Cow<'static, str>] = &[
    Cow::Borrowed(TlsVersion::Tls13.name()),
    Cow::Borrowed(TlsVersion::Tls12.name()),
    Cow::Borrowed(TlsVersion::Tls11.name()),
    Cow::Borrowed(TlsVersion::Tls10.name()),
];

const COMPATIBLE_TLS_VERSIONS: &[Cow<'static, str>] = &[Cow::Borrowed(TlsVersion::Tls10.name())];

/// Socket connection policy (immutable after building)
#[derive(Debug, Clone)]
pub struct ConnectionSuite {
    encrypted: bool,
    cipher_suites: Option<Names>,
    protocol_versions: Option<Names>,
    supports_extensions: bool,
}

impl ConnectionSuite {
    /// Unencrypted, unauthenticated connections for `http:` URLs
    pub const CLEARTEXT: ConnectionSuite = ConnectionSuite {
        encrypted: false,
        cipher_suites: None,
        protocol_versions: None,
        supports_extensions: false,
    };

    /// A secure TLS connection assuming a modern client platform and server
    pub const RESTRICTED_TLS: ConnectionSuite = ConnectionSuite {
        encrypted: true,
        cipher_suites: Some(Cow::Borrowed(RESTRICTED_CIPHER_SUITES)),
        protocol_versions: Some(Cow::Borrowed(RESTRICTED_TLS_VERSIONS)),
        supports_extensions: true,
    };

    /// A modern TLS connection with extensions like SNI and ALPN available
    pub const MODERN_TLS: ConnectionSuite = ConnectionSuite {
        encrypted: true,
        cipher_suites: Some(Cow::Borrowed(APPROVED_CIPHER_SUITES)),
        protocol_versions: Some(Cow::Borrowed(MODERN_TLS_VERSIONS)),
        supports_extensions: true,
    };

    /// A backwards-compatible fallback for interop with obsolete servers
    pub const COMPATIBLE_TLS: ConnectionSuite = ConnectionSuite {
        encrypted: true,
        cipher_suites: Some(Cow::Borrowed(APPROVED_CIPHER_SUITES)),
        protocol_versions: Some(Cow::Borrowed(COMPATIBLE_TLS_VERSIONS)),
        supports_extensions: true,
    };

    /// Start building a suite
    pub fn builder(encrypted: bool) -> ConnectionSuiteBuilder {
        ConnectionSuiteBuilder::new(encrypted)
    }

    /// Start building a modified copy of this suite
    pub fn to_builder(&self) -> ConnectionSuiteBuilder {
        ConnectionSuiteBuilder::from(self)
    }

    /// Suite produced by negotiation; lists are taken as-is, even when empty
    pub(crate) fn negotiated(
        &self,
        cipher_suites: Vec<String>,
        protocol_versions: Vec<String>,
    ) -> ConnectionSuite {
        ConnectionSuite {
            encrypted: self.encrypted,
            cipher_suites: Some(into_names(cipher_suites)),
            protocol_versions: Some(into_names(protocol_versions)),
            supports_extensions: self.supports_extensions,
        }
    }

    /// Whether the connection is encrypted at all
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Whether SNI and ALPN are expected to be available
    pub fn supports_extensions(&self) -> bool {
        self.supports_extensions
    }

    /// Catalogued cipher suites to use, or `None` for all the socket enables
    ///
    /// Names outside the catalog are skipped; see
    /// [`ConnectionSuite::cipher_suite_names`] for the raw list.
    pub fn cipher_suites(&self) -> Option<Vec<CipherSuite>> {
        self.cipher_suites
            .as_ref()
            .map(|names| names.iter().filter_map(|n| CipherSuite::for_name(n)).collect())
    }

    /// TLS versions to use, or `None` for all the socket enables
    pub fn protocol_versions(&self) -> Option<Vec<TlsVersion>> {
        self.protocol_versions
            .as_ref()
            .map(|names| names.iter().filter_map(|n| TlsVersion::for_name(n).ok()).collect())
    }

    /// Cipher suite names exactly as they will be handed to a socket
    pub fn cipher_suite_names(&self) -> Option<&[Cow<'static, str>]> {
        self.cipher_suites.as_deref()
    }

    /// TLS version names exactly as they will be handed to a socket
    pub fn protocol_version_names(&self) -> Option<&[Cow<'static, str>]> {
        self.protocol_versions.as_deref()
    }
}

fn into_names<S: Into<Cow<'static, str>>>(names: impl IntoIterator<Item = S>) -> Names {
    Cow::Owned(names.into_iter().map(Into::into).collect())
}

impl PartialEq for ConnectionSuite {
    fn eq(&self, other: &Self) -> bool {
        if self.encrypted != other.encrypted {
            return false;
        }
        if !self.encrypted {
            return true;
        }
        self.cipher_suites == other.cipher_suites
            && self.protocol_versions == other.protocol_versions
            && self.supports_extensions == other.supports_extensions
    }
}

impl Eq for ConnectionSuite {}

impl Hash for ConnectionSuite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encrypted.hash(state);
        if self.encrypted {
            self.cipher_suites.as_deref().hash(state);
            self.protocol_versions.as_deref().hash(state);
            self.supports_extensions.hash(state);
        }
    }
}

impl fmt::Display for ConnectionSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.encrypted {
            return f.write_str("ConnectionSuite()");
        }

        fn list(f: &mut fmt::Formatter<'_>, names: Option<&[Cow<'static, str>]>) -> fmt::Result {
            match names {
                Some(names) => write!(f, "[{}]", names.join(", ")),
                None => f.write_str("[all enabled]"),
            }
        }

        f.write_str("ConnectionSuite(cipherSuites=")?;
        list(f, self.cipher_suite_names())?;
        f.write_str(", tlsVersions=")?;
        list(f, self.protocol_version_names())?;
        write!(f, ", supportsTlsExtensions={})", self.supports_extensions)
    }
}

/// Connection suite builder
///
/// Every setter fails on a builder for an unencrypted suite.
#[derive(Debug, Clone)]
pub struct ConnectionSuiteBuilder {
    encrypted: bool,
    cipher_suites: Option<Names>,
    protocol_versions: Option<Names>,
    supports_extensions: bool,
}

impl ConnectionSuiteBuilder {
    /// Create a builder for an encrypted or unencrypted suite
    pub fn new(encrypted: bool) -> Self {
        ConnectionSuiteBuilder {
            encrypted,
            cipher_suites: None,
            protocol_versions: None,
            supports_extensions: false,
        }
    }

    fn require_encrypted(&self, what: &str) -> Result<(), TlsError> {
        if self.encrypted {
            Ok(())
        } else {
            Err(TlsError::Configuration(format!(
                "{} are not applicable to unencrypted connections",
                what
            )))
        }
    }

    /// Use every cipher suite the socket has enabled
    pub fn with_all_enabled_cipher_suites(mut self) -> Result<Self, TlsError> {
        self.require_encrypted("cipher suites")?;
        self.cipher_suites = None;
        Ok(self)
    }

    /// Restrict to `suites`, in preference order
    pub fn with_cipher_suites(self, suites: &[CipherSuite]) -> Result<Self, TlsError> {
        self.with_cipher_suite_names(suites.iter().map(|s| s.name()))
    }

    /// Restrict to the named cipher suites, in preference order
    pub fn with_cipher_suite_names<I, S>(mut self, names: I) -> Result<Self, TlsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.require_encrypted("cipher suites")?;
        let names = into_names(names);
        if names.is_empty() {
            return Err(TlsError::Configuration(
                "At least one cipher suite is required".to_string(),
            ));
        }
        self.cipher_suites = Some(names);
        Ok(self)
    }

    /// Use every TLS version the socket has enabled
    pub fn with_all_enabled_protocol_versions(mut self) -> Result<Self, TlsError> {
        self.require_encrypted("TLS versions")?;
        self.protocol_versions = None;
        Ok(self)
    }

    /// Restrict to `versions`, in preference order
    pub fn with_protocol_versions(self, versions: &[TlsVersion]) -> Result<Self, TlsError> {
        self.with_protocol_version_names(versions.iter().map(|v| v.name()))
    }

    /// Restrict to the named TLS versions, in preference order
    pub fn with_protocol_version_names<I, S>(mut self, names: I) -> Result<Self, TlsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.require_encrypted("TLS versions")?;
        let names = into_names(names);
        if names.is_empty() {
            return Err(TlsError::Configuration(
                "At least one TLS version is required".to_string(),
            ));
        }
        self.protocol_versions = Some(names);
        Ok(self)
    }

    /// Declare whether SNI and ALPN are expected to be available
    pub fn with_extensions(mut self, supports_extensions: bool) -> Result<Self, TlsError> {
        self.require_encrypted("TLS extensions")?;
        self.supports_extensions = supports_extensions;
        Ok(self)
    }

    /// Build the connection suite
    pub fn build(self) -> ConnectionSuite {
        ConnectionSuite {
            encrypted: self.encrypted,
            cipher_suites: self.cipher_suites,
            protocol_versions: self.protocol_versions,
            supports_extensions: self.supports_extensions,
        }
    }
}

impl From<&ConnectionSuite> for ConnectionSuiteBuilder {
    fn from(suite: &ConnectionSuite) -> Self {
        ConnectionSuiteBuilder {
            encrypted: suite.encrypted,
            cipher_suites: suite.cipher_suites.clone(),
            protocol_versions: suite.protocol_versions.clone(),
            supports_extensions: suite.supports_extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(suite: &ConnectionSuite) -> u64 {
        let mut hasher = DefaultHasher::new();
        suite.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_presets() {
        assert!(!ConnectionSuite::CLEARTEXT.is_encrypted());

        let restricted = ConnectionSuite::RESTRICTED_TLS;
        assert!(restricted.is_encrypted());
        assert!(restricted.supports_extensions());
        assert_eq!(
            restricted.protocol_versions(),
            Some(vec![TlsVersion::Tls13, TlsVersion::Tls12])
        );
        assert_eq!(restricted.cipher_suites().map(|s| s.len()), Some(11));

        let modern = ConnectionSuite::MODERN_TLS;
        assert_eq!(modern.protocol_versions().map(|v| v.len()), Some(4));
        assert_eq!(modern.cipher_suites().map(|s| s.len()), Some(18));

        let compatible = ConnectionSuite::COMPATIBLE_TLS;
        assert_eq!(compatible.protocol_versions(), Some(vec![TlsVersion::Tls10]));
        assert_eq!(compatible.cipher_suite_names(), modern.cipher_suite_names());
    }

    #[test]
    fn test_unencrypted_builder_rejects_setters() {
        let builder = ConnectionSuite::builder(false);

        assert!(matches!(
            builder.clone().with_cipher_suites(&[CipherSuite::TLS_AES_128_GCM_SHA256]),
            Err(TlsError::Configuration(_))
        ));
        assert!(matches!(
            builder.clone().with_all_enabled_cipher_suites(),
            Err(TlsError::Configuration(_))
        ));
        assert!(matches!(
            builder.clone().with_protocol_versions(&[TlsVersion::Tls12]),
            Err(TlsError::Configuration(_))
        ));
        assert!(matches!(
            builder.clone().with_all_enabled_protocol_versions(),
            Err(TlsError::Configuration(_))
        ));
        assert!(matches!(
            builder.clone().with_extensions(true),
            Err(TlsError::Configuration(_))
        ));

        assert_eq!(builder.build(), ConnectionSuite::CLEARTEXT);
    }

    #[test]
    fn test_empty_lists_are_rejected() {
        let result = ConnectionSuite::builder(true).with_cipher_suites(&[]);
        assert!(matches!(result, Err(TlsError::Configuration(_))));

        let result =
            ConnectionSuite::builder(true).with_protocol_version_names(Vec::<String>::new());
        assert!(matches!(result, Err(TlsError::Configuration(_))));
    }

    #[test]
    fn test_all_enabled_clears_lists() {
        let suite = ConnectionSuite::MODERN_TLS
            .to_builder()
            .with_all_enabled_cipher_suites()
            .unwrap()
            .with_all_enabled_protocol_versions()
            .unwrap()
            .build();

        assert_eq!(suite.cipher_suites(), None);
        assert_eq!(suite.protocol_versions(), None);
        assert!(suite.supports_extensions());
    }

    #[test]
    fn test_lists_are_copied_on_input() {
        let mut names = vec!["TLS_AES_128_GCM_SHA256".to_string()];
        let suite = ConnectionSuite::builder(true)
            .with_cipher_suite_names(names.clone())
            .unwrap()
            .build();

        names.push("TLS_AES_256_GCM_SHA384".to_string());
        assert_eq!(suite.cipher_suite_names().map(|n| n.len()), Some(1));
    }

    #[test]
    fn test_builder_from_existing_copies_suite() {
        let modified = ConnectionSuite::MODERN_TLS
            .to_builder()
            .with_protocol_versions(&[TlsVersion::Tls12])
            .unwrap()
            .build();

        assert_ne!(modified, ConnectionSuite::MODERN_TLS);
        assert_eq!(ConnectionSuite::MODERN_TLS.protocol_versions().map(|v| v.len()), Some(4));
        assert_eq!(modified.cipher_suite_names(), ConnectionSuite::MODERN_TLS.cipher_suite_names());
    }

    #[test]
    fn test_equality_and_hash() {
        let a = ConnectionSuite::builder(true)
            .with_cipher_suites(&[
                CipherSuite::TLS_AES_128_GCM_SHA256,
                CipherSuite::TLS_AES_256_GCM_SHA384,
            ])
            .unwrap()
            .with_protocol_versions(&[TlsVersion::Tls13])
            .unwrap()
            .with_extensions(true)
            .unwrap()
            .build();
        let b = a.to_builder().build();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let reordered = a
            .to_builder()
            .with_cipher_suites(&[
                CipherSuite::TLS_AES_256_GCM_SHA384,
                CipherSuite::TLS_AES_128_GCM_SHA256,
            ])
            .unwrap()
            .build();
        assert_ne!(a, reordered);

        let all_enabled = a.to_builder().with_all_enabled_cipher_suites().unwrap().build();
        assert_ne!(a, all_enabled);

        let without_extensions = a.to_builder().with_extensions(false).unwrap().build();
        assert_ne!(a, without_extensions);
    }

    #[test]
    fn test_borrowed_and_owned_presets_are_equal() {
        let rebuilt = ConnectionSuite::builder(true)
            .with_cipher_suite_names(
                ConnectionSuite::RESTRICTED_TLS
                    .cipher_suite_names()
                    .unwrap()
                    .iter()
                    .map(|n| n.to_string()),
            )
            .unwrap()
            .with_protocol_versions(&[TlsVersion::Tls13, TlsVersion::Tls12])
            .unwrap()
            .with_extensions(true)
            .unwrap()
            .build();

        assert_eq!(rebuilt, ConnectionSuite::RESTRICTED_TLS);
        assert_eq!(hash_of(&rebuilt), hash_of(&ConnectionSuite::RESTRICTED_TLS));
    }

    #[test]
    fn test_display() {
        assert_eq!(ConnectionSuite::CLEARTEXT.to_string(), "ConnectionSuite()");

        let suite = ConnectionSuite::builder(true)
            .with_cipher_suites(&[CipherSuite::TLS_AES_128_GCM_SHA256])
            .unwrap()
            .build();
        assert_eq!(
            suite.to_string(),
            "ConnectionSuite(cipherSuites=[TLS_AES_128_GCM_SHA256], \
             tlsVersions=[all enabled], supportsTlsExtensions=false)"
        );
    }
}
