//! OpenSSL context materialisation
//!
//! OpenSSL does not take lists of versions and suites the way a socket
//! profile holds them. Versions become a min/max range plus `NO_TLSv1_x`
//! options for any gaps, and cipher suites are split between the TLS 1.3
//! `ciphersuites` string and the legacy `cipher_list` string.

use super::cipher::{CipherSuite, FALLBACK_SCSV};
use super::socket::{SocketCapabilities, SocketProfile};
use super::version::TlsVersion;
use super::TlsError;
use openssl::ssl::{SslContextBuilder, SslMode, SslOptions};

/// Parameters ready to hand to OpenSSL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextParams {
    /// Lowest enabled version
    pub min_version: TlsVersion,
    /// Highest enabled version
    pub max_version: TlsVersion,
    /// Versions inside the range that must be switched off
    pub disabled_versions: Vec<TlsVersion>,
    /// TLS 1.3 suites, `:`-separated
    pub ciphersuites: Option<String>,
    /// Pre-1.3 suites in OpenSSL syntax, `:`-separated
    pub cipher_list: Option<String>,
    /// Whether `TLS_FALLBACK_SCSV` is sent
    pub send_fallback_scsv: bool,
}

impl ContextParams {
    /// Translate a socket profile's enabled lists
    pub fn from_profile(profile: &SocketProfile) -> Result<Self, TlsError> {
        let enabled_suites = profile.enabled_cipher_suites();

        let mut modern = Vec::new();
        let mut legacy = Vec::new();
        let mut send_fallback_scsv = false;
        for name in &enabled_suites {
            match CipherSuite::for_name(name) {
                Some(suite) if suite.is_tls13() => modern.push(suite.name()),
                Some(suite) => match suite.openssl_name() {
                    Some(openssl) => legacy.push(openssl),
                    None if CipherSuite::same_suite(name, FALLBACK_SCSV) => {
                        send_fallback_scsv = true
                    }
                    None => log::trace!("{} is implied by OpenSSL, skipping", name),
                },
                None => log::warn!("cipher suite {} has no OpenSSL equivalent, skipping", name),
            }
        }

        let mut versions: Vec<TlsVersion> = profile
            .enabled_protocol_versions()
            .iter()
            .filter_map(|name| TlsVersion::for_name(name).ok())
            .collect();
        // Pre-1.3 versions need a pre-1.3 suite, TLS 1.3 needs a 1.3 suite
        versions.retain(|v| match v {
            TlsVersion::Tls13 => !modern.is_empty(),
            _ => !legacy.is_empty(),
        });

        let (min_version, max_version) = match (
            versions.iter().min_by_key(|v| v.code()),
            versions.iter().max_by_key(|v| v.code()),
        ) {
            (Some(min), Some(max)) => (*min, *max),
            _ => {
                return Err(TlsError::Configuration(format!(
                    "no usable TLS version among {:?} with {} enabled cipher suites",
                    profile.enabled_protocol_versions(),
                    enabled_suites.len()
                )))
            }
        };

        let disabled_versions = TlsVersion::ALL
            .iter()
            .filter(|v| v.code() > min_version.code() && v.code() < max_version.code())
            .filter(|v| !versions.contains(v))
            .copied()
            .collect();

        Ok(ContextParams {
            min_version,
            max_version,
            disabled_versions,
            ciphersuites: (!modern.is_empty()).then(|| modern.join(":")),
            cipher_list: (!legacy.is_empty()).then(|| legacy.join(":")),
            send_fallback_scsv,
        })
    }
}

fn no_version_option(version: TlsVersion) -> SslOptions {
    match version {
        TlsVersion::Tls13 => SslOptions::NO_TLSV1_3,
        TlsVersion::Tls12 => SslOptions::NO_TLSV1_2,
        TlsVersion::Tls11 => SslOptions::NO_TLSV1_1,
        TlsVersion::Tls10 => SslOptions::NO_TLSV1,
        TlsVersion::Ssl3 => SslOptions::NO_SSLV3,
    }
}

/// Apply a socket profile's enabled lists to an OpenSSL context
pub fn configure_context(
    builder: &mut SslContextBuilder,
    profile: &SocketProfile,
) -> Result<ContextParams, TlsError> {
    let params = ContextParams::from_profile(profile)?;

    builder.set_min_proto_version(Some(params.min_version.to_openssl_version()))?;
    builder.set_max_proto_version(Some(params.max_version.to_openssl_version()))?;
    for version in &params.disabled_versions {
        builder.set_options(no_version_option(*version));
    }

    if let Some(ciphersuites) = &params.ciphersuites {
        builder.set_ciphersuites(ciphersuites)?;
    }
    if let Some(cipher_list) = &params.cipher_list {
        builder.set_cipher_list(cipher_list)?;
    }
    if params.send_fallback_scsv {
        builder.set_mode(SslMode::SEND_FALLBACK_SCSV);
    }

    log::debug!(
        "OpenSSL context {}..{} (fallback_scsv={})",
        params.min_version,
        params.max_version,
        params.send_fallback_scsv
    );

    Ok(params)
}
