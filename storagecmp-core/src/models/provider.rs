//! Provider-related types.
//!
//! This module contains the top of the content tree:
//! - [`ProviderCollection`] - Root entity of one content document
//! - [`Provider`] - A storage provider and its plans
//! - [`ProviderUrl`] - Validated absolute URL, kept verbatim
//! - [`Protocol`] - Storage access protocols

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use url::Url;

use super::plan::Plan;

// ============================================================================
// Protocol
// ============================================================================

/// Storage access protocol supported by a provider.
///
/// Tokens are matched case-sensitively against their canonical spelling
/// (`"S3"`, `"rsync"`, `"WebDAV"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Amazon S3 compatible API.
    S3,
    /// SSH file transfer.
    Sftp,
    /// OpenStack Swift.
    Swift,
    /// Plain FTP.
    Ftp,
    /// FTP over TLS.
    Ftps,
    /// Secure copy.
    Scp,
    /// SMB / CIFS.
    Samba,
    /// rsync over SSH or daemon mode.
    Rsync,
    /// BorgBackup remote repositories.
    Borg,
    /// WebDAV over HTTP(S).
    WebDav,
    /// Token outside the known set, only produced under an open protocol policy.
    Other(String),
}

impl Protocol {
    /// Returns all known protocols in canonical order.
    pub fn all() -> &'static [Protocol] {
        &[
            Self::S3,
            Self::Sftp,
            Self::Swift,
            Self::Ftp,
            Self::Ftps,
            Self::Scp,
            Self::Samba,
            Self::Rsync,
            Self::Borg,
            Self::WebDav,
        ]
    }

    /// Returns the canonical token for this protocol.
    pub fn as_str(&self) -> &str {
        match self {
            Self::S3 => "S3",
            Self::Sftp => "SFTP",
            Self::Swift => "Swift",
            Self::Ftp => "FTP",
            Self::Ftps => "FTPS",
            Self::Scp => "SCP",
            Self::Samba => "Samba",
            Self::Rsync => "rsync",
            Self::Borg => "Borg",
            Self::WebDav => "WebDAV",
            Self::Other(token) => token,
        }
    }

    /// Returns the known protocol for a canonical token.
    pub fn known(token: &str) -> Option<Self> {
        Self::all().iter().find(|p| p.as_str() == token).cloned()
    }

    /// Returns true if this protocol is part of the known set.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown protocol token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown protocol: {0}")]
pub struct UnknownProtocol(pub String);

impl FromStr for Protocol {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::known(s).ok_or_else(|| UnknownProtocol(s.to_string()))
    }
}

impl Serialize for Protocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Provider URL
// ============================================================================

/// Absolute provider URL.
///
/// The original text is preserved for serialization so that validated
/// content round-trips unchanged; the parsed form is available for callers
/// that need components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderUrl {
    raw: String,
    parsed: Url,
}

impl ProviderUrl {
    /// Parses an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// Returns the URL exactly as written in the content file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.parsed
    }

    /// Returns the host, if any.
    pub fn host(&self) -> Option<&str> {
        self.parsed.host_str()
    }
}

impl fmt::Display for ProviderUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for ProviderUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

// ============================================================================
// Provider
// ============================================================================

/// A storage provider and the plans it offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    /// Display name.
    pub name: String,
    /// Provider homepage.
    pub url: ProviderUrl,
    /// Priced offerings, may be empty.
    pub plans: Vec<Plan>,
    /// Supported access protocols.
    pub protocols: Vec<Protocol>,
}

impl Provider {
    /// Returns true if this provider supports the given protocol.
    pub fn supports(&self, protocol: &Protocol) -> bool {
        self.protocols.contains(protocol)
    }

    /// Looks up a plan by name.
    pub fn plan(&self, name: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.name == name)
    }
}

// ============================================================================
// Provider Collection
// ============================================================================

/// Root entity of one content document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderCollection {
    /// Providers in document order.
    pub providers: Vec<Provider>,
}

impl ProviderCollection {
    /// Returns the number of providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if there are no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns the total number of plans across all providers.
    pub fn plan_count(&self) -> usize {
        self.providers.iter().map(|p| p.plans.len()).sum()
    }

    /// Looks up a provider by name.
    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }
}

// ============================================================================
// Tests
// ============================================================================
