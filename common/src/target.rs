//! # Scan Target Model
//!
//! Defines and normalizes the input of a scan.
//!
//! A target arrives as whatever the user typed on the command line
//! (`example.com`, `https://example.com:8443`, an IP literal) and leaves
//! here as a URL with an explicit scheme and a known host, or not at all.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ScanError;

/// Scheme prepended when the raw string carries none.
pub const DEFAULT_SCHEME: &str = "http";

/// A normalized, immutable scan target.
///
/// Construction goes through [`FromStr`]; once built the URL string and
/// host never change for the lifetime of the scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    url: String,
    host: String,
}

impl Target {
    /// The normalized URL string, scheme included.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The host component, used for DNS resolution.
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl FromStr for Target {
    type Err = ScanError;

    /// Parses a raw target string into a `Target`.
    ///
    /// Strings without a scheme get `http://` prepended before parsing,
    /// so `example.com` normalizes to `http://example.com`. A result
    /// without a host (e.g. `http://`) is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ScanError::InvalidTarget {
                target: s.to_string(),
                reason: "empty target string".to_string(),
            });
        }

        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("{DEFAULT_SCHEME}://{raw}")
        };

        let parsed = Url::parse(&with_scheme).map_err(|e| ScanError::InvalidTarget {
            target: s.to_string(),
            reason: e.to_string(),
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ScanError::InvalidTarget {
                target: s.to_string(),
                reason: "no host component".to_string(),
            })?
            .to_string();

        Ok(Target {
            url: with_scheme,
            host,
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
