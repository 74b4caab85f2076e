//! Target validation gate.
//!
//! A target enters the scan pool only after it parses as a URL, its host
//! resolves, and a lightweight HEAD probe comes back with a success
//! status. Each check maps to its own [`ScanError`] variant so a rejected
//! target's result says *why* it never reached Nikto.

use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use tracing::debug;

use fullscan_common::error::ScanError;
use fullscan_common::target::Target;

/// Budget for the reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("fullscan/", env!("CARGO_PKG_VERSION"));

/// Normalizes and fully validates a raw target string.
pub async fn validate(raw: &str) -> Result<Target, ScanError> {
    let target: Target = raw.parse()?;
    resolve_host(target.host()).await?;
    probe(&target).await?;
    Ok(target)
}

/// Normalization only; the network gates are skipped.
pub fn normalize_only(raw: &str) -> Result<Target, ScanError> {
    raw.parse()
}

async fn resolve_host(host: &str) -> Result<(), ScanError> {
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
    match resolver.lookup_ip(host).await {
        Ok(lookup) => {
            debug!(host, addrs = lookup.iter().count(), "host resolved");
            Ok(())
        }
        Err(e) => Err(ScanError::UnresolvableHost {
            host: host.to_string(),
            reason: e.to_string(),
        }),
    }
}

async fn probe(target: &Target) -> Result<(), ScanError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(|e| ScanError::UnreachableTarget {
            target: target.url().to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })?;

    let response = client.head(target.url()).send().await.map_err(|e| {
        ScanError::UnreachableTarget {
            target: target.url().to_string(),
            reason: e.to_string(),
        }
    })?;

    response
        .error_for_status()
        .map_err(|e| ScanError::UnreachableTarget {
            target: target.url().to_string(),
            reason: e.to_string(),
        })?;

    debug!(url = target.url(), "reachability probe passed");
    Ok(())
}
