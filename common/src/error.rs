use thiserror::Error;

/// Failures that can reject a target or abort a whole run.
///
/// Everything except [`ScanError::NoExecutableFound`] is target-local:
/// the orchestrator absorbs it into that target's result and keeps going.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The target string could not be shaped into a scannable URL.
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// DNS resolution of the target's host failed.
    #[error("could not resolve host '{host}': {reason}")]
    UnresolvableHost { host: String, reason: String },

    /// The reachability probe errored or returned a failure status.
    #[error("target '{target}' is unreachable: {reason}")]
    UnreachableTarget { target: String, reason: String },

    /// No usable Nikto executable on this machine. Fatal for the run.
    #[error("no usable Nikto executable found (tried system 'nikto' and ./nikto/program/nikto.pl)")]
    NoExecutableFound,
}
