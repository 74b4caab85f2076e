//! # Scan Outcome Model
//!
//! Everything a worker hands back to the orchestrator: how the tool
//! process ended, what it printed, and the findings distilled from its
//! output file. All of these are created once and never mutated.

use std::path::PathBuf;
use std::time::Duration;

/// One normalized line of Nikto output representing a reported condition.
pub type Finding = String;

/// How the supervised process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitKind {
    /// Exit code 0.
    Success,
    /// Ran to completion with a nonzero exit code. `None` when the
    /// process died to a signal outside the watchdog path, or when it
    /// could not be spawned at all.
    ToolError { code: Option<i32> },
    /// Killed by the watchdog after exceeding its time budget.
    TimedOut,
}

/// Terminal outcome of one tool invocation.
#[derive(Clone, Debug)]
pub struct CompletionRecord {
    pub kind: ExitKind,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl CompletionRecord {
    pub fn succeeded(&self) -> bool {
        self.kind == ExitKind::Success
    }
}

/// Everything produced for a single target.
///
/// `record` is `None` when validation rejected the target before any
/// process was launched; the findings then describe the rejection.
#[derive(Clone, Debug)]
pub struct ScanResult {
    /// Normalized target URL, or the raw string when normalization
    /// itself was the failure.
    pub target: String,
    /// Report files written for this target, raw text output included.
    pub report_paths: Vec<PathBuf>,
    /// Ordered findings; never empty.
    pub findings: Vec<Finding>,
    pub record: Option<CompletionRecord>,
}

impl ScanResult {
    /// True when the tool ran and exited cleanly.
    pub fn scanned_ok(&self) -> bool {
        self.record.as_ref().is_some_and(CompletionRecord::succeeded)
    }
}

/// Aggregate outcome of one batch call, in completion order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<ScanResult>,
}

impl RunSummary {
    pub fn push(&mut self, result: ScanResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanned_ok_requires_a_clean_record() {
        let mut result = ScanResult {
            target: "http://example.com".to_string(),
            report_paths: Vec::new(),
            findings: vec!["No issues found.".to_string()],
            record: None,
        };
        assert!(!result.scanned_ok());

        result.record = Some(CompletionRecord {
            kind: ExitKind::TimedOut,
            stdout: String::new(),
            stderr: String::new(),
            elapsed: Duration::from_secs(1),
        });
        assert!(!result.scanned_ok());

        result.record = Some(CompletionRecord {
            kind: ExitKind::Success,
            stdout: String::new(),
            stderr: String::new(),
            elapsed: Duration::from_secs(1),
        });
        assert!(result.scanned_ok());
    }
}
