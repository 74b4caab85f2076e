//! Output-to-findings parsing.
//!
//! Nikto writes one discovered condition per line, prefixed with `+`.
//! This module turns a completion record plus that output file into an
//! ordered findings list, degrading gracefully: a failed scan, a missing
//! file, or an unreadable file each collapse to a single descriptive
//! entry. [`parse_findings`] is total: it never errors and never
//! returns an empty list, so every target can be reported on.

use std::fs;
use std::path::Path;

use tracing::{error, warn};

use fullscan_common::record::{CompletionRecord, Finding};

/// Marker Nikto puts in front of a reported condition.
pub const FINDING_MARKER: char = '+';

/// Distills the findings for one completed (or failed) invocation.
pub fn parse_findings(record: &CompletionRecord, output_file: &Path) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Vec::new();

    if !record.succeeded() {
        let detail = [record.stderr.trim(), record.stdout.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("unknown error");
        findings.push(format!("Scan failed: {detail}"));

        // Downstream collaborators expect a file at this path; leave the
        // captured streams there when Nikto wrote nothing itself.
        if !output_file.exists() {
            let body = if detail == "unknown error" {
                "Scan failed without output."
            } else {
                detail
            };
            if let Err(e) = fs::write(output_file, body) {
                error!(path = %output_file.display(), error = %e, "failed writing raw output file");
            }
        }
    }

    match fs::read_to_string(output_file) {
        Ok(text) if !text.is_empty() => {
            let parsed: Vec<Finding> = text
                .lines()
                .map(str::trim)
                .filter(|line| line.starts_with(FINDING_MARKER))
                .map(str::to_owned)
                .collect();

            if !parsed.is_empty() {
                findings = parsed;
            } else if findings.is_empty() {
                // A clean run that reported nothing is a result in its
                // own right, distinct from "could not scan".
                findings.push("No issues found.".to_string());
            }
        }
        Ok(_) => {
            if findings.is_empty() {
                findings.push("Nikto did not produce any output.".to_string());
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if findings.is_empty() {
                findings.push("Nikto did not produce any output.".to_string());
            }
        }
        Err(e) => {
            warn!(path = %output_file.display(), error = %e, "failed to parse output file");
            if findings.is_empty() {
                findings.push("Nikto did not produce any parseable output.".to_string());
            }
        }
    }

    findings
}
