//! Nikto executable resolution.
//!
//! The orchestrator does not care where Nikto comes from; it only needs
//! something it can exec. Resolution prefers a system-wide `nikto` on
//! `PATH`, then a local checkout at `./nikto/program/nikto.pl` run through
//! `perl`. Downloading and unpacking Nikto itself is an operator task.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use fullscan_common::error::ScanError;

const LOCAL_INSTALL_DIR: &str = "nikto";

/// A resolved way to invoke Nikto.
///
/// `prefix_args` come before the per-scan arguments, so a local install
/// resolves to `perl` + `["nikto.pl"]` with `workdir` pointing at the
/// program directory, while a system install is just `nikto` + `[]`.
#[derive(Clone, Debug)]
pub struct ToolCommand {
    pub program: String,
    pub prefix_args: Vec<String>,
    pub workdir: Option<PathBuf>,
}

/// Locates a usable Nikto executable, or fails the whole run.
pub fn resolve() -> Result<ToolCommand, ScanError> {
    info!("checking for a Nikto installation");

    if let Some(version) = probe("nikto", &["-Version"], None) {
        info!(version = version.trim(), "using system-wide Nikto");
        return Ok(ToolCommand {
            program: "nikto".to_string(),
            prefix_args: Vec::new(),
            workdir: None,
        });
    }

    let program_dir = PathBuf::from(LOCAL_INSTALL_DIR).join("program");
    let script = program_dir.join("nikto.pl");
    if script.exists() {
        if let Some(version) = probe("perl", &["nikto.pl", "-Version"], Some(&program_dir)) {
            info!(version = version.trim(), "using local Nikto install");
            return Ok(ToolCommand {
                program: "perl".to_string(),
                prefix_args: vec!["nikto.pl".to_string()],
                workdir: Some(program_dir),
            });
        }
        debug!(script = %script.display(), "local nikto.pl present but not functional");
    }

    Err(ScanError::NoExecutableFound)
}

/// Runs `program args...` and returns its stdout when it exits cleanly.
fn probe(program: &str, args: &[&str], workdir: Option<&PathBuf>) -> Option<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = workdir {
        cmd.current_dir(dir);
    }

    match cmd.output() {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
        Ok(out) => {
            debug!(program, code = ?out.status.code(), "version probe exited nonzero");
            None
        }
        Err(e) => {
            debug!(program, error = %e, "version probe could not run");
            None
        }
    }
}
