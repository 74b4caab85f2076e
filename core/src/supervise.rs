//! Process supervision with timeout-based cancellation.
//!
//! Nikto offers no cooperative cancellation hook, so enforcement is
//! signal-based with an escalation path: SIGTERM, a short grace period,
//! then a hard kill. Whatever happens, [`supervise`] returns; a worker
//! is never blocked forever by a misbehaving subprocess.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use fullscan_common::record::{CompletionRecord, ExitKind};

/// Grace period between SIGTERM and the hard kill.
const TERM_GRACE: Duration = Duration::from_secs(5);

/// One pending execution of the external tool against a single target.
///
/// Owned exclusively by the worker that built it; never shared.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: Option<PathBuf>,
    pub timeout: Duration,
}

/// Runs the invocation to completion, enforcing its time budget.
///
/// Both output streams are captured rather than inherited; reader tasks
/// drain them while the watchdog waits on the process so a chatty child
/// cannot deadlock on a full pipe. `kill_on_drop` keeps an interrupted
/// orchestrator from leaking children.
pub async fn supervise(inv: &Invocation) -> anyhow::Result<CompletionRecord> {
    let mut cmd = Command::new(&inv.program);
    cmd.args(&inv.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &inv.workdir {
        cmd.current_dir(dir);
    }

    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn '{}'", inv.program))?;

    let stdout_task = drain(child.stdout.take());
    let stderr_task = drain(child.stderr.take());

    let kind = match timeout(inv.timeout, child.wait()).await {
        Ok(status) => {
            let status = status.context("waiting on scanner process")?;
            if status.success() {
                ExitKind::Success
            } else {
                ExitKind::ToolError {
                    code: status.code(),
                }
            }
        }
        Err(_) => {
            warn!(
                program = %inv.program,
                budget_secs = inv.timeout.as_secs(),
                "time budget exceeded, terminating"
            );
            escalate(&mut child).await;
            ExitKind::TimedOut
        }
    };

    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    Ok(CompletionRecord {
        kind,
        stdout,
        stderr,
        elapsed: start.elapsed(),
    })
}

fn drain<R>(stream: Option<R>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = String::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_string(&mut buf).await;
        }
        buf
    })
}

/// terminate → wait → kill.
async fn escalate(child: &mut Child) {
    send_term(child);
    if timeout(TERM_GRACE, child.wait()).await.is_ok() {
        return;
    }
    debug!("grace period expired, killing");
    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill scanner process");
    }
}

#[cfg(unix)]
fn send_term(child: &Child) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            warn!(%pid, error = %e, "failed to send SIGTERM");
        }
    }
}

#[cfg(not(unix))]
fn send_term(_child: &Child) {
    // No graceful signal here; escalate() hard-kills after the grace period.
}
