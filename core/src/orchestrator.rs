//! Scan orchestration.
//!
//! Fans a batch of targets out across a bounded pool of workers. Each
//! worker owns its whole pipeline (validation, supervision, parsing,
//! report writing) and always comes back with a [`ScanResult`], so one
//! misbehaving target can never abort the rest of the batch. The only
//! fatal condition is failing to locate the Nikto executable, which is
//! checked before anything is launched.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use fullscan_common::config::ScanConfig;
use fullscan_common::error::ScanError;
use fullscan_common::record::{CompletionRecord, ExitKind, RunSummary, ScanResult};
use fullscan_common::target::Target;

use crate::locate::{self, ToolCommand};
use crate::parse;
use crate::progress::{ProgressObserver, ProgressTicker};
use crate::report::{PdfReport, ReportWriter, XlsxReport, report_basename};
use crate::supervise::{Invocation, supervise};
use crate::validate;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type Writers = Arc<Vec<Box<dyn ReportWriter>>>;

/// Resolves Nikto, then scans the whole batch with the default report
/// formats. Fails fast with [`ScanError::NoExecutableFound`] before any
/// validation or subprocess when no usable executable exists.
pub async fn run(
    targets: &[String],
    config: &ScanConfig,
    observer: Arc<dyn ProgressObserver>,
) -> Result<RunSummary, ScanError> {
    let tool = locate::resolve()?;
    let writers: Vec<Box<dyn ReportWriter>> = vec![
        Box::new(XlsxReport::new(&config.xlsx_dir)),
        Box::new(PdfReport::new(&config.pdf_dir)),
    ];
    let orchestrator = Orchestrator::new(config.clone(), tool, writers, observer);
    Ok(orchestrator.run(targets).await)
}

/// Batch runner wired with a resolved tool and a fixed set of report
/// collaborators. Construction is cheap; one instance per batch.
pub struct Orchestrator {
    config: Arc<ScanConfig>,
    tool: ToolCommand,
    writers: Writers,
    observer: Arc<dyn ProgressObserver>,
}

impl Orchestrator {
    pub fn new(
        config: ScanConfig,
        tool: ToolCommand,
        writers: Vec<Box<dyn ReportWriter>>,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            tool,
            writers: Arc::new(writers),
            observer,
        }
    }

    /// Scans every target, one result per input string, collected in
    /// completion order.
    pub async fn run(&self, targets: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();
        if targets.is_empty() {
            return summary;
        }

        let workers = self.worker_count(targets.len());
        info!(targets = targets.len(), workers, "starting scans");

        if let Err(e) = ensure_directories(&self.config) {
            // Workers surface the consequences per target; the batch
            // itself still runs so every target gets a result.
            warn!(error = %e, "could not create report directories");
        }

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut pool: JoinSet<ScanResult> = JoinSet::new();

        for raw in targets {
            let raw = raw.clone();
            let config = self.config.clone();
            let tool = self.tool.clone();
            let writers = self.writers.clone();
            let observer = self.observer.clone();
            let semaphore = semaphore.clone();

            pool.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("scan semaphore closed");
                scan_one(raw, config, tool, writers, observer).await
            });
        }

        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(result) => {
                    info!(
                        url = %result.target,
                        findings = result.findings.len(),
                        ok = result.scanned_ok(),
                        "completed"
                    );
                    summary.push(result);
                }
                // Workers are total by construction; a panic here is a bug
                // but must not take the batch down with it.
                Err(e) => error!(error = %e, "scan worker aborted"),
            }
        }

        summary
    }

    fn worker_count(&self, targets: usize) -> usize {
        let cores = sys_info::cpu_num().map(|n| n as usize).unwrap_or(1);
        self.config
            .max_workers
            .unwrap_or(cores)
            .min(targets)
            .max(1)
    }
}

/// The whole per-target pipeline. Infallible: every failure mode ends up
/// as data inside the returned result.
async fn scan_one(
    raw: String,
    config: Arc<ScanConfig>,
    tool: ToolCommand,
    writers: Writers,
    observer: Arc<dyn ProgressObserver>,
) -> ScanResult {
    let validated = if config.no_preflight {
        validate::normalize_only(&raw)
    } else {
        validate::validate(&raw).await
    };

    let target = match validated {
        Ok(target) => target,
        Err(e) => {
            warn!(url = %raw, error = %e, "target rejected");
            return failed_before_scan(&raw, &e.to_string(), &writers).await;
        }
    };

    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let txt_rel = config
        .txt_dir
        .join(format!("{}.txt", report_basename(&timestamp, target.url())));
    // Absolute so a local install's working directory doesn't relocate it.
    let txt_path = std::path::absolute(&txt_rel).unwrap_or(txt_rel);

    let invocation = build_invocation(&tool, &target, &txt_path, &config);
    let record = run_supervised(&invocation, target.url(), observer.as_ref()).await;
    observer.on_progress(target.url(), 100.0);

    let findings = parse::parse_findings(&record, &txt_path);

    let mut report_paths = vec![txt_path];
    report_paths.extend(write_reports(&writers, &timestamp, target.url(), &findings).await);

    ScanResult {
        target: target.url().to_string(),
        report_paths,
        findings,
        record: Some(record),
    }
}

/// Result for a target that never reached Nikto. It still flows through
/// the report collaborators so no target vanishes from the run's output.
async fn failed_before_scan(target: &str, reason: &str, writers: &Writers) -> ScanResult {
    let findings = vec![format!("Scan failed: {reason}")];
    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let report_paths = write_reports(writers, &timestamp, target, &findings).await;

    ScanResult {
        target: target.to_string(),
        report_paths,
        findings,
        record: None,
    }
}

fn build_invocation(
    tool: &ToolCommand,
    target: &Target,
    txt_path: &Path,
    config: &ScanConfig,
) -> Invocation {
    let mut args = tool.prefix_args.clone();
    args.extend([
        "-h".to_string(),
        target.url().to_string(),
        "-Plugins".to_string(),
        "@@ALL".to_string(),
        "-C".to_string(),
        "all".to_string(),
        "-Display".to_string(),
        "P".to_string(),
        "-output".to_string(),
        txt_path.display().to_string(),
        "-Format".to_string(),
        "txt".to_string(),
    ]);

    Invocation {
        program: tool.program.clone(),
        args,
        workdir: tool.workdir.clone(),
        timeout: config.timeout,
    }
}

/// Supervises the process while feeding the observer estimated progress
/// at the display cadence. Spawn failures become a synthetic error
/// record so parsing still has something to describe.
async fn run_supervised(
    invocation: &Invocation,
    target: &str,
    observer: &dyn ProgressObserver,
) -> CompletionRecord {
    let mut ticker = ProgressTicker::new(invocation.timeout);
    let start = Instant::now();

    let supervised = supervise(invocation);
    tokio::pin!(supervised);

    let outcome = loop {
        tokio::select! {
            result = &mut supervised => break result,
            _ = ticker.tick() => observer.on_progress(target, ticker.percent()),
        }
    };

    match outcome {
        Ok(record) => record,
        Err(e) => {
            error!(url = target, error = %e, "tool invocation failed");
            CompletionRecord {
                kind: ExitKind::ToolError { code: None },
                stdout: String::new(),
                stderr: e.to_string(),
                elapsed: start.elapsed(),
            }
        }
    }
}

/// Runs every report collaborator; a failing format is logged and
/// skipped so the remaining formats (and targets) are unaffected.
async fn write_reports(
    writers: &Writers,
    timestamp: &str,
    target: &str,
    findings: &[String],
) -> Vec<PathBuf> {
    let writers = writers.clone();
    let timestamp = timestamp.to_string();
    let target = target.to_string();
    let findings = findings.to_vec();

    let written = tokio::task::spawn_blocking(move || {
        let mut paths = Vec::new();
        for writer in writers.iter() {
            match writer.write(&timestamp, &target, &findings) {
                Ok(path) => {
                    info!(format = writer.format(), path = %path.display(), "report written");
                    paths.push(path);
                }
                Err(e) => {
                    error!(format = writer.format(), error = %e, "report write failed, skipping format");
                }
            }
        }
        paths
    })
    .await;

    written.unwrap_or_default()
}

fn ensure_directories(config: &ScanConfig) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.txt_dir)?;
    std::fs::create_dir_all(&config.xlsx_dir)?;
    std::fs::create_dir_all(&config.pdf_dir)?;
    Ok(())
}
