#![cfg(test)]
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fullscan_common::config::ScanConfig;
use fullscan_common::error::ScanError;
use fullscan_common::record::ExitKind;
use fullscan_core::locate::ToolCommand;
use fullscan_core::orchestrator::{self, Orchestrator};
use fullscan_core::progress::{NullObserver, ProgressObserver};
use fullscan_core::report::{PdfReport, ReportWriter, XlsxReport};

/// Stand-in for Nikto. After the `-c` script, the orchestrator's
/// argument list maps to `$0`..`$9` with the output path at `$9`.
fn fake_tool(script: &str) -> ToolCommand {
    ToolCommand {
        program: "sh".to_string(),
        prefix_args: vec!["-c".to_string(), script.to_string()],
        workdir: None,
    }
}

fn config_in(root: &Path) -> ScanConfig {
    ScanConfig {
        timeout: Duration::from_secs(5),
        max_workers: None,
        no_preflight: true,
        txt_dir: root.join("txt"),
        xlsx_dir: root.join("xlsx"),
        pdf_dir: root.join("pdf"),
    }
}

fn writers_for(config: &ScanConfig) -> Vec<Box<dyn ReportWriter>> {
    vec![
        Box::new(XlsxReport::new(&config.xlsx_dir)),
        Box::new(PdfReport::new(&config.pdf_dir)),
    ]
}

#[tokio::test]
async fn one_result_per_target_including_rejected_ones() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let tool = fake_tool(r#"printf '+ Fake issue one\nnoise line\n+ Fake issue two\n' > "$9""#);
    let orchestrator =
        Orchestrator::new(config.clone(), tool, writers_for(&config), Arc::new(NullObserver));

    let targets = vec![
        "127.0.0.1".to_string(),
        "localhost".to_string(),
        "not a valid target".to_string(),
    ];
    let summary = orchestrator.run(&targets).await;

    assert_eq!(summary.len(), targets.len());

    let scanned = summary
        .iter()
        .find(|r| r.target == "http://127.0.0.1")
        .expect("scanned target missing from summary");
    assert!(scanned.scanned_ok());
    assert_eq!(scanned.findings, vec!["+ Fake issue one", "+ Fake issue two"]);
    // Raw text output plus one file per report format.
    assert_eq!(scanned.report_paths.len(), 3);
    for path in &scanned.report_paths {
        assert!(path.exists(), "missing report file {}", path.display());
    }

    let rejected = summary
        .iter()
        .find(|r| r.record.is_none())
        .expect("rejected target missing from summary");
    assert!(rejected.findings[0].starts_with("Scan failed:"));
    // Rejected targets still get their report documents.
    assert_eq!(rejected.report_paths.len(), 2);
}

#[tokio::test]
async fn timeout_on_one_target_does_not_affect_the_other() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScanConfig {
        timeout: Duration::from_secs(1),
        ..config_in(dir.path())
    };
    let tool = fake_tool(
        r#"case "$1" in *slow*) sleep 30;; *) printf '+ quick finding\n' > "$9";; esac"#,
    );
    let orchestrator =
        Orchestrator::new(config.clone(), tool, writers_for(&config), Arc::new(NullObserver));

    let targets = vec!["slow.invalid".to_string(), "127.0.0.1".to_string()];
    let summary = orchestrator.run(&targets).await;

    assert_eq!(summary.len(), 2);

    let slow = summary
        .iter()
        .find(|r| r.target.contains("slow"))
        .expect("slow target missing");
    let record = slow.record.as_ref().expect("slow target has a record");
    assert_eq!(record.kind, ExitKind::TimedOut);
    assert_eq!(slow.findings.len(), 1);
    assert!(!slow.findings[0].is_empty());

    let quick = summary
        .iter()
        .find(|r| r.target.contains("127.0.0.1"))
        .expect("quick target missing");
    assert!(quick.scanned_ok());
    assert_eq!(quick.findings, vec!["+ quick finding"]);
}

struct Recorder(Mutex<Vec<f64>>);

impl ProgressObserver for Recorder {
    fn on_progress(&self, _target: &str, percent: f64) {
        self.0.lock().unwrap().push(percent);
    }
}

#[tokio::test]
async fn progress_is_monotone_and_ends_at_100_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScanConfig {
        timeout: Duration::from_secs(5),
        ..config_in(dir.path())
    };
    let tool = fake_tool(r#"sleep 1; printf '+ done\n' > "$9""#);
    let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
    let orchestrator =
        Orchestrator::new(config.clone(), tool, writers_for(&config), recorder.clone());

    let summary = orchestrator.run(&["127.0.0.1".to_string()]).await;
    assert_eq!(summary.len(), 1);

    let sequence = recorder.0.lock().unwrap().clone();
    assert!(!sequence.is_empty());
    assert!(
        sequence.windows(2).all(|pair| pair[0] <= pair[1]),
        "progress regressed: {sequence:?}"
    );
    assert_eq!(sequence.iter().filter(|&&p| p >= 100.0).count(), 1);
    assert_eq!(*sequence.last().unwrap(), 100.0);
    assert!(sequence[..sequence.len() - 1].iter().all(|&p| p < 100.0));
}

#[tokio::test]
async fn missing_executable_fails_the_whole_run() {
    // Runtime skip when a real Nikto happens to be installed here.
    let nikto_present = std::process::Command::new("nikto")
        .arg("-Version")
        .output()
        .is_ok_and(|out| out.status.success());
    if nikto_present {
        eprintln!("Skipping: Nikto is installed on this machine.");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let result =
        orchestrator::run(&["127.0.0.1".to_string()], &config, Arc::new(NullObserver)).await;

    assert!(matches!(result, Err(ScanError::NoExecutableFound)));
}
