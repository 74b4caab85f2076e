#![cfg(test)]
use std::time::Duration;

use fullscan_common::record::ExitKind;
use fullscan_core::supervise::{Invocation, supervise};

fn sh(script: &str, timeout: Duration) -> Invocation {
    Invocation {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        workdir: None,
        timeout,
    }
}

#[tokio::test]
async fn clean_exit_is_success_with_captured_streams() {
    let inv = sh("echo visible; echo hidden 1>&2", Duration::from_secs(10));
    let record = supervise(&inv).await.expect("sh should spawn");

    assert_eq!(record.kind, ExitKind::Success);
    assert!(record.stdout.contains("visible"));
    assert!(record.stderr.contains("hidden"));
}

#[tokio::test]
async fn nonzero_exit_is_a_tool_error_with_the_code() {
    let inv = sh("exit 3", Duration::from_secs(10));
    let record = supervise(&inv).await.expect("sh should spawn");

    assert_eq!(record.kind, ExitKind::ToolError { code: Some(3) });
}

#[tokio::test]
async fn overrunning_process_is_timed_out() {
    let inv = sh("sleep 30", Duration::from_millis(300));
    let record = supervise(&inv).await.expect("sh should spawn");

    assert_eq!(record.kind, ExitKind::TimedOut);
    // SIGTERM is enough for sleep; the full 30s were never waited out.
    assert!(record.elapsed < Duration::from_secs(10));
}

#[tokio::test]
async fn missing_program_errors_instead_of_hanging() {
    let inv = Invocation {
        program: "definitely-not-a-real-binary-x9".to_string(),
        args: Vec::new(),
        workdir: None,
        timeout: Duration::from_secs(1),
    };

    assert!(supervise(&inv).await.is_err());
}

#[tokio::test]
async fn workdir_is_applied_to_the_child() {
    let dir = tempfile::tempdir().unwrap();
    let inv = Invocation {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "pwd".to_string()],
        workdir: Some(dir.path().to_path_buf()),
        timeout: Duration::from_secs(5),
    };

    let record = supervise(&inv).await.expect("sh should spawn");
    let reported = record.stdout.trim_end();
    let expected = dir.path().file_name().unwrap().to_str().unwrap();
    assert!(
        reported.ends_with(expected),
        "child pwd '{reported}' does not end with '{expected}'"
    );
}
