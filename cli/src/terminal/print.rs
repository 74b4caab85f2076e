use colored::*;
use tracing::info;

use fullscan_common::record::{ExitKind, ScanResult};

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted = format!("⟦ {} ⟧", msg.to_uppercase());
    let fill = TOTAL_WIDTH.saturating_sub(console::measure_text_width(&formatted));
    let left = fill / 2;
    let right = fill - left;

    let line = format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.bright_green(),
        "─".repeat(right).bright_black()
    );
    info!("{line}");
}

pub fn result_line(idx: usize, result: &ScanResult) {
    let status: ColoredString = match &result.record {
        Some(rec) if rec.succeeded() => "ok".green().bold(),
        Some(rec) if rec.kind == ExitKind::TimedOut => "timed out".yellow().bold(),
        Some(_) => "tool error".red().bold(),
        None => "rejected".red().bold(),
    };

    info!(
        "[{}] {} {} ({} findings)",
        idx,
        result.target.bold(),
        status,
        result.findings.len()
    );

    for path in &result.report_paths {
        info!("     └─ {}", path.display().to_string().bright_black());
    }
}

pub fn footer(total: usize) {
    info!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
    info!("{}", format!("Batch complete: {total} targets processed").bold());
}
