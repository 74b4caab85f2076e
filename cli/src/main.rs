mod commands;
mod progress;
mod terminal;

use std::sync::Arc;
use std::time::Duration;

use commands::CommandLine;
use fullscan_common::config::ScanConfig;
use fullscan_core::orchestrator;
use progress::BarObserver;
use terminal::print;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    terminal::logging::init()?;

    let config = ScanConfig {
        timeout: Duration::from_secs(cli.timeout),
        max_workers: cli.workers,
        no_preflight: cli.no_preflight,
        ..ScanConfig::default()
    };

    print::header("nikto batch scan");

    let observer = Arc::new(BarObserver::new());
    let summary = orchestrator::run(&cli.targets, &config, observer).await?;

    print::header("scan summary");
    for (idx, result) in summary.iter().enumerate() {
        print::result_line(idx, result);
    }
    print::footer(summary.len());

    Ok(())
}
