use clap::Parser;

#[derive(Parser)]
#[command(name = "fullscan")]
#[command(about = "Exhaustive batch Nikto scanning with XLSX and PDF reports.")]
pub struct CommandLine {
    /// Targets to scan: hostnames, IPs or full URLs.
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Per-target time budget in seconds.
    #[arg(long, default_value_t = 1800)]
    pub timeout: u64,

    /// Cap on concurrent scans (defaults to the CPU count).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Skip the DNS and reachability pre-checks.
    #[arg(long)]
    pub no_preflight: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
