use std::path::PathBuf;
use std::time::Duration;

/// Runtime knobs for one batch invocation.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Wall-clock budget for a single Nikto run. The watchdog terminates
    /// the process once this is exceeded.
    pub timeout: Duration,

    /// Upper bound on concurrent scans. `None` means "number of CPU cores".
    /// The effective pool size never exceeds the number of targets.
    pub max_workers: Option<usize>,

    /// Skips the DNS and reachability pre-checks.
    ///
    /// Does not skip URL normalization; malformed targets are still
    /// rejected before a scan is launched.
    pub no_preflight: bool,

    /// Directory receiving Nikto's raw text output, one file per target.
    pub txt_dir: PathBuf,

    /// Directory receiving the XLSX reports.
    pub xlsx_dir: PathBuf,

    /// Directory receiving the PDF reports.
    pub pdf_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1800),
            max_workers: None,
            no_preflight: false,
            txt_dir: PathBuf::from("detailed_reports_txt"),
            xlsx_dir: PathBuf::from("detailed_reports_xlsx"),
            pdf_dir: PathBuf::from("detailed_reports_pdf"),
        }
    }
}
