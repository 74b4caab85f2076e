//! Report generation.
//!
//! Each writer persists one document per target from the same three
//! inputs: a timestamp, the target URL, and the ordered findings list.
//! The orchestrator treats writers as interchangeable collaborators; a
//! failing format is logged and skipped, never fatal for the target.

use std::path::{Path, PathBuf};

pub mod pdf;
pub mod xlsx;

pub use pdf::PdfReport;
pub use xlsx::XlsxReport;

/// A persisted document format fed from one target's findings.
pub trait ReportWriter: Send + Sync {
    /// Short format name for log lines.
    fn format(&self) -> &'static str;

    /// Writes the document and returns its path.
    fn write(
        &self,
        timestamp: &str,
        target: &str,
        findings: &[String],
    ) -> anyhow::Result<PathBuf>;
}

/// Report file name shared by all formats. The target discriminator
/// keeps two scans that land in the same second from colliding.
pub fn report_basename(timestamp: &str, target: &str) -> String {
    let slug: String = target
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("nikto_report_{timestamp}_{slug}")
}

pub(crate) fn report_path(dir: &Path, timestamp: &str, target: &str, ext: &str) -> PathBuf {
    dir.join(format!("{}.{ext}", report_basename(timestamp, target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_discriminates_by_target() {
        let a = report_basename("20250807_120000", "http://a.example.com");
        let b = report_basename("20250807_120000", "http://b.example.com");
        assert_ne!(a, b);
        assert!(a.starts_with("nikto_report_20250807_120000_"));
    }

    #[test]
    fn basename_is_filesystem_safe() {
        let name = report_basename("20250807_120000", "https://example.com:8443/x");
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
