//! XLSX report writer.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rust_xlsxwriter::{Format, Workbook};

use super::{ReportWriter, report_path};

pub struct XlsxReport {
    dir: PathBuf,
}

impl XlsxReport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportWriter for XlsxReport {
    fn format(&self) -> &'static str {
        "xlsx"
    }

    fn write(
        &self,
        timestamp: &str,
        target: &str,
        findings: &[String],
    ) -> anyhow::Result<PathBuf> {
        let path = report_path(&self.dir, timestamp, target, "xlsx");
        write_workbook(&path, timestamp, target, findings)
            .with_context(|| format!("writing XLSX report to {}", path.display()))?;
        Ok(path)
    }
}

fn write_workbook(
    path: &Path,
    timestamp: &str,
    target: &str,
    findings: &[String],
) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Nikto Scan Results")?;

    let bold = Format::new().set_bold();

    worksheet.write_with_format(0, 0, "Timestamp", &bold)?;
    worksheet.write(0, 1, timestamp)?;
    worksheet.write_with_format(1, 0, "Target URL", &bold)?;
    worksheet.write(1, 1, target)?;

    // Row 2 left blank to separate the header block from the table.
    worksheet.write_with_format(3, 0, "#", &bold)?;
    worksheet.write_with_format(3, 1, "Issue", &bold)?;

    let mut row = 4u32;
    for (idx, finding) in findings.iter().enumerate() {
        worksheet.write(row, 0, (idx + 1) as u32)?;
        worksheet.write(row, 1, finding)?;
        row += 1;
    }

    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 100)?;

    workbook.save(path)?;
    Ok(())
}
