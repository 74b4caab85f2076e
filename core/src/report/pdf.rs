//! PDF report writer.
//!
//! Single-column A4 layout: title, scan metadata, then one wrapped line
//! per finding, flowing onto extra pages as needed.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use super::{ReportWriter, report_path};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: Mm = Mm(20.0);
const LINE_HEIGHT: f32 = 4.8;
const PAGE_BREAK_AT: f32 = 35.0;
const WRAP_COLUMNS: usize = 100;

pub struct PdfReport {
    dir: PathBuf,
}

impl PdfReport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportWriter for PdfReport {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn write(
        &self,
        timestamp: &str,
        target: &str,
        findings: &[String],
    ) -> anyhow::Result<PathBuf> {
        let path = report_path(&self.dir, timestamp, target, "pdf");
        render(&path, timestamp, target, findings)
            .with_context(|| format!("writing PDF report to {}", path.display()))?;
        Ok(path)
    }
}

struct PageCursor {
    doc: PdfDocumentReference,
    layer: printpdf::PdfLayerReference,
    y: f32,
}

impl PageCursor {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: f32) {
        if self.y < PAGE_BREAK_AT {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT.0 - MARGIN.0;
        }
        self.layer
            .use_text(text, size, MARGIN, Mm(self.y), font);
        self.y -= advance;
    }
}

fn render(path: &Path, timestamp: &str, target: &str, findings: &[String]) -> anyhow::Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Nikto Report - {target}"),
        PAGE_WIDTH,
        PAGE_HEIGHT,
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut cursor = PageCursor {
        doc,
        layer,
        y: PAGE_HEIGHT.0 - MARGIN.0,
    };

    cursor.line("Nikto Scan Report", 14.0, &bold, 8.0);
    cursor.line(&format!("Timestamp: {timestamp}"), 10.0, &regular, 6.0);
    cursor.line(&format!("Target URL: {target}"), 10.0, &regular, 8.0);
    cursor.line("Findings:", 12.0, &bold, 7.0);

    for finding in findings {
        for wrapped in wrap_text(finding, WRAP_COLUMNS) {
            cursor.line(&format!("- {wrapped}"), 10.0, &regular, LINE_HEIGHT);
        }
    }

    let file = File::create(path)?;
    cursor.doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

/// Greedy word wrap; words longer than `max_chars` get their own line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed <= max_chars || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
