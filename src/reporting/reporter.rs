use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::core::{BatchSummary, TransformResult};
use crate::utils::{format_from_path, SourceFormat};

const RULE_WIDTH: usize = 60;

/// Sink for the tagged, human-readable progress report.
///
/// Implementors only provide [`Reporter::line`]; every tagged message is
/// built on top of it so the wording stays in one place.
pub trait Reporter {
    /// Emit one line of report text.
    fn line(&mut self, text: &str);

    fn blank(&mut self) {
        self.line("");
    }

    fn rule(&mut self) {
        self.line(&"=".repeat(RULE_WIDTH));
    }

    fn banner(&mut self, title: &str) {
        self.line(title);
        self.rule();
    }

    fn info(&mut self, msg: &str) {
        self.line(&format!("[INFO] {msg}"));
    }

    fn warn(&mut self, msg: &str) {
        self.line(&format!("[WARN] {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.line(&format!("[ERROR] {msg}"));
    }

    fn step(&mut self, msg: &str) {
        self.blank();
        self.line(&format!("[STEP] {msg}"));
    }

    fn found(&mut self, count: usize) {
        self.blank();
        self.info(&format!("Found {count} images"));
        self.rule();
    }

    fn process(&mut self, file: &str) {
        self.blank();
        self.line(&format!("[PROCESS] {file}"));
    }

    fn resize(&mut self, from: (u32, u32), to: (u32, u32)) {
        self.line(&format!(
            "   [RESIZE] {}x{} -> {}x{}",
            from.0, from.1, to.0, to.1
        ));
    }

    fn file_result(&mut self, result: &TransformResult) {
        self.line(&FileResultReport(result).to_string());
    }

    fn summary(&mut self, summary: &BatchSummary) {
        for line in SummaryReport(summary).to_string().lines() {
            self.line(line);
        }
    }

    fn done(&mut self) {
        self.blank();
        self.rule();
        self.line("[DONE] Optimization complete!");
        self.blank();
        self.line("WebP files created. Use <picture> tag for fallback support.");
    }
}

/// Writes report lines to any `Write`, typically stdout.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn line(&mut self, text: &str) {
        // The report is informational; a closed stdout must not abort the batch.
        let _ = writeln!(self.out, "{text}");
    }
}

fn source_label(file: &str) -> &'static str {
    match format_from_path(Path::new(file)) {
        Some(SourceFormat::JPEG) => "JPEG:",
        _ => "PNG: ",
    }
}

struct FileResultReport<'a>(&'a TransformResult);

impl fmt::Display for FileResultReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "   {} {:.1} KB", source_label(&result.file), result.original_size_kb)?;
        write!(
            f,
            "   WebP: {:.1} KB (savings: {:.1}%)",
            result.webp_size_kb, result.savings_percent
        )
    }
}

struct SummaryReport<'a>(&'a BatchSummary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "[SUMMARY]")?;
        writeln!(
            f,
            "   Original:       {:.1} KB ({:.2} MB)",
            summary.total_original_kb,
            summary.total_original_kb / 1024.0
        )?;
        writeln!(
            f,
            "   WebP:           {:.1} KB ({:.2} MB)",
            summary.total_webp_kb,
            summary.total_webp_kb / 1024.0
        )?;

        if let Some(savings) = summary.total_savings_percent() {
            writeln!(f, "   Total savings:  {savings:.1}%")?;
        }

        if !summary.failures.is_empty() {
            writeln!(f, "   Skipped:        {} file(s)", summary.failures.len())?;
            for failed in &summary.failures {
                writeln!(f, "     └── {}: {}", failed.file, failed.error)?;
            }
        }

        write!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}
