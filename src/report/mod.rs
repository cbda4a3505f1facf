//! Report module for audit results
//!
//! This module handles:
//! - Rendering a page result or site summary for the console
//! - Rendering the same as a standalone HTML document
//! - Writing HTML reports to disk and printing console reports

mod console;
mod html;

pub use self::console::render_console;
pub use self::html::{escape_html, render_html};

use crate::audit::PageResult;
use crate::SweepError;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// How results are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportType {
    /// Print reports to standard output
    #[default]
    Console,
    /// Write per-page and summary HTML files
    Html,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("console"),
            Self::Html => f.write_str("html"),
        }
    }
}

/// Renders and delivers reports in one [`ReportType`]
pub struct Reporter {
    report_type: ReportType,
    out: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("report_type", &self.report_type)
            .finish_non_exhaustive()
    }
}

impl Reporter {
    /// Creates a reporter printing to standard output
    pub fn new(report_type: ReportType) -> Self {
        Self::with_writer(report_type, Box::new(io::stdout()))
    }

    /// Creates a reporter printing to `out`
    pub fn with_writer(report_type: ReportType, out: Box<dyn Write + Send>) -> Self {
        Self {
            report_type,
            out: Mutex::new(out),
        }
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    /// Renders a result in this reporter's format
    pub fn render(&self, result: &PageResult) -> String {
        match self.report_type {
            ReportType::Console => render_console(result),
            ReportType::Html => render_html(result),
        }
    }

    /// Writes a rendered report, creating the parent directory if needed
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Report written
    /// * `Err(SweepError::ReportWrite)` - Directory creation or write failed
    pub fn persist(&self, path: &Path, content: &str) -> Result<(), SweepError> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut file = File::create(path)?;
            file.write_all(content.as_bytes())?;
            Ok(())
        };

        write().map_err(|source| SweepError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote report {}", path.display());
        Ok(())
    }

    /// Prints a rendered report, followed by a newline
    ///
    /// A failed write is logged; printing never interrupts a run.
    pub fn print(&self, content: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", content).and_then(|()| out.flush()) {
            tracing::warn!("Failed to print report: {}", e);
        }
    }
}
