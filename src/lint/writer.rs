//! Report file lifecycle: open fresh before the scan, write once at the end.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LintError, Result};
use crate::lint::report::ReportDocument;

/// Writable stream for one report file
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ReportWriter {
    /// Prepare `path` for a new run.
    ///
    /// Creates the containing directory if needed and removes any report
    /// left by a previous run before opening a fresh stream. Both steps are
    /// no-ops when there is nothing to do.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }

        match fs::remove_file(path) {
            Ok(()) => tracing::debug!("Removed stale report {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(write_error(path, e)),
        }

        let file = File::create(path).map_err(|e| write_error(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the document, flush and close the stream.
    ///
    /// Consumes the writer, so nothing can be written after this.
    pub fn finalize(mut self, document: &mut ReportDocument) -> Result<PathBuf> {
        let xml = document.finalize()?;
        self.out
            .write_all(xml.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| write_error(&self.path, e))?;
        tracing::debug!(
            "Wrote {} report with {} issue(s) to {}",
            document.category(),
            document.issue_count(),
            self.path.display()
        );
        Ok(self.path)
    }
}

fn write_error(path: &Path, e: io::Error) -> LintError {
    LintError::ReportWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
