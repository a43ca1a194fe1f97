//! Page text input
//!
//! The parser works on plain text, one string per page. Text files follow
//! the `pdftotext` convention of separating pages with a form feed; PDFs
//! are converted by running `pdftotext` itself. Its `-layout` output pads
//! columns with runs of spaces, which are collapsed to single spaces so
//! marker and header fragments match as they do in plain text.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Result, RosterError};

/// Page separator written by `pdftotext`
pub const PAGE_BREAK: char = '\u{c}';

/// Default converter program for PDF input
pub const DEFAULT_PDFTOTEXT: &str = "pdftotext";

/// Extracted text of a standings document, page by page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    /// Split text on form feeds. A trailing empty page after the last
    /// separator is dropped.
    ///
    /// # Examples
    /// ```
    /// use roster_core::Document;
    ///
    /// let doc = Document::from_text("page one\n\u{c}page two\n\u{c}");
    /// assert_eq!(doc.page_count(), 2);
    /// assert_eq!(Document::from_text("single").page_count(), 1);
    /// ```
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    /// Split converter output into pages, collapsing the whitespace runs
    /// inside each line.
    ///
    /// # Examples
    /// ```
    /// use roster_core::Document;
    ///
    /// let doc = Document::from_layout_text("  Name        Avg   HDCP\n");
    /// assert_eq!(doc.pages(), &["Name Avg HDCP"]);
    /// ```
    pub fn from_layout_text(text: &str) -> Self {
        let mut doc = Self::from_text(text);
        for page in &mut doc.pages {
            *page = collapse_spaces(page);
        }
        doc
    }

    /// Read a text file or convert a PDF, deciding by extension.
    pub fn open(path: &Path, pdftotext: &str) -> Result<Self> {
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            Self::from_pdf(path, pdftotext)
        } else {
            let text = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
            Ok(Self::from_text(&text))
        }
    }

    /// Convert a PDF with `<program> -layout <path> -`.
    pub fn from_pdf(path: &Path, program: &str) -> Result<Self> {
        if !path.is_file() {
            return Err(read_error(path, "file not found"));
        }
        debug!("Running {} on {:?}", program, path);
        let output = Command::new(program)
            .arg("-layout")
            .arg(path)
            .arg("-")
            .output()
            .map_err(|e| read_error(path, format!("could not run {program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(read_error(
                path,
                format!("{program} exited with {}: {}", output.status, stderr.trim()),
            ));
        }
        let text = String::from_utf8(output.stdout)
            .map_err(|e| read_error(path, format!("{program} produced non-UTF-8 text: {e}")))?;
        Ok(Self::from_layout_text(&text))
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

fn collapse_spaces(page: &str) -> String {
    page.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_error(path: &Path, reason: impl ToString) -> RosterError {
    RosterError::DocumentRead {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
