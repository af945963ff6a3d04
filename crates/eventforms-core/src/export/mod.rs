//! Response export
//!
//! Responses are flattened into a [`ResponseTable`] whose columns are the
//! union of every answer key ever submitted, not the form's current field
//! list. The table is then rendered as a spreadsheet or a document.

mod table;
mod spreadsheet;
mod document;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::FormsError;

pub use table::{ResponseTable, TIMESTAMP_COLUMN};

/// Output format of an export
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook
    Spreadsheet,
    /// PDF table
    Document,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "spreadsheet",
            Self::Document => "document",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Document => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Document => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spreadsheet" | "xlsx" => Ok(Self::Spreadsheet),
            "document" | "pdf" => Ok(Self::Document),
            other => Err(FormsError::Validation(format!(
                "export format must be spreadsheet or document (got {other:?})"
            ))),
        }
    }
}

/// A rendered export ready to be downloaded
#[derive(Clone, Debug)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("document export failed: {0}")]
    Document(#[from] printpdf::Error),

    #[error("too many columns for a spreadsheet: {0}")]
    TooManyColumns(usize),
}

/// Render `table` for the form called `form_name`
pub fn render(
    prefix: &str,
    form_name: &str,
    table: &ResponseTable,
    format: ExportFormat,
) -> Result<ExportedFile, ExportError> {
    let bytes = match format {
        ExportFormat::Spreadsheet => spreadsheet::render(table)?,
        ExportFormat::Document => document::render(form_name, table)?,
    };

    Ok(ExportedFile {
        file_name: file_name(prefix, form_name, format),
        content_type: format.content_type(),
        bytes,
    })
}

/// `{prefix}_{form name lowercased, whitespace runs as "_"}.{ext}`
pub fn file_name(prefix: &str, form_name: &str, format: ExportFormat) -> String {
    let slug = form_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        format!("{}_form_responses.{}", prefix, format.extension())
    } else {
        format!("{}_{}.{}", prefix, slug, format.extension())
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
