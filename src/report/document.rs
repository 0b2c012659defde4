//! "Deal Analysis" document built from one computed result set

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deal::{DealParameters, DealResults};
use super::format::format_field;

/// Document title
pub const REPORT_TITLE: &str = "Deal Analysis";

/// Errors raised while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for an exported report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Title line followed by one `Label: value` line per field
    #[default]
    Text,
    /// `field,label,value,display` rows
    Csv,
    /// Pretty-printed JSON document
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    /// File name used when the caller has no preference
    pub fn default_file_name(&self) -> String {
        format!("deal_analysis.{}", self.extension())
    }

    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "txt" | "text" => Some(ReportFormat::Text),
                "csv" => Some(ReportFormat::Csv),
                "json" => Some(ReportFormat::Json),
                _ => None,
            })
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}' (expected text, csv or json)", other)),
        }
    }
}

/// One CSV export row
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    field: &'a str,
    label: &'a str,
    value: f64,
    display: String,
}

/// Snapshot of a computed deal, ready for export
///
/// Can be built from any previously computed `DealResults`; nothing about
/// how the results were obtained is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: DealParameters,
    pub results: DealResults,
}

impl DealReport {
    /// Create a report stamped with the current time
    pub fn new(parameters: DealParameters, results: DealResults) -> Self {
        Self::with_timestamp(parameters, results, Utc::now())
    }

    pub fn with_timestamp(parameters: DealParameters, results: DealResults, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            generated_at,
            parameters,
            results,
        }
    }

    /// `Label: value` line per result field, in canonical order
    pub fn lines(&self) -> Vec<String> {
        self.results
            .fields()
            .map(|(field, value)| format!("{}: {}", field.label(), format_field(field, value)))
            .collect()
    }

    /// Render the text document to a string
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&format!("Generated: {}\n\n", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Write the report in the requested format
    pub fn write_to<W: Write>(&self, mut writer: W, format: ReportFormat) -> Result<(), ReportError> {
        match format {
            ReportFormat::Text => {
                writer.write_all(self.to_text().as_bytes())?;
            }
            ReportFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(&mut writer);
                for (field, value) in self.results.fields() {
                    csv_writer.serialize(ReportRow {
                        field: field.key(),
                        label: field.label(),
                        value,
                        display: format_field(field, value),
                    })?;
                }
                csv_writer.flush()?;
            }
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self)?;
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the report to a file, replacing any existing file
    pub fn export(&self, path: &Path, format: ReportFormat) -> Result<(), ReportError> {
        log::debug!("Exporting {:?} report to {}", format, path.display());
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), format)
    }
}
