//! Rendering and export of computed deal results
//!
//! Currency fields render as `$#,##0.00`; the annual cost renders as a
//! percentage with two decimals.

mod document;
mod format;

pub use document::{DealReport, ReportError, ReportFormat, REPORT_TITLE};
pub use format::{format_currency, format_field, format_percent};
