//! Deal Analyzer - financing-cost metrics for seller-financed real-estate deals
//!
//! This library provides:
//! - The deal cost calculation (bank amortization, fees, seller note, annualized cost)
//! - Parameter resolution from defaults, JSON files and environment variables
//! - Currency/percent rendering and "Deal Analysis" document export

pub mod config;
pub mod deal;
pub mod error;
pub mod report;

// Re-export commonly used types
pub use deal::{compute, DealCostCalculator, DealField, DealParameters, DealResults, MaturityPolicy};
pub use error::{DealError, DealResult};
pub use report::{DealReport, ReportFormat};
