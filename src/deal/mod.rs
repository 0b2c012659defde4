//! Deal financing-cost calculation
//!
//! A deal is a bank loan sized at a fixed share of property value plus a
//! seller-financed second lien. `compute` maps one `DealParameters` record to
//! one `DealResults` record with no side effects.

pub mod amortization;
mod calculator;
mod params;
mod results;

pub use calculator::{
    compute, CalculatorConfig, DealCostCalculator, MaturityPolicy,
    BANK_LOAN_TO_VALUE, HOME_MERIT_FEE_RATE, PML_FEE_RATE,
};
pub use params::DealParameters;
pub use results::{DealField, DealResults, ValueKind};
