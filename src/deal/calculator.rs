//! Deal cost calculator: fees, bank amortization, seller note and annualized cost

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DealError, DealResult};
use super::amortization;
use super::params::DealParameters;
use super::results::DealResults;

/// Share of property value the bank lends, regardless of the amount requested
pub const BANK_LOAN_TO_VALUE: f64 = 0.65;

/// Private-money-lender fee on the seller down payment
pub const PML_FEE_RATE: f64 = 0.10;

/// Home Merit fee on pre-merit net cash
pub const HOME_MERIT_FEE_RATE: f64 = 0.10;

/// Treatment of a hold period that runs past the bank loan's maturity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaturityPolicy {
    /// Payments stop once the loan is retired; remaining balance is zero from maturity on
    #[default]
    StopAtMaturity,
    /// Evaluate the closed-form formulas past maturity (balance may go negative)
    Extrapolate,
}

impl FromStr for MaturityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "stop-at-maturity" | "stop" => Ok(MaturityPolicy::StopAtMaturity),
            "extrapolate" => Ok(MaturityPolicy::Extrapolate),
            other => Err(format!(
                "unknown maturity policy '{}' (expected stop-at-maturity or extrapolate)",
                other
            )),
        }
    }
}

/// Configuration for a calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub maturity_policy: MaturityPolicy,
}

/// Loan sizing and fee figures that precede amortization
#[derive(Debug, Clone, Copy, PartialEq)]
struct CapitalStack {
    bank_loan: f64,
    seller_finance: f64,
    pml_fee: f64,
    net_cash_pre_merit: f64,
    home_merit_fee: f64,
    total_fees: f64,
    net_cash_final: f64,
}

impl CapitalStack {
    fn from_params(params: &DealParameters) -> Self {
        let bank_loan = BANK_LOAN_TO_VALUE * params.property_value;
        let seller_finance = params.property_value - params.seller_down_payment;
        let pml_fee = PML_FEE_RATE * params.seller_down_payment;
        let net_cash_pre_merit = bank_loan - params.seller_down_payment - pml_fee;
        // No floor: a negative pre-merit figure yields a negative fee
        let home_merit_fee = HOME_MERIT_FEE_RATE * net_cash_pre_merit;
        let total_fees = pml_fee + home_merit_fee;
        let net_cash_final = net_cash_pre_merit - home_merit_fee;

        Self {
            bank_loan,
            seller_finance,
            pml_fee,
            net_cash_pre_merit,
            home_merit_fee,
            total_fees,
            net_cash_final,
        }
    }
}

/// Stateless financing-cost calculator
///
/// Holds only configuration, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealCostCalculator {
    config: CalculatorConfig,
}

impl DealCostCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn with_maturity_policy(maturity_policy: MaturityPolicy) -> Self {
        Self::new(CalculatorConfig { maturity_policy })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Compute all financing metrics for one deal
    ///
    /// Order of operations matters: later figures are derived from earlier ones.
    pub fn compute(&self, params: &DealParameters) -> DealResult<DealResults> {
        params.validate()?;

        let CapitalStack {
            bank_loan,
            seller_finance,
            pml_fee,
            net_cash_pre_merit,
            home_merit_fee,
            total_fees,
            net_cash_final,
        } = CapitalStack::from_params(params);

        // Bank loan over the hold period
        let total_payments = params.total_bank_payments();
        let months_held = params.months_held();
        let monthly_bank_payment =
            amortization::monthly_payment(bank_loan, params.bank_interest_rate, total_payments);

        let (months_paid, remaining_balance_bank) = match self.config.maturity_policy {
            MaturityPolicy::StopAtMaturity if months_held >= total_payments => (total_payments, 0.0),
            _ => (
                months_held,
                amortization::remaining_balance(
                    bank_loan,
                    params.bank_interest_rate,
                    total_payments,
                    months_held,
                ),
            ),
        };

        let total_paid_bank = monthly_bank_payment * months_paid;
        let principal_paid_bank = bank_loan - remaining_balance_bank;
        let interest_paid_bank = total_paid_bank - principal_paid_bank;

        // Seller note; seller_interest_rate is intentionally not applied here
        let total_paid_seller = params.seller_monthly_payment * params.seller_term_months as f64;
        let balloon_payment = (seller_finance - total_paid_seller).max(0.0);
        let total_seller_paid = total_paid_seller + balloon_payment;
        let seller_interest_paid = (total_seller_paid - seller_finance).max(0.0);

        // Annualized cost relative to net cash
        let total_cost = interest_paid_bank + total_fees + seller_interest_paid;
        let final_value = net_cash_final + total_cost;

        if net_cash_final <= 0.0 {
            return Err(DealError::ComputationUndefined(format!(
                "net cash after fees is {:.2}; annualized cost requires a positive base",
                net_cash_final
            )));
        }

        let growth = final_value / net_cash_final;
        let annual_cost_percent = (growth.powf(1.0 / params.hold_years) - 1.0) * 100.0;

        let results = DealResults {
            bank_loan,
            seller_finance,
            pml_fee,
            net_cash_pre_merit,
            home_merit_fee,
            net_cash_final,
            total_fees,
            monthly_bank_payment,
            interest_paid_bank,
            remaining_balance_bank,
            balloon_payment,
            seller_interest_paid,
            annual_cost_percent,
        };

        if let Some((field, value)) = results.first_non_finite() {
            return Err(DealError::ComputationUndefined(format!(
                "{} evaluated to {}",
                field.key(),
                value
            )));
        }

        Ok(results)
    }
}

/// Compute with the default calculator configuration
pub fn compute(params: &DealParameters) -> DealResult<DealResults> {
    DealCostCalculator::default().compute(params)
}
