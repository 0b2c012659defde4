//! Deal analysis output record

use serde::{Deserialize, Serialize};

/// How a result field is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Dollar amount
    Currency,
    /// Already scaled to percent (12.5 = 12.5%)
    Percent,
}

/// Identifies one of the thirteen output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealField {
    BankLoan,
    SellerFinance,
    PmlFee,
    NetCashPreMerit,
    HomeMeritFee,
    NetCashFinal,
    TotalFees,
    MonthlyBankPayment,
    InterestPaidBank,
    RemainingBalanceBank,
    BalloonPayment,
    SellerInterestPaid,
    AnnualCostPercent,
}

impl DealField {
    /// All fields in canonical output order
    pub const ALL: [DealField; 13] = [
        DealField::BankLoan,
        DealField::SellerFinance,
        DealField::PmlFee,
        DealField::NetCashPreMerit,
        DealField::HomeMeritFee,
        DealField::NetCashFinal,
        DealField::TotalFees,
        DealField::MonthlyBankPayment,
        DealField::InterestPaidBank,
        DealField::RemainingBalanceBank,
        DealField::BalloonPayment,
        DealField::SellerInterestPaid,
        DealField::AnnualCostPercent,
    ];

    /// Machine key, matching the serialized field name of `DealResults`
    pub fn key(&self) -> &'static str {
        match self {
            DealField::BankLoan => "bank_loan",
            DealField::SellerFinance => "seller_finance",
            DealField::PmlFee => "pml_fee",
            DealField::NetCashPreMerit => "net_cash_pre_merit",
            DealField::HomeMeritFee => "home_merit_fee",
            DealField::NetCashFinal => "net_cash_final",
            DealField::TotalFees => "total_fees",
            DealField::MonthlyBankPayment => "monthly_bank_payment",
            DealField::InterestPaidBank => "interest_paid_bank",
            DealField::RemainingBalanceBank => "remaining_balance_bank",
            DealField::BalloonPayment => "balloon_payment",
            DealField::SellerInterestPaid => "seller_interest_paid",
            DealField::AnnualCostPercent => "annual_cost_percent",
        }
    }

    /// Human-readable label used by the renderer and exporter
    pub fn label(&self) -> &'static str {
        match self {
            DealField::BankLoan => "Bank Loan",
            DealField::SellerFinance => "Seller Finance",
            DealField::PmlFee => "Pml Fee",
            DealField::NetCashPreMerit => "Net Cash Pre Merit",
            DealField::HomeMeritFee => "Home Merit Fee",
            DealField::NetCashFinal => "Net Cash Final",
            DealField::TotalFees => "Total Fees",
            DealField::MonthlyBankPayment => "Monthly Bank Payment",
            DealField::InterestPaidBank => "Interest Paid Bank",
            DealField::RemainingBalanceBank => "Remaining Balance Bank",
            DealField::BalloonPayment => "Balloon Payment",
            DealField::SellerInterestPaid => "Seller Interest Paid",
            DealField::AnnualCostPercent => "Annual Cost Percent",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            DealField::AnnualCostPercent => ValueKind::Percent,
            _ => ValueKind::Currency,
        }
    }
}

/// Financing metrics for one deal
///
/// Produced as a whole by `DealCostCalculator::compute`; fields are never
/// updated individually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealResults {
    pub bank_loan: f64,
    pub seller_finance: f64,
    pub pml_fee: f64,
    pub net_cash_pre_merit: f64,
    pub home_merit_fee: f64,
    pub net_cash_final: f64,
    pub total_fees: f64,
    pub monthly_bank_payment: f64,
    pub interest_paid_bank: f64,
    pub remaining_balance_bank: f64,
    pub balloon_payment: f64,
    pub seller_interest_paid: f64,
    /// Compound annual cost rate, already multiplied by 100
    pub annual_cost_percent: f64,
}

impl DealResults {
    /// Value of a single field
    pub fn get(&self, field: DealField) -> f64 {
        match field {
            DealField::BankLoan => self.bank_loan,
            DealField::SellerFinance => self.seller_finance,
            DealField::PmlFee => self.pml_fee,
            DealField::NetCashPreMerit => self.net_cash_pre_merit,
            DealField::HomeMeritFee => self.home_merit_fee,
            DealField::NetCashFinal => self.net_cash_final,
            DealField::TotalFees => self.total_fees,
            DealField::MonthlyBankPayment => self.monthly_bank_payment,
            DealField::InterestPaidBank => self.interest_paid_bank,
            DealField::RemainingBalanceBank => self.remaining_balance_bank,
            DealField::BalloonPayment => self.balloon_payment,
            DealField::SellerInterestPaid => self.seller_interest_paid,
            DealField::AnnualCostPercent => self.annual_cost_percent,
        }
    }

    /// All thirteen `(field, value)` pairs in canonical order
    pub fn fields(&self) -> impl Iterator<Item = (DealField, f64)> + '_ {
        DealField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// First non-finite field, if any
    pub(crate) fn first_non_finite(&self) -> Option<(DealField, f64)> {
        self.fields().find(|(_, value)| !value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DealResults {
        DealResults {
            bank_loan: 1.0,
            seller_finance: 2.0,
            pml_fee: 3.0,
            net_cash_pre_merit: 4.0,
            home_merit_fee: 5.0,
            net_cash_final: 6.0,
            total_fees: 7.0,
            monthly_bank_payment: 8.0,
            interest_paid_bank: 9.0,
            remaining_balance_bank: 10.0,
            balloon_payment: 11.0,
            seller_interest_paid: 12.0,
            annual_cost_percent: 13.0,
        }
    }

    #[test]
    fn test_fields_in_canonical_order() {
        let values: Vec<f64> = sample().fields().map(|(_, v)| v).collect();
        let expected: Vec<f64> = (1..=13).map(|i| i as f64).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_only_annual_cost_is_percent() {
        let percent: Vec<DealField> = DealField::ALL
            .iter()
            .copied()
            .filter(|f| f.kind() == ValueKind::Percent)
            .collect();
        assert_eq!(percent, vec![DealField::AnnualCostPercent]);
    }

    #[test]
    fn test_keys_match_serialized_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for field in DealField::ALL {
            let value = json.get(field.key()).and_then(|v| v.as_f64());
            assert_eq!(value, Some(sample().get(field)), "key {}", field.key());
        }
    }

    #[test]
    fn test_first_non_finite() {
        let mut results = sample();
        assert!(results.first_non_finite().is_none());

        results.annual_cost_percent = f64::NAN;
        let (field, _) = results.first_non_finite().unwrap();
        assert_eq!(field, DealField::AnnualCostPercent);
    }
}
