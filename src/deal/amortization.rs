//! Closed-form level-payment loan amortization
//!
//! Used for the senior bank loan. Rates are annual nominal, compounded monthly.

/// Level monthly payment that retires `principal` over `total_payments` months
///
/// # Arguments
/// * `principal` - Loan amount
/// * `annual_rate` - Annual nominal rate as a decimal (e.g., 0.075 for 7.5%)
/// * `total_payments` - Number of monthly payments over the full term
///
/// A rate too small to move `1 + r` (zero included) falls back to straight-line
/// repayment. A term long enough to overflow the growth factor converges to
/// the interest-only payment.
pub fn monthly_payment(principal: f64, annual_rate: f64, total_payments: f64) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let base = 1.0 + monthly_rate;
    if base == 1.0 {
        return principal / total_payments;
    }

    let growth = base.powf(total_payments);
    if growth.is_infinite() {
        return principal * monthly_rate;
    }
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Outstanding balance after `months_elapsed` level payments
///
/// Evaluated verbatim, so a `months_elapsed` past `total_payments` yields a
/// negative balance. Callers decide how to treat the post-maturity region.
pub fn remaining_balance(principal: f64, annual_rate: f64, total_payments: f64, months_elapsed: f64) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let base = 1.0 + monthly_rate;
    if base == 1.0 {
        return principal * (total_payments - months_elapsed) / total_payments;
    }

    let growth_term = base.powf(total_payments);
    let growth_elapsed = base.powf(months_elapsed);
    if growth_term.is_infinite() && growth_elapsed.is_finite() {
        // Interest-only limit: nothing amortized yet
        return principal;
    }
    principal * (growth_term - growth_elapsed) / (growth_term - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_mortgage_payment() {
        // $780,000 at 7.5% over 30 years
        let pmt = monthly_payment(780_000.0, 0.075, 360.0);
        assert_relative_eq!(pmt, 5453.873166711657, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(120_000.0, 0.0, 120.0), 1_000.0);
        assert_eq!(remaining_balance(120_000.0, 0.0, 120.0, 30.0), 90_000.0);
    }

    #[test]
    fn test_balance_endpoints() {
        let principal = 250_000.0;
        assert_relative_eq!(remaining_balance(principal, 0.06, 180.0, 0.0), principal, epsilon = 1e-6);
        assert!(remaining_balance(principal, 0.06, 180.0, 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_balance_matches_iterated_schedule() {
        let principal = 780_000.0;
        let rate = 0.075;
        let pmt = monthly_payment(principal, rate, 360.0);

        let mut balance = principal;
        for _ in 0..96 {
            balance = balance * (1.0 + rate / 12.0) - pmt;
        }

        assert_relative_eq!(remaining_balance(principal, rate, 360.0, 96.0), balance, epsilon = 1e-4);
        assert_relative_eq!(balance, 704_170.424223641, epsilon = 1e-4);
    }

    #[test]
    fn test_balance_goes_negative_past_maturity() {
        assert!(remaining_balance(780_000.0, 0.075, 60.0, 96.0) < 0.0);
    }

    #[test]
    fn test_negligible_rate_is_straight_line() {
        // 1 + 1e-17 / 12 rounds to exactly 1.0
        assert_eq!(monthly_payment(120_000.0, 1e-17, 120.0), 1_000.0);
        assert_eq!(remaining_balance(120_000.0, 1e-17, 120.0, 30.0), 90_000.0);
    }

    #[test]
    fn test_overflowing_term_converges_to_interest_only() {
        let n = 400_000_000.0 * 12.0;
        assert!(1.00625_f64.powf(n).is_infinite());

        assert_relative_eq!(monthly_payment(780_000.0, 0.075, n), 4_875.0, epsilon = 1e-6);
        assert_eq!(remaining_balance(780_000.0, 0.075, n, 96.0), 780_000.0);
    }
}
