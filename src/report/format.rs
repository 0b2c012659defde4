//! Display formatting for result values

use crate::deal::{DealField, ValueKind};

/// Render a dollar amount as `$#,##0.00` (negatives as `-$#,##0.00`)
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(whole);

    // Values that round to zero lose their sign
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        format!("-${}.{}", grouped, cents)
    } else {
        format!("${}.{}", grouped, cents)
    }
}

/// Render an already-scaled percentage with two decimals (`12.34%`)
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a value according to the field's presentation rule
pub fn format_field(field: DealField, value: f64) -> String {
    match field.kind() {
        ValueKind::Currency => format_currency(value),
        ValueKind::Percent => format_percent(value),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(7.5), "$7.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(33_000.0), "$33,000.00");
        assert_eq!(format_currency(780_000.0), "$780,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(5_453.873166711657), "$5,453.87");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(-1_234.5), "-$1,234.50");
        assert_eq!(format_currency(-628_800.3993031355), "-$628,800.40");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(11.51842763579618), "11.52%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(-3.256), "-3.26%");
    }

    #[test]
    fn test_format_field_dispatch() {
        assert_eq!(format_field(DealField::AnnualCostPercent, 6.2), "6.20%");
        assert_eq!(format_field(DealField::BankLoan, 780_000.0), "$780,000.00");
    }
}
