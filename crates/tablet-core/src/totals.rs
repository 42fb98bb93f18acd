use crate::types::Charge;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChargeTotals {
    pub fine: Decimal,
    /// Minutes.
    pub time: u32,
    pub points: u32,
}

/// Sums fine, time and points over a charge list. Missing points count as zero.
pub fn totals(charges: &[Charge]) -> ChargeTotals {
    charges.iter().fold(ChargeTotals::default(), |acc, charge| ChargeTotals {
        fine: acc.fine + charge.fine,
        time: acc.time.saturating_add(charge.time),
        points: acc.points.saturating_add(charge.points.unwrap_or(0)),
    })
}

pub fn total_fine(charges: &[Charge]) -> Decimal {
    charges.iter().map(|c| c.fine).sum()
}

pub fn total_time(charges: &[Charge]) -> u32 {
    charges.iter().fold(0u32, |acc, c| acc.saturating_add(c.time))
}

pub fn total_points(charges: &[Charge]) -> u32 {
    charges
        .iter()
        .fold(0u32, |acc, c| acc.saturating_add(c.points.unwrap_or(0)))
}

/// Format a fine as whole dollars with thousands separators, e.g. `$6,000`.
///
/// Fractions are rounded away (banker's rounding, as `Decimal::round` does).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChargeClass;
    use rust_decimal_macros::dec;

    fn charge(code: &str, fine: Decimal, time: u32, points: Option<u32>) -> Charge {
        Charge {
            code: code.to_string(),
            title: code.to_string(),
            class: ChargeClass::Crime,
            fine,
            time,
            points,
            description: String::new(),
        }
    }

    #[test]
    fn test_totals() {
        let charges = vec![
            charge("P-101", dec!(6000), 40, Some(4)),
            charge("P-140", dec!(2800), 14, None),
        ];
        let t = totals(&charges);

        assert_eq!(t.fine, dec!(8800));
        assert_eq!(t.time, 54);
        assert_eq!(t.points, 4);
        assert_eq!(total_fine(&charges), t.fine);
        assert_eq!(total_time(&charges), t.time);
        assert_eq!(total_points(&charges), t.points);
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(totals(&[]), ChargeTotals::default());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0");
        assert_eq!(format_currency(dec!(750)), "$750");
        assert_eq!(format_currency(dec!(6000)), "$6,000");
        assert_eq!(format_currency(dec!(1234567)), "$1,234,567");
        assert_eq!(format_currency(dec!(999.4)), "$999");
    }
}
