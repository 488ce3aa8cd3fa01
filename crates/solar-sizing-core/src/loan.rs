use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SolarSizingError;
use crate::types::{Money, Rate};
use crate::SolarSizingResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// One month of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal_paid: Money,
    pub balance: Money,
}

/// Equal periodic payment for an amortizing loan.
///
/// Single implementation shared by the assessment engine's bank-loan branch
/// and [`amortization_schedule`], so the two can never diverge on rounding or
/// the zero-rate special case.
pub fn periodic_payment(
    principal: Money,
    periodic_rate: Rate,
    periods: u32,
) -> SolarSizingResult<Money> {
    if periods == 0 {
        return Err(SolarSizingError::InvalidInput {
            field: "periods".into(),
            reason: "Number of payment periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let one_plus_r = Decimal::ONE + periodic_rate;
    let factor = one_plus_r.powd(Decimal::from(periods));
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(SolarSizingError::DivisionByZero {
            context: "amortizing payment annuity factor".into(),
        });
    }

    Ok(principal * periodic_rate * factor / denominator)
}

/// Convert a quoted annual percentage rate to a monthly fraction.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// Month-by-month repayment schedule for an amortizing loan.
///
/// Interest each month accrues on the running balance; the balance is floored
/// at zero once fully repaid. Entries are rounded to 2 decimal places at the
/// edge; the running balance itself is kept unrounded so rounding error does
/// not compound across periods.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_percent: Rate,
    years: u32,
) -> SolarSizingResult<Vec<AmortizationEntry>> {
    if principal < Decimal::ZERO {
        return Err(SolarSizingError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }

    let periods = years * 12;
    let rate = monthly_rate(annual_rate_percent);
    let payment = periodic_payment(principal, rate, periods)?;

    let mut schedule = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 1..=periods {
        let interest = balance * rate;
        // Last payment clears whatever balance remains
        let principal_paid = (payment - interest).min(balance);
        balance = (balance - principal_paid).max(Decimal::ZERO);

        schedule.push(AmortizationEntry {
            period,
            payment: payment.round_dp(2),
            interest: interest.round_dp(2),
            principal_paid: principal_paid.round_dp(2),
            balance: balance.round_dp(2),
        });
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_rate_payment_is_straight_line() {
        let payment = periodic_payment(dec!(120_000), Decimal::ZERO, 240).unwrap();
        assert_eq!(payment, dec!(500));
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = periodic_payment(dec!(100_000), dec!(0.01), 0).unwrap_err();
        match err {
            SolarSizingError::InvalidInput { field, .. } => assert_eq!(field, "periods"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_payment_known_answer() {
        // 1,00,000 at 12% p.a. over 1 year: EMI ≈ 8,884.88
        let payment = periodic_payment(dec!(100_000), monthly_rate(dec!(12)), 12).unwrap();
        assert!((payment - dec!(8884.88)).abs() < dec!(0.05));
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
    }

    #[test]
    fn test_schedule_length_and_numbering() {
        let schedule = amortization_schedule(dec!(500_000), dec!(9.5), 5).unwrap();
        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule.first().unwrap().period, 1);
        assert_eq!(schedule.last().unwrap().period, 60);
    }

    #[test]
    fn test_schedule_final_balance_is_zero() {
        let schedule = amortization_schedule(dec!(500_000), dec!(9.5), 5).unwrap();
        assert!(schedule.last().unwrap().balance < dec!(0.01));
    }

    #[test]
    fn test_schedule_rows_balance() {
        let schedule = amortization_schedule(dec!(250_000), dec!(11), 3).unwrap();
        for entry in &schedule {
            let split = entry.interest + entry.principal_paid;
            assert!(
                (entry.payment - split).abs() <= dec!(0.02),
                "period {} payment {} != interest+principal {}",
                entry.period,
                entry.payment,
                split
            );
        }
    }

    #[test]
    fn test_schedule_interest_declines() {
        let schedule = amortization_schedule(dec!(400_000), dec!(10), 4).unwrap();
        for window in schedule.windows(2) {
            assert!(window[1].interest <= window[0].interest);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = amortization_schedule(dec!(120_000), Decimal::ZERO, 2).unwrap();
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule[0].payment, dec!(5000));
        assert_eq!(schedule[0].interest, Decimal::ZERO);
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = amortization_schedule(dec!(-1), dec!(10), 1).unwrap_err();
        match err {
            SolarSizingError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
