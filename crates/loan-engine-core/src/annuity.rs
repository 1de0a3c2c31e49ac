use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanEngineError;
use crate::types::{Money, Rate};
use crate::LoanEngineResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Monthly periodic rate from an annual percentage rate (4.45 -> 0.0445 / 12).
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / PERCENT / MONTHS_PER_YEAR
}

/// Fixed payment that fully amortizes `principal` over `duration_months`
/// equal payments at `rate` per month, compounding monthly.
///
/// `payment = principal * (r * (1+r)^n) / ((1+r)^n - 1)`
///
/// A zero periodic rate collapses the annuity factor to zero; that case is
/// rejected upstream by the positive-rate precondition, so it surfaces here
/// as a structured error rather than a straight-line fallback.
pub fn annuity_payment(
    principal: Money,
    rate: Rate,
    duration_months: u32,
) -> LoanEngineResult<Money> {
    if duration_months == 0 {
        return Err(LoanEngineError::InvalidInput {
            field: "duration_months".into(),
            reason: "must be strictly positive".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r.powi(duration_months as i64);
    let annuity_factor = factor - Decimal::ONE;

    if annuity_factor.is_zero() {
        return Err(LoanEngineError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    Ok(principal * (rate * factor) / annuity_factor)
}
