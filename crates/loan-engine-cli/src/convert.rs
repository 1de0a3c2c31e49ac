//! Pure derivations replacing the original form's cross-field couplings.
//!
//! Months <-> years and insurance amount <-> percentage stay mutually
//! consistent by deriving one from the other per request instead of holding
//! both in shared mutable state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const PERCENT: Decimal = dec!(100);

pub fn years_to_months(years: u32) -> u32 {
    years * 12
}

/// Years shown for a month count, rounded to the nearest whole year.
pub fn months_to_years(months: u32) -> u32 {
    (months + 6) / 12
}

/// Monthly insurance amount from a percentage of the principal.
pub fn insurance_amount_from_percentage(principal: Decimal, percentage: Decimal) -> Decimal {
    percentage / PERCENT * principal
}

/// Insurance percentage of the principal from a monthly amount.
pub fn insurance_percentage_from_amount(principal: Decimal, amount: Decimal) -> Decimal {
    if principal.is_zero() {
        Decimal::ZERO
    } else {
        amount / principal * PERCENT
    }
}
