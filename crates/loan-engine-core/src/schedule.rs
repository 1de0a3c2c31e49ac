use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Schedule types
// ---------------------------------------------------------------------------

/// A single month in the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month index.
    pub month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Principal still owed before this month's payment.
    pub opening_balance: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Constant pass-through; insurance never enters the amortization math.
    pub insurance_portion: Money,
    pub total_due: Money,
}

/// Column sums over the full schedule, rendered as the trailing totals row.
/// It has no opening balance by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub insurance_portion: Money,
    pub total_due: Money,
}

/// One row per month, in month order, plus the totals row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    pub totals: ScheduleTotals,
}

// ---------------------------------------------------------------------------
// Schedule construction
// ---------------------------------------------------------------------------

/// Build the month-by-month amortization breakdown from a pre-computed base
/// payment (insurance excluded).
///
/// Infallible: invalid numeric inputs produce garbage rows rather than an
/// error, so callers must validate first (`compute_loan` enforces this).
pub fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    base_payment: Money,
    duration_months: u32,
    monthly_insurance: Money,
    first_payment_date: Option<NaiveDate>,
) -> AmortizationSchedule {
    let mut rows = Vec::with_capacity(duration_months as usize);
    let mut totals = ScheduleTotals {
        principal_portion: Decimal::ZERO,
        interest_portion: Decimal::ZERO,
        insurance_portion: Decimal::ZERO,
        total_due: Decimal::ZERO,
    };

    let total_due = base_payment + monthly_insurance;
    let mut remaining = principal;

    for month in 1..=duration_months {
        let opening_balance = remaining;
        let interest_portion = remaining * monthly_rate;
        let principal_portion = base_payment - interest_portion;

        remaining -= principal_portion;
        // Residual drift on the final row must not leave a negative balance.
        if remaining < Decimal::ZERO {
            remaining = Decimal::ZERO;
        }

        let payment_date =
            first_payment_date.and_then(|d| d.checked_add_months(Months::new(month - 1)));

        totals.principal_portion += principal_portion;
        totals.interest_portion += interest_portion;
        totals.insurance_portion += monthly_insurance;
        totals.total_due += total_due;

        rows.push(AmortizationRow {
            month,
            payment_date,
            opening_balance,
            principal_portion,
            interest_portion,
            insurance_portion: monthly_insurance,
            total_due,
        });
    }

    AmortizationSchedule { rows, totals }
}
