use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::schedule::{build_schedule, AmortizationSchedule};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::{LoanEngineError, LoanEngineResult};

/// Annual rates below this (in percent) make the annuity factor numerically
/// fragile; the computation still runs but carries a warning.
const MIN_STABLE_ANNUAL_RATE: Decimal = dec!(0.01);
/// Longest term the engine is expected to see (50 years).
const MAX_REALISTIC_DURATION_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual percentage rate (APR/TAEG), e.g. 4.45 for 4.45%.
    pub annual_rate: Rate,
    pub duration_months: u32,
    /// Monthly insurance charge, added on top of the annuity payment.
    #[serde(default)]
    pub monthly_insurance: Money,
    /// When set, each schedule row carries its payment date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Monthly payment excluding insurance (the pure annuity payment).
    pub base_payment: Money,
    /// Monthly payment including insurance.
    pub monthly_payment: Money,
    /// Everything paid on top of the principal: interest plus insurance.
    pub total_cost: Money,
    /// Principal + interest + insurance over the full term.
    pub total_paid: Money,
    /// total_cost as a percentage of the principal.
    pub cost_percentage: Rate,
    pub insurance_total_cost: Money,
}

/// Result payload of a single computation: aggregate metrics plus the full
/// month-by-month breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub summary: LoanSummary,
    pub schedule: AmortizationSchedule,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Derive the loan summary and amortization schedule for a fixed-rate loan.
///
/// Pure and deterministic: reads only its argument, allocates only the
/// returned structures, safe to call concurrently without synchronization.
pub fn compute_loan(input: &LoanInput) -> LoanEngineResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    if input.monthly_insurance < Decimal::ZERO {
        warnings.push(
            "Monthly insurance is negative; the reported cost will be below the true interest cost."
                .into(),
        );
    }
    if input.annual_rate < MIN_STABLE_ANNUAL_RATE {
        warnings.push(format!(
            "Annual rate below {MIN_STABLE_ANNUAL_RATE}%; the annuity factor is numerically fragile at near-zero rates."
        ));
    }
    if input.duration_months > MAX_REALISTIC_DURATION_MONTHS {
        warnings.push(format!(
            "Duration exceeds {MAX_REALISTIC_DURATION_MONTHS} months; inputs this long are outside the realistic envelope."
        ));
    }

    let monthly_rate = annuity::monthly_rate(input.annual_rate);
    let base_payment = annuity::annuity_payment(input.principal, monthly_rate, input.duration_months)?;

    let months = Decimal::from(input.duration_months);
    let monthly_payment = base_payment + input.monthly_insurance;
    let total_paid = monthly_payment * months;
    let total_cost = total_paid - input.principal;
    let cost_percentage = total_cost / input.principal * dec!(100);
    let insurance_total_cost = input.monthly_insurance * months;

    let schedule = build_schedule(
        input.principal,
        monthly_rate,
        base_payment,
        input.duration_months,
        input.monthly_insurance,
        input.first_payment_date,
    );

    let analysis = LoanAnalysis {
        summary: LoanSummary {
            base_payment,
            monthly_payment,
            total_cost,
            total_paid,
            cost_percentage,
            insurance_total_cost,
        },
        schedule,
    };

    Ok(with_metadata(
        "Fixed-rate annuity amortization, monthly compounding",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        analysis,
    ))
}

fn validate_input(input: &LoanInput) -> LoanEngineResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "principal".into(),
            reason: "must be strictly positive".into(),
        });
    }
    if input.annual_rate <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "annual_rate".into(),
            reason: "must be strictly positive".into(),
        });
    }
    if input.duration_months == 0 {
        return Err(LoanEngineError::InvalidInput {
            field: "duration_months".into(),
            reason: "must be strictly positive".into(),
        });
    }
    Ok(())
}
