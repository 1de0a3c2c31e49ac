use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_engine_core::loan::{compute_loan, LoanInput};

use crate::convert;
use crate::input;

/// Loan parameters shared by the compute and schedule commands.
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual percentage rate, e.g. 4.45
    #[arg(long, alias = "taeg")]
    pub rate: Option<Decimal>,

    /// Duration in months
    #[arg(long)]
    pub duration_months: Option<u32>,

    /// Duration in years (ignored when --duration-months is given)
    #[arg(long)]
    pub duration_years: Option<u32>,

    /// Monthly insurance amount
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly insurance as a percentage of the principal
    /// (ignored when --insurance is given)
    #[arg(long)]
    pub insurance_pct: Option<Decimal>,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_compute(args: ComputeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_input(&args.loan)?;
    let output = compute_loan(&loan_input)?;
    Ok(serde_json::to_value(&output)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_input(&args.loan)?;
    let output = compute_loan(&loan_input)?;
    let mut value = serde_json::to_value(&output)?;

    // Narrow the result payload to the schedule, keeping the envelope
    if let Some(result) = value.get_mut("result") {
        if let Some(schedule) = result.get("schedule").cloned() {
            *result = schedule;
        }
    }
    Ok(value)
}

/// Assemble a `LoanInput` from a JSON file, piped stdin, or individual flags,
/// in that order of precedence.
fn resolve_input(args: &LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::file::read_json(path)?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let annual_rate = args
        .rate
        .ok_or("--rate is required (or provide --input)")?;

    let duration_months = match (args.duration_months, args.duration_years) {
        (Some(months), _) => months,
        (None, Some(years)) => convert::years_to_months(years),
        (None, None) => {
            return Err("--duration-months or --duration-years is required (or provide --input)".into())
        }
    };

    let monthly_insurance = match (args.insurance, args.insurance_pct) {
        (Some(amount), _) => amount,
        (None, Some(pct)) => convert::insurance_amount_from_percentage(principal, pct),
        (None, None) => Decimal::ZERO,
    };

    Ok(LoanInput {
        principal,
        annual_rate,
        duration_months,
        monthly_insurance,
        first_payment_date: args.first_payment,
    })
}
