use chrono::NaiveDate;
use loan_engine_core::loan::{self, LoanInput};
use loan_engine_core::LoanEngineError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn reference_loan() -> LoanInput {
    // The worked example: 30,000 at 4.45% TAEG over 57 months, no insurance
    LoanInput {
        principal: dec!(30000),
        annual_rate: dec!(4.45),
        duration_months: 57,
        monthly_insurance: Decimal::ZERO,
        first_payment_date: None,
    }
}

// ===========================================================================
// Summary metrics
// ===========================================================================

#[test]
fn test_reference_loan_summary() {
    let output = loan::compute_loan(&reference_loan()).unwrap();
    let s = &output.result.summary;

    // Annuity formula: 30000 * (r * (1+r)^57) / ((1+r)^57 - 1) with
    // r = 0.0445 / 12 ≈ 0.0037083 gives ~584.87
    assert!((s.base_payment - dec!(584.87)).abs() < dec!(0.01));
    assert_eq!(s.monthly_payment, s.base_payment);

    // total_paid = monthly_payment * 57 and total_cost = total_paid - 30000,
    // both exact by construction
    assert_eq!(s.total_paid, s.monthly_payment * dec!(57));
    assert_eq!(s.total_cost, s.total_paid - dec!(30000));

    // cost_percentage = total_cost / principal * 100 ≈ 11.13%
    assert!((s.cost_percentage - dec!(11.13)).abs() < dec!(0.01));
    assert_eq!(s.insurance_total_cost, Decimal::ZERO);

    assert!(output.warnings.is_empty());
}

#[test]
fn test_insurance_added_on_top_of_annuity_payment() {
    let input = LoanInput {
        monthly_insurance: dec!(25),
        ..reference_loan()
    };
    let output = loan::compute_loan(&input).unwrap();
    let s = &output.result.summary;

    assert_eq!(s.monthly_payment, s.base_payment + dec!(25));
    assert_eq!(s.insurance_total_cost, dec!(1425));
    assert_eq!(s.total_paid, s.monthly_payment * dec!(57));

    // Insurance is a pass-through column, never amortized
    for row in &output.result.schedule.rows {
        assert_eq!(row.insurance_portion, dec!(25));
        assert_eq!(row.total_due, s.base_payment + dec!(25));
    }
    assert_eq!(output.result.schedule.totals.insurance_portion, dec!(1425));
}

#[test]
fn test_single_month_loan() {
    // One payment: the whole principal plus one month of interest
    let input = LoanInput {
        principal: dec!(10000),
        annual_rate: dec!(6),
        duration_months: 1,
        monthly_insurance: Decimal::ZERO,
        first_payment_date: None,
    };
    let output = loan::compute_loan(&input).unwrap();
    let analysis = &output.result;

    assert_eq!(analysis.summary.base_payment, dec!(10050));
    assert_eq!(analysis.schedule.rows.len(), 1);

    let row = &analysis.schedule.rows[0];
    assert_eq!(row.opening_balance, dec!(10000));
    assert_eq!(row.interest_portion, dec!(50));
    assert_eq!(row.principal_portion, dec!(10000));
    assert_eq!(row.opening_balance - row.principal_portion, Decimal::ZERO);
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_principal_portions_sum_to_principal() {
    // The defining correctness property of amortization, across a spread of
    // principals, rates and terms
    let cases = [
        (dec!(30000), dec!(4.45), 57u32),
        (dec!(250000), dec!(3.2), 300),
        (dec!(1200), dec!(12), 12),
        (dec!(50000), dec!(8.75), 600),
    ];

    for (principal, rate, months) in cases {
        let input = LoanInput {
            principal,
            annual_rate: rate,
            duration_months: months,
            monthly_insurance: Decimal::ZERO,
            first_payment_date: None,
        };
        let output = loan::compute_loan(&input).unwrap();
        let schedule = &output.result.schedule;

        assert_eq!(schedule.rows.len(), months as usize);
        assert!(
            (schedule.totals.principal_portion - principal).abs() < dec!(0.0001),
            "principal portions for {principal} over {months}m sum to {}",
            schedule.totals.principal_portion
        );
    }
}

#[test]
fn test_opening_balance_decreases_to_zero() {
    let output = loan::compute_loan(&reference_loan()).unwrap();
    let rows = &output.result.schedule.rows;

    assert_eq!(rows.len(), 57);
    assert_eq!(rows[0].opening_balance, dec!(30000));

    for pair in rows.windows(2) {
        assert!(pair[1].opening_balance < pair[0].opening_balance);
    }

    // Balance after the final payment is fully amortized
    let last = rows.last().unwrap();
    assert!((last.opening_balance - last.principal_portion).abs() < dec!(0.0000001));
}

#[test]
fn test_totals_row_sums_columns() {
    let input = LoanInput {
        monthly_insurance: dec!(18.50),
        ..reference_loan()
    };
    let output = loan::compute_loan(&input).unwrap();
    let schedule = &output.result.schedule;

    let mut principal_sum = Decimal::ZERO;
    let mut interest_sum = Decimal::ZERO;
    let mut insurance_sum = Decimal::ZERO;
    let mut due_sum = Decimal::ZERO;
    for row in &schedule.rows {
        principal_sum += row.principal_portion;
        interest_sum += row.interest_portion;
        insurance_sum += row.insurance_portion;
        due_sum += row.total_due;
    }

    assert_eq!(schedule.totals.principal_portion, principal_sum);
    assert_eq!(schedule.totals.interest_portion, interest_sum);
    assert_eq!(schedule.totals.insurance_portion, insurance_sum);
    assert_eq!(schedule.totals.total_due, due_sum);
}

#[test]
fn test_payment_dates_follow_first_payment() {
    let input = LoanInput {
        duration_months: 3,
        first_payment_date: NaiveDate::from_ymd_opt(2026, 11, 30),
        ..reference_loan()
    };
    let output = loan::compute_loan(&input).unwrap();
    let dates: Vec<Option<NaiveDate>> = output
        .result
        .schedule
        .rows
        .iter()
        .map(|r| r.payment_date)
        .collect();

    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2026, 11, 30),
            NaiveDate::from_ymd_opt(2026, 12, 30),
            NaiveDate::from_ymd_opt(2027, 1, 30),
        ]
    );
}

// ===========================================================================
// Validation and edge cases
// ===========================================================================

#[test]
fn test_non_positive_inputs_rejected() {
    let zero_principal = LoanInput {
        principal: Decimal::ZERO,
        ..reference_loan()
    };
    let err = loan::compute_loan(&zero_principal).unwrap_err();
    assert!(matches!(
        err,
        LoanEngineError::InvalidInput { ref field, .. } if field == "principal"
    ));

    let negative_rate = LoanInput {
        annual_rate: dec!(-1),
        ..reference_loan()
    };
    let err = loan::compute_loan(&negative_rate).unwrap_err();
    assert!(matches!(
        err,
        LoanEngineError::InvalidInput { ref field, .. } if field == "annual_rate"
    ));

    let zero_duration = LoanInput {
        duration_months: 0,
        ..reference_loan()
    };
    let err = loan::compute_loan(&zero_duration).unwrap_err();
    assert!(matches!(
        err,
        LoanEngineError::InvalidInput { ref field, .. } if field == "duration_months"
    ));
}

#[test]
fn test_negative_insurance_accepted_with_warning() {
    // Permissive by design: a negative charge shrinks the payment instead of
    // being rejected, but the envelope flags it
    let input = LoanInput {
        monthly_insurance: dec!(-10),
        ..reference_loan()
    };
    let output = loan::compute_loan(&input).unwrap();
    let s = &output.result.summary;

    assert_eq!(s.monthly_payment, s.base_payment - dec!(10));
    assert_eq!(s.insurance_total_cost, dec!(-570));
    assert!(output.warnings.iter().any(|w| w.contains("insurance")));
}

#[test]
fn test_near_zero_rate_warns_but_computes() {
    let input = LoanInput {
        annual_rate: dec!(0.005),
        ..reference_loan()
    };
    let output = loan::compute_loan(&input).unwrap();

    assert!(output.result.summary.base_payment > Decimal::ZERO);
    assert!(output.warnings.iter().any(|w| w.contains("Annual rate")));
}

#[test]
fn test_unrealistic_duration_warns_but_computes() {
    let input = LoanInput {
        duration_months: 720,
        ..reference_loan()
    };
    let output = loan::compute_loan(&input).unwrap();

    assert_eq!(output.result.schedule.rows.len(), 720);
    assert!(output.warnings.iter().any(|w| w.contains("Duration")));
}

#[test]
fn test_identical_inputs_yield_identical_results() {
    let a = loan::compute_loan(&reference_loan()).unwrap();
    let b = loan::compute_loan(&reference_loan()).unwrap();

    // Metadata carries wall-clock timings; the result payload itself must
    // match exactly
    assert_eq!(
        serde_json::to_value(&a.result).unwrap(),
        serde_json::to_value(&b.result).unwrap()
    );
}
