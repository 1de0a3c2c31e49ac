use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use crate::i18n::{self, keys, Language};

/// Summary fields in display order, mirroring the original results panel.
const SUMMARY_FIELDS: [&str; 6] = [
    "monthly_payment",
    "base_payment",
    "total_cost",
    "total_paid",
    "cost_percentage",
    "insurance_total_cost",
];

/// Schedule columns in display order; payment_date is skipped when absent.
const SCHEDULE_COLUMNS: [&str; 7] = [
    "month",
    "payment_date",
    "opening_balance",
    "principal_portion",
    "interest_portion",
    "insurance_portion",
    "total_due",
];

/// Format output as tables with localized labels and grouped numbers.
pub fn print_table(lang: Language, value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    let Some(result) = map.get("result") else {
        print_fields(lang, value);
        return;
    };

    let has_summary = result.get("summary").is_some();
    if let Some(summary) = result.get("summary") {
        print_summary(lang, summary);
    }

    // Either the full analysis (result.schedule) or the schedule alone
    let schedule = if result.get("rows").is_some() {
        Some(result)
    } else {
        result.get("schedule")
    };
    if let Some(schedule) = schedule {
        if has_summary {
            println!();
        }
        print_schedule(lang, schedule);
    }

    if !has_summary && schedule.is_none() {
        print_fields(lang, result);
    }

    print_trailer(lang, map);
}

fn print_summary(lang: Language, summary: &Value) {
    let mut builder = Builder::default();
    builder.push_record([
        i18n::label(lang, keys::FIELD_COLUMN),
        i18n::label(lang, keys::VALUE_COLUMN),
    ]);

    for field in SUMMARY_FIELDS {
        let Some(val) = summary.get(field) else {
            continue;
        };
        let label = i18n::field_label(lang, field).unwrap_or(field);
        let formatted = if field == "cost_percentage" {
            format!("{} %", format_amount(val))
        } else {
            format_amount(val)
        };
        builder.push_record([label, formatted.as_str()]);
    }

    println!("{}", Table::from(builder));
}

fn print_schedule(lang: Language, schedule: &Value) {
    let Some(rows) = schedule.get("rows").and_then(Value::as_array) else {
        return;
    };
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let with_dates = rows
        .first()
        .map(|r| r.get("payment_date").is_some())
        .unwrap_or(false);
    let columns: Vec<&str> = SCHEDULE_COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != "payment_date" || with_dates)
        .collect();

    let mut builder = Builder::default();
    builder.push_record(
        columns
            .iter()
            .copied()
            .map(|c| i18n::field_label(lang, c).unwrap_or(c)),
    );

    for row in rows {
        builder.push_record(columns.iter().map(|c| match *c {
            "month" | "payment_date" => raw_value(row.get(*c)),
            _ => row.get(*c).map(format_amount).unwrap_or_default(),
        }));
    }

    // Trailing totals row: month labelled, opening balance left blank
    if let Some(totals) = schedule.get("totals") {
        builder.push_record(columns.iter().map(|c| match *c {
            "month" => i18n::label(lang, keys::TOTAL_ROW).to_string(),
            "payment_date" | "opening_balance" => String::new(),
            _ => totals.get(*c).map(format_amount).unwrap_or_default(),
        }));
    }

    println!("{}", Table::from(builder));
}

fn print_fields(lang: Language, value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record([
        i18n::label(lang, keys::FIELD_COLUMN),
        i18n::label(lang, keys::VALUE_COLUMN),
    ]);
    for (key, val) in map {
        let label = i18n::field_label(lang, key).unwrap_or(key.as_str());
        builder.push_record([label.to_string(), raw_value(Some(val))]);
    }
    println!("{}", Table::from(builder));
}

fn print_trailer(lang: Language, envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}:", i18n::label(lang, keys::WARNINGS_HEADING));
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\n{}: {}", i18n::label(lang, keys::METHODOLOGY_HEADING), meth);
    }
}

/// Currency-style rendering: two decimal places, thousands grouped.
fn format_amount(value: &Value) -> String {
    let parsed = match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };
    match parsed {
        Some(d) => group_thousands(&d.round_dp(2).to_string()),
        None => raw_value(Some(value)),
    }
}

/// Insert thousands separators into a plain decimal string.
fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn raw_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("30000.00"), "30,000.00");
        assert_eq!(group_thousands("584.87"), "584.87");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("-1425.00"), "-1,425.00");
        assert_eq!(group_thousands("57"), "57");
    }

    #[test]
    fn test_format_amount_rounds_to_cents() {
        let v = Value::String("584.8706128960207".into());
        assert_eq!(format_amount(&v), "584.87");
        let v = Value::String("33337.624935".into());
        assert_eq!(format_amount(&v), "33,337.62");
    }
}
