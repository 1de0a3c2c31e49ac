use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. A schedule becomes one record per month
/// plus a trailing totals record; anything else becomes field,value records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Either the full analysis (result.schedule) or the schedule alone
    let schedule = if result.get("rows").is_some() {
        Some(result)
    } else {
        result.get("schedule")
    };

    if let Some(schedule) = schedule {
        write_schedule_csv(&mut wtr, schedule);
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(result)]);
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, schedule: &Value) {
    let Some(rows) = schedule.get("rows").and_then(Value::as_array) else {
        return;
    };

    // Headers from the first row; the totals record reuses them, with the
    // month column marked and per-month-only columns left blank
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }

    if let Some(Value::Object(totals)) = schedule.get("totals") {
        let record: Vec<String> = headers
            .iter()
            .map(|h| match totals.get(*h) {
                Some(val) => format_csv_value(val),
                None if *h == "month" => "total".to_string(),
                None => String::new(),
            })
            .collect();
        let _ = wtr.write_record(&record);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
