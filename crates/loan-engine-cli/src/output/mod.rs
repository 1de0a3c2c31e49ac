pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::i18n::Language;
use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter. Only the table formatter
/// localizes labels; json, csv and minimal keep raw field names and values
/// for machine consumption.
pub fn format_output(format: &OutputFormat, lang: Language, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(lang, value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
