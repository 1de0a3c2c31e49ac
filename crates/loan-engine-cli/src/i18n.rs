//! Static label catalog for the presentation layer.
//!
//! Lookups are keyed by (language, message key); the selected language has no
//! effect on the computation itself. JSON and CSV output keep the engine's
//! field names so piped output stays machine-readable.

/// Message keys understood by the catalog.
pub mod keys {
    pub const ERROR_PREFIX: &str = "error.prefix";
    pub const TOTAL_ROW: &str = "schedule.total_row";
    pub const WARNINGS_HEADING: &str = "output.warnings";
    pub const METHODOLOGY_HEADING: &str = "output.methodology";
    pub const FIELD_COLUMN: &str = "output.field_column";
    pub const VALUE_COLUMN: &str = "output.value_column";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Fr,
    En,
}

impl Language {
    /// Pick a display language from the system locale, falling back to
    /// English for anything that is not French.
    pub fn detect() -> Self {
        match sys_locale::get_locale() {
            Some(tag) if tag.to_ascii_lowercase().starts_with("fr") => Language::Fr,
            _ => Language::En,
        }
    }
}

/// Label for a fixed UI message. Unknown keys fall back to the key itself.
pub fn label(lang: Language, key: &'static str) -> &'static str {
    use Language::{En, Fr};
    match (key, lang) {
        (keys::ERROR_PREFIX, Fr) => "erreur",
        (keys::ERROR_PREFIX, En) => "error",
        (keys::TOTAL_ROW, Fr) => "Total",
        (keys::TOTAL_ROW, En) => "Total",
        (keys::WARNINGS_HEADING, Fr) => "Avertissements",
        (keys::WARNINGS_HEADING, En) => "Warnings",
        (keys::METHODOLOGY_HEADING, Fr) => "Méthodologie",
        (keys::METHODOLOGY_HEADING, En) => "Methodology",
        (keys::FIELD_COLUMN, Fr) => "Champ",
        (keys::FIELD_COLUMN, En) => "Field",
        (keys::VALUE_COLUMN, Fr) => "Valeur",
        (keys::VALUE_COLUMN, En) => "Value",
        _ => key,
    }
}

/// Localized column or summary label for an engine field name. Returns None
/// for fields the catalog does not know, which are then shown as-is.
pub fn field_label(lang: Language, field: &str) -> Option<&'static str> {
    use Language::{En, Fr};
    let label = match (field, lang) {
        ("month", Fr) => "Mois",
        ("month", En) => "Month",
        ("payment_date", Fr) => "Date d'échéance",
        ("payment_date", En) => "Payment date",
        ("opening_balance", Fr) => "Capital restant dû en début de période",
        ("opening_balance", En) => "Remaining principal at start of period",
        ("principal_portion", Fr) => "Capital amorti",
        ("principal_portion", En) => "Principal paid",
        ("interest_portion", Fr) => "Intérêts",
        ("interest_portion", En) => "Interest",
        ("insurance_portion", Fr) => "Assurance",
        ("insurance_portion", En) => "Insurance",
        ("total_due", Fr) => "Total échéance",
        ("total_due", En) => "Total due",
        ("base_payment", Fr) => "Mensualité hors assurance",
        ("base_payment", En) => "Monthly payment excl. insurance",
        ("monthly_payment", Fr) => "Mensualité",
        ("monthly_payment", En) => "Monthly payment",
        ("total_cost", Fr) => "Coût total",
        ("total_cost", En) => "Total cost",
        ("total_paid", Fr) => "Total remboursé",
        ("total_paid", En) => "Total paid",
        ("cost_percentage", Fr) => "Coût en % du prêt",
        ("cost_percentage", En) => "Cost as % of loan",
        ("insurance_total_cost", Fr) => "Coût assurance total",
        ("insurance_total_cost", En) => "Total insurance cost",
        _ => return None,
    };
    Some(label)
}
