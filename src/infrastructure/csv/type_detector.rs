// ============================================================
// TYPE DETECTOR
// ============================================================
// Classify a single sample value into a semantic type

use super::date_parser::parse_datetime;
use crate::domain::csv::SemanticType;

/// Classify one textual value.
///
/// Epoch values look like plain integers and always come back as
/// `Integer`; `Timestamp` is never produced here.
pub fn detect(value: &str) -> SemanticType {
    if is_numeric(value) {
        if is_integer_form(value) {
            return SemanticType::Integer;
        }
        return SemanticType::Real;
    }

    if parse_datetime(value).is_some() {
        return SemanticType::Date;
    }

    SemanticType::Text
}

/// Parses as a finite-looking float and contains at least one digit,
/// which keeps `inf` and `NaN` out. Surrounding whitespace is not
/// accepted, matching what coercion will parse.
fn is_numeric(value: &str) -> bool {
    if !value.bytes().any(|b| b.is_ascii_digit()) {
        return false;
    }
    value.parse::<f64>().is_ok()
}

/// Optional sign followed by digits only: no fraction, no exponent
fn is_integer_form(value: &str) -> bool {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
