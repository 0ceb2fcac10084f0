// ============================================================
// VALUE COERCER
// ============================================================
// Raw cell text -> typed value for the column's declared type.
// Never fails: anything that does not parse is kept as the raw text.

use crate::domain::csv::{CellValue, SemanticType};
use crate::infrastructure::csv::parse_datetime;

/// Coerce `raw` to `column_type`, or to text when no type is known.
pub fn coerce(raw: &str, column_type: Option<SemanticType>) -> CellValue {
    let Some(column_type) = column_type else {
        return CellValue::Text(raw.to_string());
    };

    match column_type {
        SemanticType::Date => match parse_datetime(raw) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Text(raw.to_string()),
        },
        SemanticType::Timestamp | SemanticType::Integer => match raw.parse::<i64>() {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Text(raw.to_string()),
        },
        SemanticType::Real => match raw.parse::<f64>() {
            Ok(v) => CellValue::Real(v),
            Err(_) => CellValue::Text(raw.to_string()),
        },
        SemanticType::Text => CellValue::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::type_detector::detect;
    use chrono::NaiveDate;

    #[test]
    fn test_integer_round_trip() {
        assert_eq!(coerce("42", Some(SemanticType::Integer)), CellValue::Integer(42));
        assert_eq!(
            coerce("-9223372036854775808", Some(SemanticType::Integer)),
            CellValue::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_real_round_trip() {
        assert_eq!(coerce("1.5", Some(SemanticType::Real)), CellValue::Real(1.5));
        assert_eq!(coerce("3", Some(SemanticType::Real)), CellValue::Real(3.0));
        assert_eq!(coerce("2.5e3", Some(SemanticType::Real)), CellValue::Real(2500.0));
    }

    #[test]
    fn test_timestamp_is_integer_epoch() {
        assert_eq!(
            coerce("1577923200", Some(SemanticType::Timestamp)),
            CellValue::Integer(1_577_923_200)
        );
    }

    #[test]
    fn test_date_parses() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            coerce("2020-01-02", Some(SemanticType::Date)),
            CellValue::DateTime(expected)
        );
    }

    #[test]
    fn test_two_digit_year_date_is_not_misread() {
        let expected = NaiveDate::from_ymd_opt(2006, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            coerce("1/2/06", Some(SemanticType::Date)),
            CellValue::DateTime(expected)
        );
    }

    #[test]
    fn test_agrees_with_detection_on_padded_numbers() {
        let ty = detect(" 5");
        assert_eq!(ty, SemanticType::Text);
        assert_eq!(coerce(" 5", Some(ty)), CellValue::Text(" 5".to_string()));
        assert_eq!(
            coerce(" 5", Some(SemanticType::Integer)),
            CellValue::Text(" 5".to_string())
        );
    }

    #[test]
    fn test_failures_fall_back_to_raw_text() {
        assert_eq!(
            coerce("abc", Some(SemanticType::Integer)),
            CellValue::Text("abc".to_string())
        );
        assert_eq!(
            coerce("1.5", Some(SemanticType::Integer)),
            CellValue::Text("1.5".to_string())
        );
        assert_eq!(
            coerce("99999999999999999999", Some(SemanticType::Timestamp)),
            CellValue::Text("99999999999999999999".to_string())
        );
        assert_eq!(
            coerce("", Some(SemanticType::Real)),
            CellValue::Text(String::new())
        );
        assert_eq!(
            coerce("not a date", Some(SemanticType::Date)),
            CellValue::Text("not a date".to_string())
        );
    }

    #[test]
    fn test_text_and_unknown_pass_through() {
        assert_eq!(
            coerce(" 12 ", Some(SemanticType::Text)),
            CellValue::Text(" 12 ".to_string())
        );
        assert_eq!(coerce("7", None), CellValue::Text("7".to_string()));
    }

    #[test]
    fn test_is_total_over_awkward_inputs() {
        let inputs = ["", " ", "\u{0}", "💥", "--1", "1e", "NaN", "2020-02-30", "\"quoted\""];
        let types = [
            SemanticType::Integer,
            SemanticType::Real,
            SemanticType::Text,
            SemanticType::Date,
            SemanticType::Timestamp,
        ];
        for input in inputs {
            for ty in types {
                let _ = coerce(input, Some(ty));
            }
        }
    }
}
