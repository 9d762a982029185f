// Cell values and lenient numeric parsing for the spreading grid.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One period's value for a line item.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Nothing entered yet. Distinct from zero.
    #[default]
    Empty,

    Number(f64),

    /// Raw string received from a payload; parsed whenever its amount is needed.
    Text(String),
}

impl CellValue {
    /// Parse what the user typed into a cell.
    ///
    /// Empty input stays empty; anything that does not start with a number
    /// becomes zero.
    pub fn from_input(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Number(parse_lenient(raw))
        }
    }

    /// Amount used in totals. Blank counts as zero.
    pub fn amount(&self) -> f64 {
        match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) if n.is_nan() => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Text(s) if s.is_empty() => 0.0,
            CellValue::Text(s) => parse_lenient(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Parse the longest numeric prefix of `raw`, falling back to zero.
///
/// Leading whitespace is skipped, so `" 12abc"` is 12 and `"1e3"` is 1000.
/// `Infinity` with an optional sign is accepted. NaN never escapes.
pub fn parse_lenient(raw: &str) -> f64 {
    parse_float_prefix(raw)
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = CellValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, a string, or null")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
                Ok(CellValue::Number(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
                Ok(CellValue::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
                Ok(CellValue::Number(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
                if v.is_empty() {
                    Ok(CellValue::Empty)
                } else {
                    Ok(CellValue::Text(v.to_string()))
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Empty)
            }

            fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Empty)
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_keeps_blank() {
        assert_eq!(CellValue::from_input(""), CellValue::Empty);
        assert_eq!(CellValue::from_input("0"), CellValue::Number(0.0));
        assert_eq!(CellValue::from_input("1500.25"), CellValue::Number(1500.25));
    }

    #[test]
    fn test_from_input_malformed_becomes_zero() {
        assert_eq!(CellValue::from_input("abc"), CellValue::Number(0.0));
        assert_eq!(CellValue::from_input("-"), CellValue::Number(0.0));
        assert_eq!(CellValue::from_input("."), CellValue::Number(0.0));
        assert_eq!(CellValue::from_input("NaN"), CellValue::Number(0.0));
    }

    #[test]
    fn test_parse_lenient_prefix() {
        assert_eq!(parse_lenient("12abc"), 12.0);
        assert_eq!(parse_lenient("  42"), 42.0);
        assert_eq!(parse_lenient("-7.5x"), -7.5);
        assert_eq!(parse_lenient("1e3"), 1000.0);
        assert_eq!(parse_lenient("1e"), 1.0);
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("5."), 5.0);
        assert_eq!(parse_lenient("1.2.3"), 1.2);
        assert_eq!(parse_lenient("Infinity"), f64::INFINITY);
        assert_eq!(parse_lenient("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_amount_mixes_representations() {
        assert_eq!(CellValue::Empty.amount(), 0.0);
        assert_eq!(CellValue::Number(12.5).amount(), 12.5);
        assert_eq!(CellValue::Text("300".to_string()).amount(), 300.0);
        assert_eq!(CellValue::Text("oops".to_string()).amount(), 0.0);
    }

    #[test]
    fn test_cell_json_shape() {
        let cells: Vec<CellValue> = serde_json::from_str(r#"["", 100, "250", null, 1.5]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                CellValue::Empty,
                CellValue::Number(100.0),
                CellValue::Text("250".to_string()),
                CellValue::Empty,
                CellValue::Number(1.5),
            ]
        );

        let json = serde_json::to_string(&vec![CellValue::Empty, CellValue::Number(2.0)]).unwrap();
        assert_eq!(json, r#"["",2.0]"#);
    }
}
