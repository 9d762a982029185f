// Display formatting shared by the overview and spreading screens.
//
// Numbers follow fixed en-US conventions: comma thousands separators, dot
// decimal point, `$` prefix for currency.

use chrono::NaiveDate;

use crate::spreading::CellValue;

/// Whole-dollar currency, e.g. `$1,235` or `-$40`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude.is_infinite() {
        return format!("{}$∞", sign);
    }

    let rounded = magnitude.round();
    // -0.4 rounds to zero and prints without a sign
    let sign = if rounded == 0.0 { "" } else { sign };
    format!("{}${}", sign, group_thousands(&format!("{:.0}", rounded)))
}

/// Grouped number with up to three fraction digits, e.g. `1,234.5`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
    }

    let fixed = to_fixed(value.abs(), 3);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (fixed.clone(), String::new()),
    };

    let mut out = String::new();
    let is_zero = int_part == "0" && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// What a grid cell shows when it is not being edited.
///
/// Blank stays blank and an explicit zero shows as `0`.
pub fn display_cell(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) if *n == 0.0 => "0".to_string(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(_) => {
            let amount = value.amount();
            if amount == 0.0 {
                "0".to_string()
            } else {
                format_number(amount)
            }
        }
    }
}

/// Buffer text when a cell is re-edited: the full stored amount, ungrouped.
///
/// Unlike `display_cell` nothing is rounded away, so trimming the last digit
/// of `1234.5678` leaves `1234.567`.
pub fn edit_text(value: &CellValue) -> String {
    let amount = match value {
        CellValue::Empty => return String::new(),
        CellValue::Number(n) if n.is_nan() => 0.0,
        CellValue::Number(n) => *n,
        CellValue::Text(_) => value.amount(),
    };

    if amount.is_infinite() {
        return if amount < 0.0 { "-Infinity".to_string() } else { "Infinity".to_string() };
    }
    amount.to_string()
}

/// Removes thousands separators before an edited value is reparsed.
pub fn strip_separators(input: &str) -> String {
    input.replace(',', "")
}

/// Fixed-point rendering that rounds half away from zero.
///
/// Rounds the exact decimal value of the double, so `3.0 / 40.0` (stored as
/// 0.07499999...) gives `0.07` rather than being pushed up to the half.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    // Twenty guard digits sit well below the spacing of neighbouring doubles
    let exact = format!("{:.*}", digits + 20, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');

    let mut kept: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
    if round_up {
        increment_digits(&mut kept);
    }

    let split = kept.len() - digits;
    let whole = String::from_utf8_lossy(&kept[..split]).into_owned();
    let fraction = String::from_utf8_lossy(&kept[split..]).into_owned();

    let is_zero = kept.iter().all(|d| *d == b'0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if digits == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, fraction)
    }
}

/// Add one to the last digit of an ASCII digit string, carrying leftwards.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{} KB", to_fixed(bytes as f64 / KB as f64, 1))
    } else {
        format!("{} MB", to_fixed(bytes as f64 / MB as f64, 1))
    }
}

/// `January 15, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Jan 15, 2024`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(1234.5), "$1,235");
        assert_eq!(format_currency(2_500_000.0), "$2,500,000");
        assert_eq!(format_currency(-1234.4), "-$1,234");
        assert_eq!(format_currency(-0.4), "$0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1234.0), "1,234");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-98765.4321), "-98,765.432");
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(0.0004), "0");
    }

    #[test]
    fn test_display_cell_distinguishes_blank_and_zero() {
        assert_eq!(display_cell(&CellValue::Empty), "");
        assert_eq!(display_cell(&CellValue::Number(0.0)), "0");
        assert_eq!(display_cell(&CellValue::Number(45000.0)), "45,000");
        assert_eq!(display_cell(&CellValue::Text("1200".to_string())), "1,200");
        assert_eq!(display_cell(&CellValue::Text("abc".to_string())), "0");
    }

    #[test]
    fn test_edit_text_keeps_every_digit() {
        assert_eq!(edit_text(&CellValue::Empty), "");
        assert_eq!(edit_text(&CellValue::Number(1234.5678)), "1234.5678");
        assert_eq!(edit_text(&CellValue::Number(1_250_000.0)), "1250000");
        assert_eq!(edit_text(&CellValue::Number(-0.25)), "-0.25");
        assert_eq!(edit_text(&CellValue::Text("1,000".to_string())), "1");
        assert_eq!(edit_text(&CellValue::Number(f64::INFINITY)), "Infinity");
    }

    #[test]
    fn test_strip_separators() {
        assert_eq!(strip_separators("1,234,567.5"), "1234567.5");
        assert_eq!(strip_separators(""), "");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.5, 2), "1.50");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
        assert_eq!(to_fixed(25.0, 1), "25.0");
        assert_eq!(to_fixed(-0.001, 1), "0.0");
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.96, 1), "1.0");
    }

    #[test]
    fn test_to_fixed_rounds_the_stored_value() {
        // 3/40 and 123/200 are stored just below the half
        assert_eq!(to_fixed(3.0 / 40.0, 2), "0.07");
        assert_eq!(to_fixed(123.0 / 200.0, 2), "0.61");
        assert_eq!(to_fixed(3.0 / 200.0, 2), "0.01");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(-1.005, 2), "-1.00");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_long_date(date), "January 5, 2024");
        assert_eq!(format_short_date(date), "Jan 5, 2024");
    }
}
