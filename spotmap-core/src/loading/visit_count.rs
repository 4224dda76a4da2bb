//! Visitor counts published as localized magnitude strings

use serde_json::Value;

/// Ten-thousand unit marker
const WAN: char = '萬';
/// "person-times" suffix
const COUNT_SUFFIX: &str = "人次";

/// Parses strings like `"965萬7875人次"` into `9_657_875`.
///
/// Digits before the first `萬` count in ten-thousands and digits up to the
/// next `萬` are added as-is; without the marker every digit in the string is read as one
/// number. Anything without digits, including `None`, is zero.
pub fn parse_visit_count(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let cleaned = raw.replace(COUNT_SUFFIX, "");
    let cleaned = cleaned.trim();

    match cleaned.split_once(WAN) {
        Some((wan, rest)) => digits_value(wan)
            .saturating_mul(10_000)
            .saturating_add(digits_value(rest.split(WAN).next().unwrap_or_default())),
        None => digits_value(cleaned),
    }
}

/// Visitor count from whatever JSON value the source used
pub fn visit_count_from_json(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => parse_visit_count(Some(s)),
        Some(Value::Number(n)) => parse_visit_count(Some(&n.to_string())),
        _ => 0,
    }
}

/// Concatenates the decimal digits of `s` into one number, saturating
fn digits_value(s: &str) -> u64 {
    s.chars()
        .filter_map(decimal_digit)
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(d))
}

/// ASCII and full-width digits
fn decimal_digit(c: char) -> Option<u64> {
    match c {
        '0'..='9' => c.to_digit(10).map(u64::from),
        '０'..='９' => Some(u64::from(c as u32 - '０' as u32)),
        _ => None,
    }
}
