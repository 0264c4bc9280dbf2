use std::str::FromStr;

use rust_decimal::Decimal;

use crate::declare::QuoteError;

/// Decoration characters some feeds attach to numeric fields.
const NUMBER_ESCAPE_CHAR: &[char] = &['₺', '%', ' ', '"'];

/// Parses a locale-formatted decimal value from a given string.
///
/// The feed delivers numbers as text with a comma as the decimal separator
/// (e.g. "12,34"); plain dot-separated input is accepted as well. The input
/// is cleaned of decoration characters, a single leading `+` is dropped and
/// the first comma is rewritten to a dot before the strict parse.
///
/// # Returns
///
/// * `Result<Decimal, QuoteError>`: The parsed value, or
///   `QuoteError::InvalidNumericFormat` carrying the original string when the
///   normalized text is not a valid decimal literal.
pub fn parse_decimal(s: &str) -> Result<Decimal, QuoteError> {
    let cleaned = normalize_decimal(s);

    Decimal::from_str(&cleaned).map_err(|_| QuoteError::InvalidNumericFormat(s.to_string()))
}

/// Rewrites a locale-formatted numeric string into a plain decimal literal.
fn normalize_decimal(s: &str) -> String {
    let cleaned = clean_escape_chars(s);
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);

    // 只置換第一個逗號，"1,234,56" 這類多逗號輸入視為格式錯誤
    cleaned.replacen(',', ".", 1)
}

/// Removes the known decoration characters from a numeric string.
fn clean_escape_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !NUMBER_ESCAPE_CHAR.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_decimal_comma_separator() {
        assert_eq!(parse_decimal("12,34").unwrap(), dec!(12.34));
        assert_eq!(parse_decimal("0,05").unwrap(), dec!(0.05));
        assert_eq!(parse_decimal("1250").unwrap(), dec!(1250));
    }

    #[test]
    fn test_parse_decimal_dot_separator() {
        assert_eq!(parse_decimal("12.34").unwrap(), dec!(12.34));
    }

    #[test]
    fn test_parse_decimal_signs() {
        assert_eq!(parse_decimal("-3,5").unwrap(), dec!(-3.5));
        assert_eq!(parse_decimal("+2,75").unwrap(), dec!(2.75));
    }

    #[test]
    fn test_parse_decimal_decorated() {
        assert_eq!(parse_decimal("%1,07").unwrap(), dec!(1.07));
        assert_eq!(parse_decimal("₺325,50").unwrap(), dec!(325.50));
        assert_eq!(parse_decimal(" 42,0 ").unwrap(), dec!(42.0));
    }

    #[test]
    fn test_parse_decimal_invalid() {
        for raw in ["abc", "", "12,34,56", "--1", "12a"] {
            match parse_decimal(raw) {
                Err(QuoteError::InvalidNumericFormat(original)) => assert_eq!(original, raw),
                other => panic!("expected InvalidNumericFormat for {:?}, got {:?}", raw, other),
            }
        }
    }
}
