//! Locale-tolerant money parsing.
//!
//! Handles `1.234,56` and `1,234.56`, sign prefixes and suffixes (`-50`,
//! `50-`), accounting parentheses (`(50.00)`) and currency symbols anywhere
//! around the digits (`-€25.00`, `25,00 EUR`, `$(50.00)`).
//!
//! Separators are not symmetric. A lone comma followed by exactly three
//! digits is grouping (`1,234` → 1234) because US exports write thousands
//! that way, while a lone dot is always the decimal point (`1.234` → 1.234)
//! so canonical output such as `-0.125` reads back unchanged. European
//! thousands with a dot only parse as grouping when a decimal comma follows
//! (`1.234,00`) or the dot repeats (`1.234.567`).

/// Rewrite a digits-and-separators string so `str::parse::<f64>` accepts it.
fn canonical_decimal(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        // Both present: the rightmost one is the decimal point.
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(comma), None) => {
            if s.matches(',').count() > 1 {
                return s.replace(',', "");
            }
            let (before, after) = (&s[..comma], &s[comma + 1..]);
            let grouping = after.len() == 3 && before.chars().any(|c| c != '0');
            if grouping {
                s.replace(',', "")
            } else {
                s.replace(',', ".")
            }
        }
        (None, Some(_)) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}

/// Parse an amount or balance cell. Returns `None` when the cell carries no
/// digits or does not reduce to a finite number.
///
/// Zero in any spelling comes back as exactly `0.0` (never `-0.0`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_matches('"').trim();

    let first_digit = s.find(|c: char| c.is_ascii_digit())?;
    let last_digit = s.rfind(|c: char| c.is_ascii_digit())?;
    let (lead, tail) = (&s[..first_digit], &s[last_digit + 1..]);

    // Parentheses wrap the digits, not necessarily the cell: "$(50.00)".
    let parenthesized = lead.contains('(') && tail.contains(')');
    let is_minus = |c: char| c == '-' || c == '\u{2212}';
    let negative = parenthesized || lead.contains(is_minus) || s.ends_with(is_minus);

    let digits: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let value: f64 = canonical_decimal(&digits).parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let value = if negative { -value } else { value };
    Some(if value == 0.0 { 0.0 } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_european_format() {
        assert_eq!(parse_amount("-120,50"), Some(-120.5));
        assert_eq!(parse_amount("-123,45"), Some(-123.45));
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("1.234.567,89"), Some(1234567.89));
    }

    #[test]
    fn test_us_format() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("1,234"), Some(1234.0));
        assert_eq!(parse_amount("1,234,567"), Some(1234567.0));
        assert_eq!(parse_amount("0,500"), Some(0.5));
    }

    #[test]
    fn test_signs() {
        assert_eq!(parse_amount("-50"), Some(-50.0));
        assert_eq!(parse_amount("50-"), Some(-50.0));
        assert_eq!(parse_amount("+50"), Some(50.0));
        assert_eq!(parse_amount("(500.00)"), Some(-500.0));
        assert_eq!(parse_amount("\"(1,234.56)\""), Some(-1234.56));
        assert_eq!(parse_amount("$(50.00)"), Some(-50.0));
        assert_eq!(parse_amount("€(1.234,56)"), Some(-1234.56));
        assert_eq!(parse_amount("( 50.00 ) EUR"), Some(-50.0));
        assert_eq!(parse_amount("-(50)"), Some(-50.0));
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(parse_amount("-€25.00"), Some(-25.0));
        assert_eq!(parse_amount("€-25.00"), Some(-25.0));
        assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("25,00 EUR"), Some(25.0));
    }

    #[test]
    fn test_zero_is_preserved() {
        for raw in ["0", "0.00", "0,00", "-0.00", "€0"] {
            let v = parse_amount(raw).unwrap();
            assert_eq!(v, 0.0, "{raw}");
            assert!(v.is_sign_positive(), "{raw}");
        }
    }

    #[test]
    fn test_lone_dot_is_decimal_lone_comma_may_group() {
        assert_eq!(parse_amount("-1.234"), Some(-1.234));
        assert_eq!(parse_amount("-1,234"), Some(-1234.0));
        assert_eq!(parse_amount("1.234,00"), Some(1234.0));
        assert_eq!(parse_amount("1.234.567"), Some(1234567.0));
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount("1,2,3.4.5"), None);
    }
}
