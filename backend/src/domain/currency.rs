//! Currency text handling for the fixation form.
//!
//! Amounts are typed as Brazilian Real values: `.` groups thousands and `,`
//! separates the cents. The form masks keystrokes through
//! [`format_currency_input`] and reads values back through
//! [`parse_currency_to_number`]. Neither function fails: text that cannot be
//! read as an amount becomes an empty string or `0.0`.

const DECIMAL_SEPARATOR: char = ',';
const THOUSANDS_SEPARATOR: char = '.';
const CURRENCY_SYMBOL: &str = "R$";

/// Mask raw keystrokes as a two-decimal amount.
///
/// Every digit in `raw` is kept and the result is read as a whole number of
/// cents, so `"5555"` becomes `"55,55"` and `"0"` becomes `"0,00"`. Text
/// without any digit yields an empty string.
pub fn format_currency_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }

    let significant = digits.trim_start_matches('0');
    let cents = if significant.is_empty() { "0" } else { significant };
    format_cents_digits(cents)
}

/// Read a formatted amount back into a number.
///
/// With a comma present the comma is the decimal separator and every dot is a
/// thousands separator. Without a comma, a dot followed by exactly two
/// trailing digits is the decimal point and any other dot groups thousands.
/// Returns `0.0` for anything that does not start with a number.
pub fn parse_currency_to_number(formatted: &str) -> f64 {
    let cleaned: String = formatted
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = if cleaned.contains(DECIMAL_SEPARATOR) {
        cleaned
            .replace(THOUSANDS_SEPARATOR, "")
            .replace(DECIMAL_SEPARATOR, ".")
    } else if has_two_digit_fraction(&cleaned) {
        match cleaned.rfind(THOUSANDS_SEPARATOR) {
            Some(pos) => {
                let integer = cleaned[..pos].replace(THOUSANDS_SEPARATOR, "");
                format!("{}.{}", integer, &cleaned[pos + 1..])
            }
            None => cleaned,
        }
    } else {
        cleaned.replace(THOUSANDS_SEPARATOR, "")
    };

    parse_leading_number(&normalized).unwrap_or(0.0)
}

/// Render an amount as `1.234,56`.
pub fn format_decimal(amount: f64) -> String {
    if !amount.is_finite() {
        return "0,00".to_string();
    }

    let cents = (amount.abs() * 100.0).round();
    let formatted = format_cents_digits(&format!("{:.0}", cents));
    if amount < 0.0 && cents > 0.0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Render an amount as `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let formatted = format_decimal(amount);
    match formatted.strip_prefix('-') {
        Some(positive) => format!("-{} {}", CURRENCY_SYMBOL, positive),
        None => format!("{} {}", CURRENCY_SYMBOL, formatted),
    }
}

/// Lay out a string of cent digits (no leading zeros apart from a lone "0")
/// as grouped reais plus two cent digits.
fn format_cents_digits(cents: &str) -> String {
    let padded = format!("{:0>3}", cents);
    let (reais, centavos) = padded.split_at(padded.len() - 2);
    format!("{}{}{}", group_thousands(reais), DECIMAL_SEPARATOR, centavos)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}

fn has_two_digit_fraction(text: &str) -> bool {
    match text.rfind(THOUSANDS_SEPARATOR) {
        Some(pos) => {
            let fraction = &text[pos + 1..];
            fraction.len() == 2 && fraction.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Parse the longest numeric prefix (`-?digits(.digits)?`) of `text`.
fn parse_leading_number(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in text.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    let prefix = text[..end].trim_end_matches('.');
    prefix
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_input_reads_digits_as_cents() {
        assert_eq!(format_currency_input("5555"), "55,55");
        assert_eq!(format_currency_input("5"), "0,05");
        assert_eq!(format_currency_input("123456789"), "1.234.567,89");
        assert_eq!(format_currency_input("R$ 1.000,00"), "1.000,00");
    }

    #[test]
    fn test_format_currency_input_edge_cases() {
        assert_eq!(format_currency_input(""), "");
        assert_eq!(format_currency_input("abc"), "");
        assert_eq!(format_currency_input("0"), "0,00");
        assert_eq!(format_currency_input("000"), "0,00");
        assert_eq!(format_currency_input("0012"), "0,12");
    }

    #[test]
    fn test_format_currency_input_handles_very_long_input() {
        let raw = "9".repeat(60);
        let formatted = format_currency_input(&raw);
        assert!(formatted.ends_with(",99"));
        assert!(formatted.contains('.'));
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(parse_currency_to_number("1.234,56"), 1234.56);
        assert_eq!(parse_currency_to_number("R$ 1.234,56"), 1234.56);
        assert_eq!(parse_currency_to_number("55,55"), 55.55);
        assert_eq!(parse_currency_to_number("0,00"), 0.0);
    }

    #[test]
    fn test_parse_without_comma() {
        assert_eq!(parse_currency_to_number("1234.56"), 1234.56);
        assert_eq!(parse_currency_to_number("1.234"), 1234.0);
        assert_eq!(parse_currency_to_number("1.234.567"), 1_234_567.0);
        assert_eq!(parse_currency_to_number("1.234.56"), 1234.56);
        assert_eq!(parse_currency_to_number("3000"), 3000.0);
    }

    #[test]
    fn test_parse_never_fails() {
        assert_eq!(parse_currency_to_number(""), 0.0);
        assert_eq!(parse_currency_to_number("abc"), 0.0);
        assert_eq!(parse_currency_to_number("R$"), 0.0);
        assert_eq!(parse_currency_to_number(",,,"), 0.0);
        assert_eq!(parse_currency_to_number("-"), 0.0);
        assert_eq!(parse_currency_to_number("12abc"), 12.0);
        assert_eq!(parse_currency_to_number("\u{a0}R$\u{a0}10,00"), 10.0);
    }

    #[test]
    fn test_format_then_parse() {
        let formatted = format_currency_input("1000000");
        assert_eq!(formatted, "10.000,00");
        assert_eq!(parse_currency_to_number(&formatted), 10_000.0);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(2000.0), "R$ 2.000,00");
        assert_eq!(format_brl(0.5), "R$ 0,50");
        assert_eq!(format_brl(-1234.567), "-R$ 1.234,57");
        assert_eq!(format_decimal(f64::NAN), "0,00");
        assert_eq!(format_decimal(-0.001), "0,00");
    }
}
