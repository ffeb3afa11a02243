/// Reads the integer at the start of `raw`, the way a browser number field is usually parsed.
///
/// Leading whitespace and a single sign are accepted, then the longest run of digits is taken
/// and anything after it ignored. A `0x`/`0X` prefix switches to hexadecimal digits. When there
/// are no digits the result is `NaN`.
pub fn parse_int(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let (sign, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));

    match hex {
        Some(digits) => sign * leading_digits(digits, 16),
        None => sign * leading_digits(unsigned, 10),
    }
}

/// Accumulates the run of `radix` digits at the start of `s`, `NaN` if there is none.
fn leading_digits(s: &str, radix: u32) -> f64 {
    let mut digits = s.chars().map_while(|c| c.to_digit(radix)).peekable();
    if digits.peek().is_none() {
        return f64::NAN;
    }

    digits.fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integers() {
        assert_eq!(parse_int("42"), 42.0);
        assert_eq!(parse_int("-5"), -5.0);
        assert_eq!(parse_int("+7"), 7.0);
        assert_eq!(parse_int("0"), 0.0);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_int("12abc"), 12.0);
        assert_eq!(parse_int("3.9"), 3.0);
        assert_eq!(parse_int("-2.5"), -2.0);
        assert_eq!(parse_int("  8  "), 8.0);
    }

    #[test]
    fn no_digits_is_nan() {
        assert!(parse_int("").is_nan());
        assert!(parse_int("abc").is_nan());
        assert!(parse_int("-").is_nan());
        assert!(parse_int(".5").is_nan());
        assert!(parse_int("--1").is_nan());
    }

    #[test]
    fn hex_prefix() {
        assert_eq!(parse_int("0x10"), 16.0);
        assert_eq!(parse_int("-0X1f"), -31.0);
        assert_eq!(parse_int("0xAz"), 10.0);
        assert!(parse_int("0x").is_nan());
        assert!(parse_int("0xg").is_nan());
    }
}
