//! Engineering-notation value parsing and formatting.

/// Parse a value with an optional engineering suffix.
///
/// Supported suffixes (case-insensitive):
/// - `p` (pico, 1e-12)
/// - `n` (nano, 1e-9)
/// - `u` (micro, 1e-6)
/// - `m` (milli, 1e-3)
/// - `k` (kilo, 1e3)
/// - `meg` (mega, 1e6)
/// - `g` (giga, 1e9)
///
/// A bare numeric (decimal or scientific) is accepted as-is. Returns `None`
/// for malformed input or an unknown suffix.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // A plain number has no suffix; note 'e' may be part of an exponent.
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    let num_end = s
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (num_str, suffix) = s.split_at(num_end);
    let value: f64 = num_str.parse().ok()?;

    let multiplier = match suffix.to_ascii_lowercase().as_str() {
        "p" => 1e-12,
        "n" => 1e-9,
        "u" => 1e-6,
        "m" => 1e-3,
        "k" => 1e3,
        "meg" => 1e6,
        "g" => 1e9,
        _ => return None,
    };

    Some(value * multiplier)
}

/// Parse a value, mapping malformed input to zero.
///
/// This is the contract the interactive editor exposes: a string the user
/// typed either parses to its engineering value or silently to `0`.
pub fn parse_value_or_zero(s: &str) -> f64 {
    parse_value(s).unwrap_or(0.0)
}

/// Format a value with an SI prefix for display.
pub fn format_value(value: f64) -> String {
    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "Meg")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 || abs_value == 0.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else if abs_value >= 1e-12 {
        (value * 1e12, "p")
    } else {
        (value, "")
    };

    format!("{:.4}{}", scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|v| (v - b).abs() < b.abs() * 1e-10 + 1e-20)
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_value("1.5"), Some(1.5));
        assert_eq!(parse_value("-2.5"), Some(-2.5));
        assert_eq!(parse_value("1e-3"), Some(1e-3));
        assert_eq!(parse_value("  42  "), Some(42.0));
    }

    #[test]
    fn test_parse_with_suffix() {
        assert!(approx_eq(parse_value("1k"), 1e3));
        assert!(approx_eq(parse_value("4.7K"), 4.7e3));
        assert!(approx_eq(parse_value("10u"), 1e-5));
        assert!(approx_eq(parse_value("10m"), 10e-3));
        assert!(approx_eq(parse_value("10MEG"), 10e6));
        assert!(approx_eq(parse_value("2Meg"), 2e6));
        assert!(approx_eq(parse_value("100n"), 100e-9));
        assert!(approx_eq(parse_value("10p"), 10e-12));
        assert!(approx_eq(parse_value("1g"), 1e9));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("1x"), None);
        assert_eq!(parse_value_or_zero("garbage"), 0.0);
        assert_eq!(parse_value_or_zero("1k"), 1e3);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0), "1.0000k");
        assert_eq!(format_value(0.001), "1.0000m");
        assert_eq!(format_value(1e-9), "1.0000n");
        assert_eq!(format_value(2.5e6), "2.5000Meg");
        assert_eq!(format_value(0.0), "0.0000");
    }
}
