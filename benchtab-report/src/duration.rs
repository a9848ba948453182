//! Duration Formatting
//!
//! Compact rendering of nanosecond estimates, e.g. `10.5 ns`, `2.13 ms`, `1,234 s`.
//!
//! Values are shown with three significant digits in the largest unit that
//! keeps them below 1000, following `printf`'s alternate-form `%#.3g`:
//! trailing zeros are kept (`10.0 ns`), and magnitudes that would need a
//! fourth integer digit switch to scientific notation (`1.00e+03 ns`).
//! Runs of more than 1000 seconds are printed as whole, comma-grouped seconds.

const NS_PER_US: f64 = 1e3;
const NS_PER_MS: f64 = 1e6;
const NS_PER_S: f64 = 1e9;

const SIGNIFICANT_DIGITS: usize = 3;

/// Format a nanosecond duration for display
///
/// # Examples
///
/// ```
/// # use benchtab_report::format_ns;
/// assert_eq!(format_ns(10.0), "10.0 ns");
/// assert_eq!(format_ns(100_002.0), "100 us");
/// assert_eq!(format_ns(2_126_000.0), "2.13 ms");
/// assert_eq!(format_ns(12_340_000_000.0), "12.3 s");
/// ```
pub fn format_ns(ns: f64) -> String {
    if !ns.is_finite() {
        return format!("{} ns", ns);
    }

    if ns < NS_PER_US {
        return with_unit(&format_significant(ns), "ns");
    }
    if ns < NS_PER_MS {
        return with_unit(&format_significant(ns / NS_PER_US), "us");
    }
    if ns < NS_PER_S {
        return with_unit(&format_significant(ns / NS_PER_MS), "ms");
    }

    let s = ns / NS_PER_S;
    if s > 1000.0 {
        format!("{} s", group_thousands(s.round_ties_even() as u64))
    } else {
        with_unit(&format_significant(s), "s")
    }
}

/// Join digits and unit; a bare trailing decimal point (`"100."`) is dropped.
fn with_unit(digits: &str, unit: &str) -> String {
    // One space, never two: tables expect `"100 us"`, not `"100  us"`
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    format!("{} {}", digits, unit)
}

/// Render `value` with [`SIGNIFICANT_DIGITS`] significant digits, `%#.3g` style
fn format_significant(value: f64) -> String {
    if value == 0.0 {
        return format!("{:.*}", SIGNIFICANT_DIGITS - 1, 0.0);
    }

    // Rounding to the requested precision first tells us the decimal
    // exponent of the *rounded* value (999.7 becomes 1.00e3, not 9.99e2).
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
    }

    let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
    let mut fixed = format!("{:.*}", decimals, value);
    if decimals == 0 {
        fixed.push('.');
    }
    fixed
}

/// `1234567` -> `"1,234,567"`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(format_ns(10.0), "10.0 ns");
        assert_eq!(format_ns(10.5), "10.5 ns");
        assert_eq!(format_ns(100_002.0), "100 us");
        assert_eq!(format_ns(2.126e6), "2.13 ms");
        assert_eq!(format_ns(1.234e10), "12.3 s");
    }

    #[test]
    fn test_nanoseconds_three_significant_digits() {
        assert_eq!(format_ns(0.0), "0.00 ns");
        assert_eq!(format_ns(1.0), "1.00 ns");
        assert_eq!(format_ns(1.234), "1.23 ns");
        assert_eq!(format_ns(0.5), "0.500 ns");
        assert_eq!(format_ns(123.4), "123 ns");
        assert_eq!(format_ns(999.0), "999 ns");

        for i in 0..1000 {
            let v = 1.0 + i as f64 * 0.999;
            let out = format_ns(v);
            assert!(out.ends_with(" ns"), "{v} -> {out}");
            let digits: String = out.chars().filter(|c| c.is_ascii_digit()).collect();
            assert_eq!(digits.len(), 3, "{v} -> {out}");
        }
    }

    #[test]
    fn test_scientific_fallback() {
        // Rounds up to a fourth integer digit
        assert_eq!(format_ns(999.7), "1.00e+03 ns");
        assert_eq!(format_ns(999_999.0), "1.00e+03 us");
        assert_eq!(format_ns(0.00001), "1.00e-05 ns");
        assert_eq!(format_ns(0.0001234), "0.000123 ns");
    }

    #[test]
    fn test_unit_boundaries() {
        assert!(format_ns(999.4).ends_with(" ns"));
        assert_eq!(format_ns(1e3), "1.00 us");
        assert!(format_ns(999_000.0).ends_with(" us"));
        assert_eq!(format_ns(1e6), "1.00 ms");
        assert!(format_ns(999_000_000.0).ends_with(" ms"));
        assert_eq!(format_ns(1e9), "1.00 s");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(format_ns(5e9), "5.00 s");
        assert_eq!(format_ns(500e9), "500 s");
        assert_eq!(format_ns(1000e9), "1.00e+03 s");
        assert_eq!(format_ns(1001e9), "1,001 s");
        // Ties round to even
        assert_eq!(format_ns(1234.5e9), "1,234 s");
        assert_eq!(format_ns(1235.5e9), "1,236 s");
        assert_eq!(format_ns(1_234_567e9), "1,234,567 s");
    }

    #[test]
    fn test_idempotent() {
        for v in [0.0, 3.3, 45_678.9, 2.126e6, 7.5e12] {
            assert_eq!(format_ns(v), format_ns(v));
        }
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_ns(f64::INFINITY), "inf ns");
        assert_eq!(format_ns(f64::NAN), "NaN ns");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}
