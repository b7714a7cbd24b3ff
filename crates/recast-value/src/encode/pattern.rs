//! Decimal-format-style number patterns.
//!
//! Supports the common subset of the classic pattern grammar: `0` forces
//! a digit, `#` allows one, `.` separates the fraction, and a `,` in the
//! integer part sets the grouping interval. Examples:
//!
//! - `",###"` renders 1234567 as `1,234,567`
//! - `"0,000.00"` renders 12345.6789 as `12,345.68`
//! - `"0.###"` renders 2.5 as `2.5` and 2.0 as `2`

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberPattern {
    grouping: Option<usize>,
    min_int_digits: usize,
    min_frac_digits: usize,
    max_frac_digits: usize,
}

impl NumberPattern {
    /// Parse a pattern. Returns None for an empty or malformed pattern,
    /// in which case the caller falls back to the natural rendering.
    fn parse(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        let (int_part, frac_part) = match pattern.split_once('.') {
            Some((i, f)) => (i, f),
            None => (pattern, ""),
        };
        if int_part.chars().any(|c| !matches!(c, '0' | '#' | ','))
            || frac_part.chars().any(|c| !matches!(c, '0' | '#'))
        {
            return None;
        }
        let grouping = int_part
            .rfind(',')
            .map(|i| int_part.len() - i - 1)
            .filter(|g| *g > 0);
        Some(Self {
            grouping,
            min_int_digits: int_part.chars().filter(|c| *c == '0').count(),
            min_frac_digits: frac_part.chars().filter(|c| *c == '0').count(),
            max_frac_digits: frac_part.chars().filter(|c| matches!(c, '0' | '#')).count(),
        })
    }

    /// Assemble from pre-rounded digit strings.
    fn assemble(&self, negative: bool, int_digits: &str, frac_digits: &str) -> String {
        let mut int_digits = int_digits.to_owned();
        while int_digits.len() < self.min_int_digits {
            int_digits.insert(0, '0');
        }

        if let Some(group) = self.grouping {
            let digits: Vec<char> = int_digits.chars().collect();
            let mut grouped = String::with_capacity(digits.len() + digits.len() / group);
            for (i, c) in digits.iter().enumerate() {
                if i > 0 && (digits.len() - i) % group == 0 {
                    grouped.push(',');
                }
                grouped.push(*c);
            }
            int_digits = grouped;
        }

        let mut frac_digits = frac_digits.to_owned();
        while frac_digits.len() > self.min_frac_digits && frac_digits.ends_with('0') {
            frac_digits.pop();
        }
        while frac_digits.len() < self.min_frac_digits {
            frac_digits.push('0');
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&int_digits);
        if !frac_digits.is_empty() {
            out.push('.');
            out.push_str(&frac_digits);
        }
        out
    }
}

/// Format an integer with a pattern; falls back to plain rendering when
/// the pattern does not parse.
#[must_use]
pub fn format_i64(pattern: &str, value: i64) -> String {
    let Some(p) = NumberPattern::parse(pattern) else {
        return value.to_string();
    };
    let digits = value.unsigned_abs().to_string();
    p.assemble(value < 0, &digits, "")
}

/// Format a float with a pattern; falls back to plain rendering when the
/// pattern does not parse.
#[must_use]
pub fn format_f64(pattern: &str, value: f64) -> String {
    let Some(p) = NumberPattern::parse(pattern) else {
        return value.to_string();
    };
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.*}", p.max_frac_digits, value.abs());
    let (int_digits, frac_digits) = match rounded.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rounded.as_str(), ""),
    };
    p.assemble(value.is_sign_negative(), int_digits, frac_digits)
}

/// Format a decimal with a pattern; falls back to plain rendering when
/// the pattern does not parse.
#[must_use]
pub fn format_decimal(pattern: &str, value: &Decimal) -> String {
    let Some(p) = NumberPattern::parse(pattern) else {
        return value.to_string();
    };
    let rounded = value.abs().round_dp(p.max_frac_digits as u32);
    let text = rounded.to_string();
    let (int_digits, frac_digits) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };
    p.assemble(value.is_sign_negative(), int_digits, frac_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_i64(",###", 1_234_567), "1,234,567");
        assert_eq!(format_i64(",###", 12), "12");
        assert_eq!(format_i64(",###", -1_234), "-1,234");
    }

    #[test]
    fn test_min_digits_and_rounding() {
        assert_eq!(format_f64("0,000.00", 12345.6789), "12,345.68");
        assert_eq!(format_f64("0000", 42.0), "0042");
        assert_eq!(format_f64("0.00", 2.0), "2.00");
    }

    #[test]
    fn test_optional_fraction() {
        assert_eq!(format_f64("0.###", 2.5), "2.5");
        assert_eq!(format_f64("0.###", 2.0), "2");
        assert_eq!(format_f64("0.#", 2.55), "2.5");
    }

    #[test]
    fn test_decimal() {
        let d: Decimal = "12345.675".parse().unwrap();
        assert_eq!(format_decimal("0.00", &d), "12345.68");
        assert_eq!(format_decimal(",##0.0", &d), "12,345.7");
    }

    #[test]
    fn test_malformed_pattern_falls_back() {
        assert_eq!(format_i64("abc", 7), "7");
        assert_eq!(format_f64("", 2.5), "2.5");
    }
}
