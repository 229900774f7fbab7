use std::{fmt, str::FromStr};

use serde::Deserialize;

/// What the graph builder does with a connection whose weight text cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightPolicy {
    /// Keep the connection with weight `0.0`. This makes the link free to
    /// traverse and can silently bend shortest paths through it.
    #[default]
    Zero,
    /// Leave the connection out of the graph.
    Skip,
    /// Fail the whole build.
    Reject,
}

impl FromStr for WeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(WeightPolicy::Zero),
            "skip" => Ok(WeightPolicy::Skip),
            "reject" => Ok(WeightPolicy::Reject),
            other => Err(format!(
                "invalid weight policy: {other} (expected zero, skip or reject)"
            )),
        }
    }
}

impl fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightPolicy::Zero => "zero",
            WeightPolicy::Skip => "skip",
            WeightPolicy::Reject => "reject",
        })
    }
}

/// Parses an English-locale decimal the way stored connection weights are written.
///
/// Accepts an optional sign, digits with optional `,` grouping separators and
/// an optional `.` fraction. Parsing stops at the first character that cannot
/// continue the number, so `"2.5m"` reads as `2.5`. Returns `None` when no
/// digit is found.
pub fn parse_weight(text: &str) -> Option<f64> {
    let text = text.trim();
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut digits = String::with_capacity(body.len());
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in body.chars() {
        match c {
            '0'..='9' => {
                digits.push(c);
                seen_digit = true;
            }
            // grouping separators only make sense in the integer part
            ',' if !seen_point && seen_digit => {}
            '.' if !seen_point => {
                digits.push('.');
                seen_point = true;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    if digits.ends_with('.') {
        digits.pop();
    }
    if digits.starts_with('.') {
        digits.insert(0, '0');
    }

    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimals() {
        assert_eq!(parse_weight("2"), Some(2.0));
        assert_eq!(parse_weight("3.25"), Some(3.25));
        assert_eq!(parse_weight("0.5"), Some(0.5));
        assert_eq!(parse_weight(".5"), Some(0.5));
        assert_eq!(parse_weight("7."), Some(7.0));
    }

    #[test]
    fn test_signs_and_whitespace() {
        assert_eq!(parse_weight("-1.5"), Some(-1.5));
        assert_eq!(parse_weight("+4"), Some(4.0));
        assert_eq!(parse_weight("  12.0 "), Some(12.0));
    }

    #[test]
    fn test_grouping_separators() {
        assert_eq!(parse_weight("1,250.5"), Some(1250.5));
        assert_eq!(parse_weight("1,000,000"), Some(1_000_000.0));
    }

    #[test]
    fn test_longest_valid_prefix() {
        assert_eq!(parse_weight("2.5m"), Some(2.5));
        assert_eq!(parse_weight("10 meters"), Some(10.0));
        assert_eq!(parse_weight("1.2.3"), Some(1.2));
        assert_eq!(parse_weight("4,5"), Some(45.0));
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("abc"), None);
        assert_eq!(parse_weight("-"), None);
        assert_eq!(parse_weight("."), None);
        assert_eq!(parse_weight(",5"), None);
        assert_eq!(parse_weight("NaN"), None);
    }

    #[test]
    fn test_policy_from_str_and_display() {
        for policy in [WeightPolicy::Zero, WeightPolicy::Skip, WeightPolicy::Reject] {
            assert_eq!(policy.to_string().parse::<WeightPolicy>(), Ok(policy));
        }
        assert!("lenient".parse::<WeightPolicy>().is_err());
        assert_eq!(WeightPolicy::default(), WeightPolicy::Zero);
    }
}
