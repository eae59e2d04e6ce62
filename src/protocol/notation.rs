//! Concise uncertainty notation, `X.Y(Z)`.
//!
//! `Z` counts units of the last decimal place written in `X`, so `1.25(3)`
//! means `1.25 ± 0.03` and `12(2)` means `12 ± 2`. The result is the support
//! of the matching uniform distribution.

use crate::error::{DistError, Result};

/// Parse `X.Y(Z)` into `(min, max)`.
pub fn parse_uncertainty(text: &str) -> Result<(f64, f64)> {
    let invalid = || DistError::configuration(format!("invalid value '{text}': expected the form 'X.Y(Z)'"));

    let text = text.trim();
    let (value_str, rest) = text.split_once('(').ok_or_else(invalid)?;
    let uncertainty_str = rest.strip_suffix(')').ok_or_else(invalid)?;

    let digits = value_str.trim_start_matches(['+', '-']);
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }
    if uncertainty_str.is_empty() || !all_digits(uncertainty_str) {
        return Err(invalid());
    }

    let value: f64 = value_str.parse().map_err(|_| invalid())?;
    let uncertainty: u64 = uncertainty_str.parse().map_err(|_| invalid())?;
    let order = -(frac_part.len() as i32);

    let half_width = uncertainty as f64 * 10f64.powi(order);
    Ok((value - half_width, value + half_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-12 && (a.1 - b.1).abs() < 1e-12
    }

    #[test]
    fn last_decimal_place_sets_the_scale() {
        assert!(close(parse_uncertainty("1.25(3)").unwrap(), (1.22, 1.28)));
        assert!(close(parse_uncertainty("12(2)").unwrap(), (10.0, 14.0)));
        assert!(close(parse_uncertainty("0.500(25)").unwrap(), (0.475, 0.525)));
        assert!(close(parse_uncertainty("-3.0(5)").unwrap(), (-3.5, -2.5)));
    }

    #[test]
    fn zero_uncertainty_is_a_point() {
        assert_eq!(parse_uncertainty("2.0(0)").unwrap(), (2.0, 2.0));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for bad in ["1.25", "1.25(3", "(3)", "1.2.3(1)", "1.25(x)", "1.25()", "1e3(2)", "1.0(1)x"] {
            assert!(
                matches!(parse_uncertainty(bad), Err(DistError::Configuration(_))),
                "accepted {bad}"
            );
        }
    }
}
