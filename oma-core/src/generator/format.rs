//! Number formatting for the geometry text file.

/// Format a coordinate the way the OMA geometry files are written.
///
/// Uses the shortest decimal form that reads back to the same value, always
/// with a fractional part (`0.0`, `1.5`, `-2.25`). Magnitudes below `1e-4`
/// or from `1e16` upwards use exponent form with a signed exponent of at
/// least two digits (`1e-05`, `2.5e+16`).
pub fn format_coordinate(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }

    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn format_exponent(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain() {
        assert_eq!(format_coordinate(0.0), "0.0");
        assert_eq!(format_coordinate(1.5), "1.5");
        assert_eq!(format_coordinate(-2.25), "-2.25");
        assert_eq!(format_coordinate(100.0), "100.0");
        assert_eq!(format_coordinate(0.123457), "0.123457");
        assert_eq!(format_coordinate(0.0001), "0.0001");
        assert_eq!(format_coordinate(-0.0), "-0.0");
    }

    #[test]
    fn test_format_exponent() {
        assert_eq!(format_coordinate(0.00001), "1e-05");
        assert_eq!(format_coordinate(-1.5e-7), "-1.5e-07");
        assert_eq!(format_coordinate(1e16), "1e+16");
        assert_eq!(format_coordinate(2.5e123), "2.5e+123");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_coordinate(f64::NAN), "nan");
        assert_eq!(format_coordinate(f64::NEG_INFINITY), "-inf");
    }
}
