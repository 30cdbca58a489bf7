//! Number rendering for stack labels.

/// Renders a value the way the calculator page displays numbers.
///
/// Integral values print without a fractional part, non-finite values print as
/// `Infinity`, `-Infinity` or `NaN`, and magnitudes outside `[1e-6, 1e21)` switch to
/// exponent form with an explicit exponent sign (`1e+21`, `1.5e-7`).
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return exponent_form(value);
    }
    format!("{}", value)
}

fn exponent_form(value: f64) -> String {
    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => raw,
    }
}
