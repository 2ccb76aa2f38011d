//! Number formatting and parsing for the calculator display.
//!
//! Values are rendered with 12 significant digits, the way a `%.12g`
//! conversion would: fixed notation for the everyday range, exponent
//! notation only for very large or very small magnitudes.

use tracing::debug;

use super::error::CalcError;

/// Display text shown while the engine is in its error state.
pub const ERROR_MARKER: &str = "Error";

const SIGNIFICANT_DIGITS: i32 = 12;

/// Format a value for display.
///
/// Non-finite values render as [`ERROR_MARKER`]. Negative zero renders as `0`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_MARKER.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Round to the significant digits first so the exponent reflects any carry.
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Drop trailing zeros of a fractional part, and the point if nothing is left.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Parse entry text into a number.
pub fn parse_value(text: &str) -> Result<f64, CalcError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::MalformedNumericText(text.to_string()))
}

/// Parse entry text, treating anything unparseable as zero.
pub fn value_or_zero(text: &str) -> f64 {
    parse_value(text).unwrap_or_else(|err| {
        debug!("{}, using 0", err);
        0.0
    })
}
