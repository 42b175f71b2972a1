//! Unit-aware parameter values.
//!
//! Config files may write a value as a bare number or as a string with a
//! unit suffix. Each limiter option accepts a different set of units:
//!
//! | Option | Accepted |
//! |--------|----------|
//! | `threshold` | `0.8`, `"80%"`, `"-1.9dB"` |
//! | `attack` / `release` | `0.9` (coefficient), `"90%"`, `"2ms"`, `"0.15s"` |
//! | `lookahead` | `48` (samples), `"1ms"`, `"0.001s"` |

use std::fmt;

use brickwall_core::{Smoothing, db_to_linear};
use serde::{Deserialize, Serialize};

/// A config value as written: a bare number or a string with a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    /// Bare TOML number.
    Number(f64),
    /// String, possibly with a unit suffix.
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A parsed value with its unit resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    /// Unitless number; percentages are divided by 100, dB converted to linear.
    Scalar(f32),
    /// Duration in milliseconds.
    Millis(f32),
}

/// Parse a value string into a [`Quantity`].
///
/// Supports:
/// - Plain numbers: "0.5", "-0.3"
/// - Percentages: "50%" (divided by 100)
/// - Decibels: "-6dB", "+3dB" (converted to linear gain)
/// - Milliseconds: "100ms"
/// - Seconds: "1.5s" (converted to milliseconds)
pub fn parse_quantity(value: &str) -> Option<Quantity> {
    let value = value.trim();

    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f32>().ok().map(|v| Quantity::Scalar(v / 100.0));
    }

    if let Some(db) = value
        .strip_suffix("dB")
        .or_else(|| value.strip_suffix("db"))
    {
        return db
            .trim()
            .parse::<f32>()
            .ok()
            .map(|v| Quantity::Scalar(db_to_linear(v)));
    }

    if let Some(ms) = value.strip_suffix("ms") {
        return ms.trim().parse::<f32>().ok().map(Quantity::Millis);
    }

    if let Some(s) = value.strip_suffix('s') {
        return s.trim().parse::<f32>().ok().map(|v| Quantity::Millis(v * 1000.0));
    }

    value.parse::<f32>().ok().map(Quantity::Scalar)
}

impl ParamValue {
    /// Resolve to a [`Quantity`], `None` if the text does not parse.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            Self::Number(n) => Some(Quantity::Scalar(*n as f32)),
            Self::Text(s) => parse_quantity(s),
        }
    }

    /// Read as a linear threshold. Durations are rejected.
    pub fn as_threshold(&self) -> Option<f32> {
        match self.quantity()? {
            Quantity::Scalar(v) => Some(v),
            Quantity::Millis(_) => None,
        }
    }

    /// Read as a ballistic: scalars are coefficients, durations time constants.
    pub fn as_smoothing(&self) -> Option<Smoothing> {
        Some(match self.quantity()? {
            Quantity::Scalar(c) => Smoothing::Coefficient(c),
            Quantity::Millis(ms) => Smoothing::TimeMs(ms),
        })
    }

    /// Read as a sample count; durations are rounded at `sample_rate`.
    ///
    /// Scalars must be non-negative whole numbers.
    pub fn as_samples(&self, sample_rate: f32) -> Option<usize> {
        match self.quantity()? {
            Quantity::Scalar(n) if n >= 0.0 && n.fract() == 0.0 && n.is_finite() => {
                Some(n as usize)
            }
            Quantity::Scalar(_) => None,
            Quantity::Millis(ms) if ms >= 0.0 && ms.is_finite() => {
                Some((ms * sample_rate / 1000.0).round() as usize)
            }
            Quantity::Millis(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_quantity("0.5"), Some(Quantity::Scalar(0.5)));
        assert_eq!(parse_quantity("-0.3"), Some(Quantity::Scalar(-0.3)));
        assert_eq!(parse_quantity("  0.5  "), Some(Quantity::Scalar(0.5)));
        assert_eq!(parse_quantity("loud"), None);
    }

    #[test]
    fn test_parse_percentages() {
        assert_eq!(parse_quantity("50%"), Some(Quantity::Scalar(0.5)));
        assert_eq!(parse_quantity("100%"), Some(Quantity::Scalar(1.0)));
    }

    #[test]
    fn test_parse_decibels() {
        let Some(Quantity::Scalar(v)) = parse_quantity("-6dB") else {
            panic!("expected scalar");
        };
        assert!((v - 0.501).abs() < 0.001);

        let Some(Quantity::Scalar(v)) = parse_quantity("0db") else {
            panic!("expected scalar");
        };
        assert!((v - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_quantity("100ms"), Some(Quantity::Millis(100.0)));
        assert_eq!(parse_quantity("1.5s"), Some(Quantity::Millis(1500.0)));
        assert_eq!(parse_quantity("2 ms"), Some(Quantity::Millis(2.0)));
    }

    #[test]
    fn test_threshold_rejects_time() {
        assert_eq!(ParamValue::from("5ms").as_threshold(), None);
        assert_eq!(ParamValue::from(0.8).as_threshold(), Some(0.8));
    }

    #[test]
    fn test_smoothing() {
        assert_eq!(
            ParamValue::from(0.9).as_smoothing(),
            Some(Smoothing::Coefficient(0.9))
        );
        assert_eq!(
            ParamValue::from("150ms").as_smoothing(),
            Some(Smoothing::TimeMs(150.0))
        );
    }

    #[test]
    fn test_samples() {
        assert_eq!(ParamValue::from(48.0).as_samples(48000.0), Some(48));
        assert_eq!(ParamValue::from("1ms").as_samples(48000.0), Some(48));
        assert_eq!(ParamValue::from("1ms").as_samples(44100.0), Some(44));
        assert_eq!(ParamValue::from(1.5).as_samples(48000.0), None);
        assert_eq!(ParamValue::from(-1.0).as_samples(48000.0), None);
    }
}
