//! Level conversions and numeric helpers shared by the limiter.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`flush_denormal`] - Snap tiny recursion state to zero
//! - [`time_to_coefficient`] - One-pole smoothing weight from a time constant

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use brickwall_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below 1e-10 are floored there, so silence reads as -200 dB
/// instead of negative infinity.
///
/// # Example
/// ```rust
/// use brickwall_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Flush values below 1e-20 to zero.
///
/// The envelope decays geometrically toward zero during silence and would
/// otherwise drift into the subnormal range, where arithmetic is slow on
/// most FPUs.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert a time constant to a one-pole smoothing weight.
///
/// The limiter's recursions weight the *new* value by the coefficient
/// (`y = (1 - c) * y + c * x`), so a larger coefficient means a faster
/// response:
///
/// ```text
/// c = 1 - exp(-1 / (time_ms * sample_rate / 1000))
/// ```
///
/// A time constant shorter than one sample snaps to `1.0` (instant).
#[inline]
pub fn time_to_coefficient(time_ms: f32, sample_rate: f32) -> f32 {
    let tau = time_ms * sample_rate / 1000.0;
    if tau < 1.0 {
        1.0
    } else {
        1.0 - expf(-1.0 / tau)
    }
}
