//! Envelope follower and smoothed gain for peak limiting.
//!
//! Two cascaded one-pole smoothers, both with asymmetric ballistics:
//!
//! ```text
//! c   = |x| > env ? attack : release
//! env = (1 - c) * env + c * |x|
//!
//! target = env == 0 ? 1 : min(1, threshold / env)
//!
//! c    = gain > target ? attack : release
//! gain = (1 - c) * gain + c * target
//! ```
//!
//! The envelope rises quickly on transients and falls slowly afterwards. The
//! gain then chases `threshold / env`, dropping quickly when more reduction is
//! needed and recovering slowly so the limiter does not pump.

use crate::math::flush_denormal;

/// Resolved attack/release weights, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Weight on the new value while the tracked level rises.
    pub attack: f32,
    /// Weight on the new value while the tracked level falls.
    pub release: f32,
}

/// Envelope and gain state for one detector.
///
/// # Example
///
/// ```rust
/// use brickwall_core::{Coefficients, GainTracker};
///
/// let coeffs = Coefficients { attack: 0.9, release: 0.01 };
/// let mut tracker = GainTracker::new();
///
/// let gain = tracker.next_gain(1.0, 0.8, coeffs);
/// assert!((tracker.envelope() - 0.9).abs() < 1e-6);
/// assert!((gain - 0.9).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainTracker {
    /// Running peak estimate of |input|
    envelope: f32,
    /// Smoothed output multiplier
    gain: f32,
}

impl GainTracker {
    /// Silent envelope, unity gain.
    pub const fn new() -> Self {
        Self {
            envelope: 0.0,
            gain: 1.0,
        }
    }

    /// Feed one input amplitude and return the updated gain.
    ///
    /// `amplitude` is expected to be `|x|`.
    #[inline]
    pub fn next_gain(&mut self, amplitude: f32, threshold: f32, coeffs: Coefficients) -> f32 {
        let c = if amplitude > self.envelope {
            coeffs.attack
        } else {
            coeffs.release
        };
        self.envelope = flush_denormal((1.0 - c) * self.envelope + c * amplitude);

        let target = target_gain(self.envelope, threshold);

        let c = if self.gain > target {
            coeffs.attack
        } else {
            coeffs.release
        };
        self.gain = flush_denormal((1.0 - c) * self.gain + c * target);
        self.gain
    }

    /// Current envelope level.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Current gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Back to silent envelope and unity gain.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GainTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Gain that would bring `envelope` down to `threshold`, never above unity.
///
/// A silent envelope needs no reduction; this also keeps a zero division out
/// of the recursion, where a NaN would stick for the rest of the stream.
#[inline]
pub fn target_gain(envelope: f32, threshold: f32) -> f32 {
    if envelope == 0.0 {
        1.0
    } else {
        (threshold / envelope).min(1.0)
    }
}
