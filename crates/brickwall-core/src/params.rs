//! Limiter parameters and their validation.
//!
//! Parameters are validated when they are set, never in the audio path.
//! Time-based ballistics are kept symbolic until the sample rate is known and
//! resolved to coefficients by [`LimiterEngine::prepare`](crate::LimiterEngine::prepare).
//!
//! # Parameters
//!
//! | Parameter | Range | Default | Description |
//! |-----------|-------|---------|-------------|
//! | Threshold | (0, 1] | 0.8 | Ceiling amplitude the gain targets |
//! | Attack | [0, 1] or ms | 0.9 | Speed toward more attenuation |
//! | Release | [0, 1] or ms | 0.01 | Speed toward less attenuation |
//! | Link | linked / independent | linked | Shared or per-channel gain |

use crate::LimiterError;
use crate::math::{db_to_linear, time_to_coefficient};

/// Default ceiling amplitude.
pub const DEFAULT_THRESHOLD: f32 = 0.8;
/// Default attack coefficient.
pub const DEFAULT_ATTACK_COEFF: f32 = 0.9;
/// Default release coefficient.
pub const DEFAULT_RELEASE_COEFF: f32 = 0.01;
/// Default lookahead in samples.
pub const DEFAULT_DELAY_LENGTH: usize = 1;
/// Default ring buffer capacity in samples.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10;
/// Largest ring buffer a delay line will allocate, in samples (~21.8 s at 48 kHz).
pub const MAX_BUFFER_CAPACITY: usize = 1 << 20;
/// Largest channel count [`LimiterEngine::prepare`](crate::LimiterEngine::prepare) accepts.
pub const MAX_CHANNELS: usize = 64;

/// How an attack or release ballistic is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// One-pole weight on the new value, in `[0, 1]`. Larger is faster;
    /// `0` freezes the tracked value, `1` follows instantly.
    Coefficient(f32),
    /// Time constant in milliseconds, converted with the stream's sample rate.
    TimeMs(f32),
}

impl Smoothing {
    /// Check the value is usable without knowing the sample rate.
    pub fn validate(self) -> Result<Self, LimiterError> {
        match self {
            Self::Coefficient(c) if c.is_finite() && (0.0..=1.0).contains(&c) => Ok(self),
            Self::Coefficient(c) => Err(LimiterError::InvalidCoefficient(c)),
            Self::TimeMs(ms) if ms.is_finite() && ms >= 0.0 => Ok(self),
            Self::TimeMs(ms) => Err(LimiterError::InvalidTime(ms)),
        }
    }

    /// Resolve to a coefficient at the given sample rate.
    pub fn coefficient(self, sample_rate: f32) -> f32 {
        match self {
            Self::Coefficient(c) => c,
            Self::TimeMs(ms) => time_to_coefficient(ms, sample_rate),
        }
    }
}

/// How gain is shared across channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelLink {
    /// One follower driven by channel 0; its gain is applied to every channel.
    #[default]
    Linked,
    /// Each channel drives and receives its own gain.
    Independent,
}

/// Limiter configuration supplied by the host.
///
/// # Example
///
/// ```rust
/// use brickwall_core::{ChannelLink, LimiterParams, Smoothing};
///
/// let params = LimiterParams::default()
///     .with_threshold_db(-1.0)
///     .with_attack(Smoothing::TimeMs(0.5))
///     .with_release(Smoothing::TimeMs(80.0))
///     .with_link(ChannelLink::Independent);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterParams {
    /// Ceiling amplitude in `(0, 1]`.
    pub threshold: f32,
    /// Ballistic applied while the tracked level rises.
    pub attack: Smoothing,
    /// Ballistic applied while the tracked level falls.
    pub release: Smoothing,
    /// Channel linking mode, applied at the next `prepare`.
    pub link: ChannelLink,
}

impl Default for LimiterParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            attack: Smoothing::Coefficient(DEFAULT_ATTACK_COEFF),
            release: Smoothing::Coefficient(DEFAULT_RELEASE_COEFF),
            link: ChannelLink::Linked,
        }
    }
}

impl LimiterParams {
    /// Set the ceiling as a linear amplitude.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the ceiling in dBFS.
    pub fn with_threshold_db(mut self, db: f32) -> Self {
        self.threshold = db_to_linear(db);
        self
    }

    /// Set the attack ballistic.
    pub fn with_attack(mut self, attack: Smoothing) -> Self {
        self.attack = attack;
        self
    }

    /// Set the release ballistic.
    pub fn with_release(mut self, release: Smoothing) -> Self {
        self.release = release;
        self
    }

    /// Set the channel linking mode.
    pub fn with_link(mut self, link: ChannelLink) -> Self {
        self.link = link;
        self
    }

    /// Reject thresholds outside `(0, 1]` and unusable ballistics.
    ///
    /// Nothing is clamped: a bad host value is reported, not hidden.
    pub fn validate(&self) -> Result<(), LimiterError> {
        validate_threshold(self.threshold)?;
        self.attack.validate()?;
        self.release.validate()?;
        Ok(())
    }
}

/// Check a threshold lies in `(0, 1]`.
pub fn validate_threshold(threshold: f32) -> Result<f32, LimiterError> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(LimiterError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = LimiterParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.threshold, 0.8);
        assert_eq!(params.attack, Smoothing::Coefficient(0.9));
        assert_eq!(params.release, Smoothing::Coefficient(0.01));
        assert_eq!(params.link, ChannelLink::Linked);
    }

    #[test]
    fn test_threshold_bounds() {
        for bad in [0.0, -0.5, 1.01, f32::NAN, f32::INFINITY] {
            let params = LimiterParams::default().with_threshold(bad);
            assert!(
                matches!(params.validate(), Err(LimiterError::InvalidThreshold(_))),
                "threshold {bad} should be rejected"
            );
        }
        assert!(LimiterParams::default().with_threshold(1.0).validate().is_ok());
        assert!(LimiterParams::default().with_threshold(1e-6).validate().is_ok());
    }

    #[test]
    fn test_coefficient_bounds() {
        assert!(Smoothing::Coefficient(0.0).validate().is_ok());
        assert!(Smoothing::Coefficient(1.0).validate().is_ok());
        assert_eq!(
            Smoothing::Coefficient(1.5).validate(),
            Err(LimiterError::InvalidCoefficient(1.5))
        );
        assert!(Smoothing::Coefficient(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_time_bounds() {
        assert!(Smoothing::TimeMs(0.0).validate().is_ok());
        assert_eq!(
            Smoothing::TimeMs(-1.0).validate(),
            Err(LimiterError::InvalidTime(-1.0))
        );
        assert!(Smoothing::TimeMs(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_resolve_coefficient() {
        assert_eq!(Smoothing::Coefficient(0.25).coefficient(48000.0), 0.25);
        let fast = Smoothing::TimeMs(1.0).coefficient(48000.0);
        let slow = Smoothing::TimeMs(100.0).coefficient(48000.0);
        assert!(fast > slow);
        assert!(slow > 0.0 && fast < 1.0);
    }

    #[test]
    fn test_threshold_db() {
        let params = LimiterParams::default().with_threshold_db(-6.0206);
        assert!((params.threshold - 0.5).abs() < 1e-3);
        // +dB pushes the ceiling above full scale
        assert!(LimiterParams::default().with_threshold_db(3.0).validate().is_err());
    }
}
