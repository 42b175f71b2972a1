//! Configuration errors reported by the limiter.
//!
//! Errors only surface from construction, parameter updates and
//! [`LimiterEngine::prepare`](crate::LimiterEngine::prepare). The per-sample
//! path never fails: misuse there is a caller bug, not a runtime condition.

use crate::params::MAX_CHANNELS;

/// Invalid limiter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimiterError {
    /// Threshold must be finite and in `(0, 1]`.
    InvalidThreshold(f32),
    /// Attack or release coefficient must be finite and in `[0, 1]`.
    InvalidCoefficient(f32),
    /// Attack or release time must be finite and `>= 0` milliseconds.
    InvalidTime(f32),
    /// Delay length must be in `1..=capacity` and capacity in
    /// `1..=MAX_BUFFER_CAPACITY`.
    InvalidDelay {
        /// Requested ring buffer capacity in samples.
        capacity: usize,
        /// Requested delay length in samples.
        delay_length: usize,
    },
    /// Channel count must be in `1..=MAX_CHANNELS`.
    InvalidChannelCount(usize),
    /// Sample rate must be finite and positive.
    InvalidSampleRate(f32),
}

impl core::fmt::Display for LimiterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidThreshold(t) => write!(f, "threshold {t} outside (0, 1]"),
            Self::InvalidCoefficient(c) => write!(f, "smoothing coefficient {c} outside [0, 1]"),
            Self::InvalidTime(ms) => write!(f, "smoothing time {ms} ms must be >= 0"),
            Self::InvalidDelay {
                capacity,
                delay_length,
            } => write!(
                f,
                "delay length {delay_length} invalid for buffer capacity {capacity}"
            ),
            Self::InvalidChannelCount(n) => write!(f, "channel count {n} outside 1..={MAX_CHANNELS}"),
            Self::InvalidSampleRate(sr) => write!(f, "sample rate {sr} must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LimiterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LimiterError::InvalidThreshold(0.0).to_string(),
            "threshold 0 outside (0, 1]"
        );
        assert_eq!(
            LimiterError::InvalidDelay {
                capacity: 4,
                delay_length: 8
            }
            .to_string(),
            "delay length 8 invalid for buffer capacity 4"
        );
        assert_eq!(
            LimiterError::InvalidChannelCount(0).to_string(),
            "channel count 0 outside 1..=64"
        );
    }
}
