//! Lookahead peak limiter engine.
//!
//! Holds one [`DelayLine`] per channel and one or more [`GainTracker`]s. For
//! every sample position the tracker is updated from the *current* input
//! amplitude, and the resulting gain scales the *delayed* sample coming out of
//! each channel's delay line. The delay gives the follower `delay_length`
//! samples to react before a transient reaches the output.
//!
//! # Algorithm
//!
//! For each sample index `i`:
//!
//! 1. `amplitude = |x[0][i]|` (linked) or `|x[c][i]|` (independent)
//! 2. Envelope: one-pole toward `amplitude`, attack weight when rising,
//!    release weight when falling
//! 3. Target gain: `min(1, threshold / envelope)`, unity for a silent envelope
//! 4. Gain: one-pole toward the target, attack weight when reducing,
//!    release weight when recovering
//! 5. Per channel: `y = gain * delay.read()`, then `delay.write(x)`,
//!    `delay.advance()`
//!
//! # Stereo Linking
//!
//! With [`ChannelLink::Linked`] a single tracker listens to channel 0 only and
//! its gain is applied to every channel. This keeps the image stable but
//! ignores peaks that occur on the other channels alone.
//! [`ChannelLink::Independent`] gives each channel its own tracker.
//!
//! # Threading
//!
//! `prepare` and `process` take `&mut self` and are not reentrant. The host
//! must call them from one thread, in stream order, never overlapping.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use libm::fabsf;

use crate::envelope::{Coefficients, GainTracker};
use crate::math::linear_to_db;
use crate::params::{ChannelLink, LimiterParams, MAX_CHANNELS, Smoothing, validate_threshold};
use crate::{DelayLine, LimiterError};

/// Multichannel lookahead limiter.
///
/// # Example
///
/// ```rust
/// use brickwall_core::{LimiterEngine, LimiterParams, Smoothing};
///
/// let params = LimiterParams::default()
///     .with_threshold(0.5)
///     .with_attack(Smoothing::TimeMs(0.1))
///     .with_release(Smoothing::TimeMs(50.0));
/// let mut limiter = LimiterEngine::new(params).unwrap();
/// limiter.prepare(2, 48, 64, 48000.0).unwrap();
///
/// let mut left = vec![0.9_f32; 4800];
/// let mut right = vec![-0.9_f32; 4800];
/// limiter.process(&mut [&mut left[..], &mut right[..]]);
///
/// assert_eq!(limiter.latency_samples(), 48);
/// assert!(left[4799].abs() < 0.55);
/// ```
#[derive(Debug, Clone)]
pub struct LimiterEngine {
    params: LimiterParams,
    /// Attack/release resolved for `sample_rate`
    coeffs: Coefficients,
    /// Zero until the first successful `prepare`
    sample_rate: f32,
    /// Link mode the trackers were laid out for at `prepare`
    link: ChannelLink,
    lines: Vec<DelayLine>,
    /// One entry when linked, one per channel when independent
    trackers: Vec<GainTracker>,
}

impl LimiterEngine {
    /// Create an unprepared limiter.
    ///
    /// [`prepare`](Self::prepare) must run before audio is processed.
    pub fn new(params: LimiterParams) -> Result<Self, LimiterError> {
        params.validate()?;
        Ok(Self::unprepared(params))
    }

    /// Unprepared engine for already validated `params`.
    fn unprepared(params: LimiterParams) -> Self {
        let mut engine = Self {
            params,
            coeffs: Coefficients {
                attack: 0.0,
                release: 0.0,
            },
            sample_rate: 0.0,
            link: params.link,
            lines: Vec::new(),
            trackers: Vec::new(),
        };
        engine.resolve_coefficients();
        engine
    }

    /// (Re)build the per-channel state for a new stream configuration.
    ///
    /// Allocates `channels` delay lines of `buffer_capacity` samples with a
    /// lookahead of `delay_length`, resets the envelope to 0 and the gain to
    /// unity, and resolves time-based ballistics for `sample_rate`.
    ///
    /// `channels` is limited to [`MAX_CHANNELS`] and `buffer_capacity` to
    /// [`MAX_BUFFER_CAPACITY`](crate::MAX_BUFFER_CAPACITY); nothing is
    /// allocated for requests beyond them.
    ///
    /// On error nothing is changed: a previously prepared engine stays
    /// prepared with its old configuration.
    pub fn prepare(
        &mut self,
        channels: usize,
        delay_length: usize,
        buffer_capacity: usize,
        sample_rate: f32,
    ) -> Result<(), LimiterError> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(LimiterError::InvalidChannelCount(channels));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(LimiterError::InvalidSampleRate(sample_rate));
        }
        let lines = (0..channels)
            .map(|_| DelayLine::new(buffer_capacity, delay_length))
            .collect::<Result<Vec<_>, _>>()?;

        let tracker_count = match self.params.link {
            ChannelLink::Linked => 1,
            ChannelLink::Independent => channels,
        };

        self.lines = lines;
        self.trackers = vec![GainTracker::new(); tracker_count];
        self.link = self.params.link;
        self.sample_rate = sample_rate;
        self.resolve_coefficients();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            channels,
            delay_length,
            buffer_capacity,
            sample_rate,
            link = ?self.link,
            attack = self.coeffs.attack,
            release = self.coeffs.release,
            "limiter prepared"
        );

        Ok(())
    }

    /// Limit one block in place.
    ///
    /// `buffer` holds one slice per channel, all of the same length. Samples
    /// are processed in order; state carries over to the next call.
    ///
    /// The channel count should match the one given to
    /// [`prepare`](Self::prepare). Surplus channels are silenced and missing
    /// channels are skipped, so their delay lines stop advancing. Before the
    /// first `prepare` the buffer is left untouched.
    pub fn process<C: AsMut<[f32]>>(&mut self, buffer: &mut [C]) {
        if self.lines.is_empty() {
            return;
        }

        let active = buffer.len().min(self.lines.len());
        let (buffer, surplus) = buffer.split_at_mut(active);
        for channel in surplus.iter_mut() {
            channel.as_mut().fill(0.0);
        }
        if buffer.is_empty() {
            return;
        }

        let frames = buffer
            .iter_mut()
            .map(|channel| channel.as_mut().len())
            .min()
            .unwrap_or(0);
        debug_assert!(
            buffer.iter_mut().all(|channel| channel.as_mut().len() == frames),
            "channel buffers differ in length"
        );

        let threshold = self.params.threshold;
        let coeffs = self.coeffs;

        match self.link {
            ChannelLink::Linked => {
                let tracker = &mut self.trackers[0];
                for i in 0..frames {
                    let amplitude = fabsf(buffer[0].as_mut()[i]);
                    let gain = tracker.next_gain(amplitude, threshold, coeffs);

                    for (channel, line) in buffer.iter_mut().zip(self.lines.iter_mut()) {
                        let sample = &mut channel.as_mut()[i];
                        let delayed = line.read();
                        line.write(*sample);
                        line.advance();
                        *sample = gain * delayed;
                    }
                }
            }
            ChannelLink::Independent => {
                for i in 0..frames {
                    let lanes = buffer
                        .iter_mut()
                        .zip(self.lines.iter_mut())
                        .zip(self.trackers.iter_mut());
                    for ((channel, line), tracker) in lanes {
                        let sample = &mut channel.as_mut()[i];
                        let gain = tracker.next_gain(fabsf(*sample), threshold, coeffs);
                        let delayed = line.read();
                        line.write(*sample);
                        line.advance();
                        *sample = gain * delayed;
                    }
                }
            }
        }
    }

    /// Zero all delay lines and return to silent envelope and unity gain.
    ///
    /// Keeps the prepared configuration and does not allocate.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        for tracker in &mut self.trackers {
            tracker.reset();
        }
    }

    /// Replace all parameters.
    ///
    /// Threshold and ballistics take effect on the next sample; delay and
    /// envelope state are kept. A new [`ChannelLink`] only takes effect at the
    /// next [`prepare`](Self::prepare).
    pub fn set_params(&mut self, params: LimiterParams) -> Result<(), LimiterError> {
        params.validate()?;
        self.params = params;
        self.resolve_coefficients();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            threshold = params.threshold,
            attack = self.coeffs.attack,
            release = self.coeffs.release,
            "limiter params updated"
        );

        Ok(())
    }

    /// Set the ceiling amplitude, in `(0, 1]`.
    pub fn set_threshold(&mut self, threshold: f32) -> Result<(), LimiterError> {
        self.params.threshold = validate_threshold(threshold)?;
        Ok(())
    }

    /// Set the attack ballistic.
    pub fn set_attack(&mut self, attack: Smoothing) -> Result<(), LimiterError> {
        self.params.attack = attack.validate()?;
        self.resolve_coefficients();
        Ok(())
    }

    /// Set the release ballistic.
    pub fn set_release(&mut self, release: Smoothing) -> Result<(), LimiterError> {
        self.params.release = release.validate()?;
        self.resolve_coefficients();
        Ok(())
    }

    fn resolve_coefficients(&mut self) {
        self.coeffs = Coefficients {
            attack: self.params.attack.coefficient(self.sample_rate),
            release: self.params.release.coefficient(self.sample_rate),
        };
    }

    /// Current parameters.
    pub fn params(&self) -> &LimiterParams {
        &self.params
    }

    /// Attack/release weights in use.
    ///
    /// Time-based ballistics only resolve to meaningful values once the
    /// engine is prepared.
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Whether [`prepare`](Self::prepare) has succeeded at least once.
    pub fn is_prepared(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of prepared channels.
    pub fn channels(&self) -> usize {
        self.lines.len()
    }

    /// Sample rate given to the last successful `prepare`, or 0.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Link mode the engine was prepared with.
    pub fn link(&self) -> ChannelLink {
        self.link
    }

    /// Lookahead latency in samples, 0 when unprepared.
    pub fn latency_samples(&self) -> usize {
        self.lines.first().map_or(0, DelayLine::delay_length)
    }

    /// Current gain of the linked tracker, or of channel 0 when independent.
    pub fn gain(&self) -> f32 {
        self.trackers.first().map_or(1.0, GainTracker::gain)
    }

    /// Current envelope of the linked tracker, or of channel 0 when independent.
    pub fn envelope(&self) -> f32 {
        self.trackers.first().map_or(0.0, GainTracker::envelope)
    }

    /// Gain applied to `channel`, `None` if the channel was not prepared.
    pub fn channel_gain(&self, channel: usize) -> Option<f32> {
        if channel >= self.lines.len() {
            return None;
        }
        match self.link {
            ChannelLink::Linked => self.trackers.first().map(GainTracker::gain),
            ChannelLink::Independent => self.trackers.get(channel).map(GainTracker::gain),
        }
    }

    /// Current gain reduction in dB (0 = none, negative = attenuating).
    pub fn gain_reduction_db(&self) -> f32 {
        linear_to_db(self.gain())
    }
}

impl Default for LimiterEngine {
    fn default() -> Self {
        Self::unprepared(LimiterParams::default())
    }
}
