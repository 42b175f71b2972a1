//! Limiter configuration file format.

use std::path::Path;

use brickwall_core::{
    ChannelLink, DEFAULT_ATTACK_COEFF, DEFAULT_BUFFER_CAPACITY, DEFAULT_DELAY_LENGTH,
    DEFAULT_RELEASE_COEFF, DEFAULT_THRESHOLD, LimiterEngine, LimiterParams, MAX_BUFFER_CAPACITY,
    Smoothing,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::value::ParamValue;

/// Channel linking as written in config files.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkSetting {
    /// Channel 0 drives one gain shared by all channels.
    #[default]
    Linked,
    /// Each channel is limited on its own.
    Independent,
}

impl From<LinkSetting> for ChannelLink {
    fn from(link: LinkSetting) -> Self {
        match link {
            LinkSetting::Linked => ChannelLink::Linked,
            LinkSetting::Independent => ChannelLink::Independent,
        }
    }
}

/// Limiter settings read from a TOML file.
///
/// Every field is optional; omitted fields take the engine defaults.
///
/// # TOML Format
///
/// ```toml
/// threshold = "-1.9dB"
/// attack = 0.9
/// release = "150ms"
/// lookahead = "1ms"
/// buffer_capacity = 64
/// link = "independent"
/// ```
///
/// The channel count and sample rate belong to the audio stream, not the
/// file, and are supplied to [`build_engine`](Self::build_engine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimiterConfig {
    /// Ceiling: linear, percentage or dB.
    pub threshold: ParamValue,
    /// Attack: coefficient or time.
    pub attack: ParamValue,
    /// Release: coefficient or time.
    pub release: ParamValue,
    /// Lookahead: samples or time.
    pub lookahead: ParamValue,
    /// Ring buffer size in samples. Defaults to the larger of the lookahead
    /// and 10 samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
    /// Channel linking mode.
    pub link: LinkSetting,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            threshold: ParamValue::Number(f64::from(DEFAULT_THRESHOLD)),
            attack: ParamValue::Number(f64::from(DEFAULT_ATTACK_COEFF)),
            release: ParamValue::Number(f64::from(DEFAULT_RELEASE_COEFF)),
            lookahead: ParamValue::Number(DEFAULT_DELAY_LENGTH as f64),
            buffer_capacity: None,
            link: LinkSetting::Linked,
        }
    }
}

impl LimiterConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded limiter config");
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve the threshold, ballistics and link mode.
    ///
    /// Values are checked for units here and for range by
    /// [`LimiterParams::validate`]; nothing is clamped.
    pub fn limiter_params(&self) -> Result<LimiterParams, ConfigError> {
        let threshold = self
            .threshold
            .as_threshold()
            .ok_or_else(|| reject("threshold", &self.threshold, "expected a level"))?;
        let attack = smoothing("attack", &self.attack)?;
        let release = smoothing("release", &self.release)?;

        let params = LimiterParams {
            threshold,
            attack,
            release,
            link: self.link.into(),
        };
        params.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "limiter config out of range");
        })?;
        Ok(params)
    }

    /// Lookahead in samples at `sample_rate`, at most [`MAX_BUFFER_CAPACITY`].
    pub fn lookahead_samples(&self, sample_rate: f32) -> Result<usize, ConfigError> {
        let samples = self
            .lookahead
            .as_samples(sample_rate)
            .ok_or_else(|| reject("lookahead", &self.lookahead, "expected samples or a time"))?;
        if samples > MAX_BUFFER_CAPACITY {
            return Err(reject(
                "lookahead",
                &self.lookahead,
                "longer than the largest delay buffer",
            ));
        }
        Ok(samples)
    }

    /// Ring buffer capacity for a given lookahead.
    pub fn buffer_capacity_for(&self, lookahead: usize) -> usize {
        self.buffer_capacity
            .unwrap_or_else(|| lookahead.max(DEFAULT_BUFFER_CAPACITY))
    }

    /// Create a limiter from this configuration and prepare it for a stream.
    pub fn build_engine(
        &self,
        channels: usize,
        sample_rate: f32,
    ) -> Result<LimiterEngine, ConfigError> {
        let params = self.limiter_params()?;
        let lookahead = self.lookahead_samples(sample_rate)?;
        let capacity = self.buffer_capacity_for(lookahead);

        let mut engine = LimiterEngine::new(params)?;
        engine.prepare(channels, lookahead, capacity, sample_rate)?;
        tracing::debug!(
            channels,
            sample_rate,
            lookahead,
            capacity,
            "built limiter from config"
        );
        Ok(engine)
    }
}

fn smoothing(param: &str, value: &ParamValue) -> Result<Smoothing, ConfigError> {
    value
        .as_smoothing()
        .ok_or_else(|| reject(param, value, "expected a coefficient or a time"))
}

fn reject(param: &str, value: &ParamValue, reason: &str) -> ConfigError {
    tracing::warn!(param, %value, reason, "rejected limiter config value");
    ConfigError::invalid_parameter(param, value, reason)
}
