//! Brickwall Core - lookahead peak limiter DSP
//!
//! This crate provides a real-time audio limiter built from two pieces:
//! a fixed-length circular delay line per channel, and a two-stage
//! envelope/gain follower that attenuates the delayed signal so it stays
//! under a configured ceiling. Nothing in the audio path allocates.
//!
//! # Core Abstractions
//!
//! - [`DelayLine`] - Fixed-capacity ring buffer with a constant read-behind-write offset
//! - [`GainTracker`] - Envelope follower plus smoothed gain, with asymmetric attack/release
//! - [`LimiterEngine`] - Owns one delay line per channel and applies the tracked gain
//!
//! ## Configuration
//!
//! - [`LimiterParams`] - Threshold, attack/release ballistics and channel linking
//! - [`Smoothing`] - A ballistic given as a raw coefficient or as a time constant
//! - [`ChannelLink`] - Shared gain across channels or one follower per channel
//!
//! # Signal Flow
//!
//! ```text
//! input[c][i] ──┬──────────────────────────► DelayLine[c] ──► × gain ──► output[c][i]
//!               │                                               ▲
//!               └─► |x| ─► envelope ─► threshold / env ─► gain ─┘
//! ```
//!
//! The gain is computed from the *current* input sample and applied to the
//! *delayed* one, which gives the follower a few samples of lookahead to
//! react before a transient reaches the output.
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! brickwall-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use brickwall_core::{LimiterEngine, LimiterParams};
//!
//! let mut limiter = LimiterEngine::new(LimiterParams::default()).unwrap();
//! limiter.prepare(2, 1, 10, 48000.0).unwrap();
//!
//! let mut block = vec![vec![0.0_f32; 256]; 2];
//! limiter.process(&mut block);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod envelope;
pub mod error;
pub mod limiter;
pub mod math;
pub mod params;

pub use delay::DelayLine;
pub use envelope::{Coefficients, GainTracker, target_gain};
pub use error::LimiterError;
pub use limiter::LimiterEngine;
pub use math::{db_to_linear, flush_denormal, linear_to_db, time_to_coefficient};
pub use params::{
    ChannelLink, DEFAULT_ATTACK_COEFF, DEFAULT_BUFFER_CAPACITY, DEFAULT_DELAY_LENGTH,
    DEFAULT_RELEASE_COEFF, DEFAULT_THRESHOLD, LimiterParams, MAX_BUFFER_CAPACITY, MAX_CHANNELS,
    Smoothing,
};
