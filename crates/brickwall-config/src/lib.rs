//! Configuration for the brickwall limiter.
//!
//! Reads limiter settings from TOML, resolves unit-suffixed values
//! (`"-1dB"`, `"150ms"`, `"80%"`), validates them against the engine's ranges
//! and builds a prepared [`LimiterEngine`](brickwall_core::LimiterEngine).
//!
//! # Example
//!
//! ```rust
//! use brickwall_config::LimiterConfig;
//!
//! let config = LimiterConfig::from_toml_str(r#"
//!     threshold = "-1dB"
//!     attack = "0.5ms"
//!     release = "120ms"
//!     lookahead = "1ms"
//! "#).unwrap();
//!
//! let mut limiter = config.build_engine(2, 48000.0).unwrap();
//! assert_eq!(limiter.latency_samples(), 48);
//!
//! let mut block = vec![vec![0.0_f32; 128]; 2];
//! limiter.process(&mut block);
//! ```

mod error;
mod limiter_config;

/// Unit-aware value parsing.
pub mod value;

pub use error::ConfigError;
pub use limiter_config::{LimiterConfig, LinkSetting};
pub use value::{ParamValue, Quantity, parse_quantity};
