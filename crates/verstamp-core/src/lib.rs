//! Verstamp Core - Core library for release version stamping
//!
//! This crate provides the replacement rules, the version stamper, error
//! handling and configuration used by the `verstamp` CLI. A release
//! orchestrator computes the next version; this crate writes it into the
//! source files that declare it.

pub mod config;
pub mod error;
pub mod stamp;
pub mod types;

pub use error::{ConfigError, Result, StampError, VerstampError};
pub use stamp::{
    stamp_all, ExpectedOutcome, MatchPattern, ReplacementRule, VersionStamper, VERSION_PLACEHOLDER,
};
pub use types::{ReplacementResult, StampReport};
