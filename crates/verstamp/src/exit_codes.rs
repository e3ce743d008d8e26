//! Exit codes for the CLI

use verstamp_core::{StampError, VerstampError};

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Target file missing
pub const FILE_NOT_FOUND: i32 = 3;

/// Pattern occurrence count or expected outcome did not hold
pub const PATTERN_MISMATCH: i32 = 4;

/// Target file could not be read or written
pub const WRITE_ERROR: i32 = 5;

/// Release version rejected
pub const VERSION_ERROR: i32 = 6;

/// Map an error to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<VerstampError>() {
        Some(VerstampError::Config(_)) => CONFIG_ERROR,
        Some(VerstampError::Stamp(stamp)) => match stamp {
            StampError::FileNotFound(_) => FILE_NOT_FOUND,
            StampError::PatternMismatch { .. } | StampError::UnexpectedOutcome { .. } => {
                PATTERN_MISMATCH
            }
            StampError::ReadFailure { .. } | StampError::WriteFailure { .. } => WRITE_ERROR,
            StampError::InvalidPattern { .. } => CONFIG_ERROR,
            StampError::InvalidVersion { .. } => VERSION_ERROR,
        },
        Some(VerstampError::Io(_)) => WRITE_ERROR,
        None => ERROR,
    }
}
