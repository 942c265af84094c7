//! Error types for the ballpit crate
//!
//! Built with `thiserror`. Degenerate geometry (zero vectors, coincident
//! centers) is not an error; only rejected inputs and unresolved collisions are.

use thiserror::Error;

/// Errors raised by ball setters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BallError {
    /// Radius must be strictly positive
    #[error("radius must be positive, not {radius}")]
    InvalidRadius {
        /// The rejected radius
        radius: f64,
    },
}

/// Errors raised while resolving a ball-to-ball collision
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionError {
    /// The unstick loop hit its step cap and positional correction is disabled
    #[error("balls still overlapping after {steps} unstick steps")]
    FailedToSeparate {
        /// Number of steps taken before giving up
        steps: u32,
    },
}

/// Errors raised while loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON was malformed
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting is out of range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// An explicit ball spec was rejected
    #[error("invalid ball #{index}: {source}")]
    Ball {
        /// Position of the ball in the `balls` list
        index: usize,
        /// Underlying ball error
        source: BallError,
    },
}
