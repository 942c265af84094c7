//! Ballpit - moving, colliding disks in a bounded plane
//!
//! Core modules:
//! - `sim`: Points, vectors, balls, collision resolution and a reference tick driver
//! - `settings`: JSON configuration for the driver and demo binary
//! - `error`: Error types shared across the crate

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{BallError, CollisionError, SettingsError};
pub use settings::Settings;
pub use sim::{Ball, Bounds, Color, Point, Vector};

use std::f64::consts::TAU;

/// Simulation constants
pub mod consts {
    use std::f64::consts::PI;

    /// Radius given to every freshly constructed ball
    pub const DEFAULT_RADIUS: f64 = 15.0;
    /// Aim rotation applied to an idle ball on each step (15 degrees)
    pub const IDLE_SPIN_PER_STEP: f64 = PI / 24.0;
    /// Upper bound on unstick iterations before falling back to positional correction
    pub const DEFAULT_MAX_UNSTICK_STEPS: u32 = 1000;

    /// Default plane dimensions
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 600.0;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles, in [0, π]
#[cfg(test)]
pub(crate) fn angle_between(a: f64, b: f64) -> f64 {
    let diff = wrap_angle(a - b);
    diff.min(TAU - diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-300) < TAU);
    }

    #[test]
    fn test_angle_between_wraps() {
        assert!((angle_between(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
        assert!((angle_between(PI, 0.0) - PI).abs() < 1e-12);
    }
}
