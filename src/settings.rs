//! Simulation settings
//!
//! Read from a JSON file by the demo binary. Every field has a default, so a
//! file only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_RADIUS;
use crate::error::{BallError, SettingsError};
use crate::sim::{Ball, Bounds, Color, Point, UnstickPolicy, Vector};

/// An explicitly placed ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    pub location: Point,
    /// Initial velocity (or aim vector while idle), as `[dx, dy]`
    pub movement: Vector,
    #[serde(default)]
    pub color: Color,
    /// Overrides `Settings::ball_radius`
    #[serde(default)]
    pub radius: Option<f64>,
    /// Start already launched
    #[serde(default)]
    pub launched: bool,
}

impl BallSpec {
    /// Build the ball, falling back to `default_radius` when none is given
    pub fn build(&self, default_radius: f64) -> Result<Ball, BallError> {
        let mut ball = Ball::new(self.location, self.movement, self.color)
            .with_radius(self.radius.unwrap_or(default_radius))?;
        if self.launched {
            ball.launch();
        }
        Ok(ball)
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Plane the balls bounce around in
    pub bounds: Bounds,
    /// Radius for generated balls and specs without one
    pub ball_radius: f64,
    /// Collision unstick behavior
    pub unstick: UnstickPolicy,

    // === Generation ===
    /// Seed for ball placement
    pub seed: u64,
    /// Number of randomly placed balls (added after `balls`)
    pub ball_count: usize,
    /// Fastest speed a generated ball may get
    pub max_speed: f64,
    /// Explicitly placed balls
    pub balls: Vec<BallSpec>,

    // === Driver ===
    /// Ticks between successive launches of idle balls (0 launches everything at once)
    pub launch_interval: u32,
    /// Number of ticks the demo runs for
    pub ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            ball_radius: DEFAULT_RADIUS,
            unstick: UnstickPolicy::default(),

            seed: 0x5eed,
            ball_count: 8,
            max_speed: 4.0,
            balls: Vec::new(),

            launch_interval: 30,
            ticks: 600,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the driver cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.ball_radius > 0.0) {
            return Err(invalid("ball_radius", format!("must be positive, not {}", self.ball_radius)));
        }
        let min_side = self.ball_radius * 2.0;
        if !(self.bounds.width > min_side && self.bounds.height > min_side) {
            return Err(invalid(
                "bounds",
                format!(
                    "{}x{} cannot fit a ball of radius {}",
                    self.bounds.width, self.bounds.height, self.ball_radius
                ),
            ));
        }
        if !(self.max_speed > 0.0 && self.max_speed.is_finite()) {
            return Err(invalid("max_speed", format!("must be positive, not {}", self.max_speed)));
        }
        if self.unstick.max_steps == 0 && !self.unstick.correct_overlap {
            return Err(invalid(
                "unstick",
                "max_steps of 0 without overlap correction can never separate balls".to_string(),
            ));
        }
        for (index, spec) in self.balls.iter().enumerate() {
            spec.build(self.ball_radius)
                .map_err(|source| SettingsError::Ball { index, source })?;
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}
