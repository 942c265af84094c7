//! A bounded plane full of balls, driven tick by tick
//!
//! Owns the ball collection the core itself never keeps. Placement is seeded,
//! so the same settings always produce the same run.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{BodyUpdate, UnstickPolicy};
use super::point::Point;
use super::state::{Ball, Bounds, Color};
use super::tick::{TickReport, launch_due, tick};
use super::vector::Vector;
use crate::error::SettingsError;
use crate::settings::Settings;

/// Placement retries before a generated ball is allowed to overlap
const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Slowest generated ball, as a fraction of `max_speed`
const MIN_SPEED_FRACTION: f64 = 0.25;

/// Simulation world
#[derive(Debug, Clone)]
pub struct World {
    pub bounds: Bounds,
    pub policy: UnstickPolicy,
    /// Balls in stable index order
    pub balls: Vec<Ball>,
    /// Ticks advanced so far
    pub time_ticks: u64,
    /// Ticks between launches of idle balls
    pub launch_interval: u32,
    totals: TickReport,
}

impl World {
    pub fn new(bounds: Bounds, policy: UnstickPolicy, balls: Vec<Ball>) -> Self {
        Self {
            bounds,
            policy,
            balls,
            time_ticks: 0,
            launch_interval: 0,
            totals: TickReport::default(),
        }
    }

    /// Validate settings and populate the world from them
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let balls = scatter(settings)?;
        log::info!(
            "World {}x{} with {} balls (seed {})",
            settings.bounds.width,
            settings.bounds.height,
            balls.len(),
            settings.seed
        );
        let mut world = Self::new(settings.bounds, settings.unstick, balls);
        world.launch_interval = settings.launch_interval;
        Ok(world)
    }

    /// Launch whatever is due, then advance one tick
    pub fn advance(&mut self) -> TickReport {
        if let Some(index) = launch_due(&mut self.balls, self.time_ticks, self.launch_interval) {
            log::debug!("tick {}: launched ball {}", self.time_ticks, index);
        }
        let report = tick(&mut self.balls, self.bounds, &self.policy);
        self.time_ticks += 1;
        self.totals.merge(report);
        report
    }

    /// Advance `ticks` times and return the combined report
    pub fn run(&mut self, ticks: u64) -> TickReport {
        let mut report = TickReport::default();
        for _ in 0..ticks {
            report.merge(self.advance());
        }
        report
    }

    /// Everything that happened since the world was created
    pub fn totals(&self) -> TickReport {
        self.totals
    }

    pub fn active_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_active()).count()
    }
}

/// Build the initial balls: explicit specs first, then seeded random ones
///
/// Random balls are placed fully inside the bounds with a random heading and a
/// speed between a quarter of `max_speed` and `max_speed`. Each is retried
/// until it overlaps nothing already placed, up to a fixed number of attempts.
pub fn scatter(settings: &Settings) -> Result<Vec<Ball>, SettingsError> {
    settings.validate()?;

    let mut balls = Vec::with_capacity(settings.balls.len() + settings.ball_count);
    for (index, spec) in settings.balls.iter().enumerate() {
        let ball = spec
            .build(settings.ball_radius)
            .map_err(|source| SettingsError::Ball { index, source })?;
        balls.push(ball);
    }

    let mut rng = Pcg32::seed_from_u64(settings.seed);
    let r = settings.ball_radius;
    let (width, height) = (settings.bounds.width, settings.bounds.height);

    for _ in 0..settings.ball_count {
        let index = balls.len();
        let color = Color::PALETTE[index % Color::PALETTE.len()];
        let heading = rng.random_range(0.0..TAU);
        let speed = rng.random_range(settings.max_speed * MIN_SPEED_FRACTION..=settings.max_speed);
        let movement = Vector::from_angle(heading).scale(speed);

        let mut candidate = Ball::new(Point::ORIGIN, movement, color)
            .with_radius(r)
            .map_err(|source| SettingsError::Ball { index, source })?;
        for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
            let location = Point::new(rng.random_range(r..width - r), rng.random_range(r..height - r));
            candidate.commit(BodyUpdate { location, movement });
            if !balls.iter().any(|b| b.is_colliding(&candidate)) {
                break;
            }
            if attempt == MAX_PLACEMENT_ATTEMPTS {
                log::warn!("ball {} placed overlapping after {} attempts", index, attempt);
            }
        }
        balls.push(candidate);
    }

    Ok(balls)
}
