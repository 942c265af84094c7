//! Ball entity and the plain value types it is built from
//!
//! A ball starts idle, spinning its aim vector in place, and becomes a
//! free-moving body once launched. Launching is one-way.

use serde::{Deserialize, Serialize};

use super::collision::{self, BodyUpdate, Separation, UnstickPolicy};
use super::point::Point;
use super::vector::Vector;
use crate::consts::{DEFAULT_HEIGHT, DEFAULT_RADIUS, DEFAULT_WIDTH, IDLE_SPIN_PER_STEP};
use crate::error::{BallError, CollisionError};

/// Ball mode - idle (aiming) or active (moving)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallState {
    /// Movement vector is an aim line that rotates every step
    #[default]
    Idle,
    /// Movement vector is a velocity applied every step
    Active,
}

/// Opaque RGB color carried for renderers; physics never reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Palette cycled through when balls are generated
    pub const PALETTE: [Self; 6] = [
        Self::RED,
        Self::GREEN,
        Self::BLUE,
        Self::YELLOW,
        Self::MAGENTA,
        Self::CYAN,
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Width and height of the plane balls bounce around in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// A moving disk
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    radius: f64,
    color: Color,
    state: BallState,
    location: Point,
    movement: Vector,
}

impl Ball {
    /// Create an idle ball with the default radius
    pub fn new(location: Point, movement: Vector, color: Color) -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            color,
            state: BallState::Idle,
            location,
            movement,
        }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Velocity when active, aim vector when idle
    pub fn movement(&self) -> Vector {
        self.movement
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> BallState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == BallState::Active
    }

    /// Set the radius; rejects zero, negative and NaN values
    pub fn set_radius(&mut self, radius: f64) -> Result<(), BallError> {
        if !(radius > 0.0) {
            return Err(BallError::InvalidRadius { radius });
        }
        self.radius = radius;
        Ok(())
    }

    /// Builder-style variant of [`Ball::set_radius`]
    pub fn with_radius(mut self, radius: f64) -> Result<Self, BallError> {
        self.set_radius(radius)?;
        Ok(self)
    }

    /// Switch to active; no-op if already launched
    pub fn launch(&mut self) {
        self.state = BallState::Active;
    }

    /// Advance one tick: move when active, spin the aim vector when idle
    pub fn step(&mut self) {
        match self.state {
            BallState::Active => self.location = self.movement.translate(self.location),
            BallState::Idle => self.movement = self.movement.rotate(IDLE_SPIN_PER_STEP),
        }
    }

    /// Reflect movement off the plane edges
    ///
    /// A component is only flipped when the ball is past the margin *and* still
    /// heading outward, so a ball already travelling back in is left alone.
    pub fn bounce_walls(&mut self, bounds: Bounds) {
        let min_x = self.radius;
        let min_y = self.radius;
        let max_x = bounds.width - self.radius;
        let max_y = bounds.height - self.radius;

        let x = self.location.x();
        let y = self.location.y();
        let mut dx = self.movement.dx();
        let mut dy = self.movement.dy();

        if (x < min_x && dx < 0.0) || (x > max_x && dx > 0.0) {
            dx = -dx;
        }
        if (y < min_y && dy < 0.0) || (y > max_y && dy > 0.0) {
            dy = -dy;
        }

        self.movement = Vector::new(dx, dy);
    }

    /// Whether this ball overlaps another
    pub fn is_colliding(&self, other: &Ball) -> bool {
        collision::is_colliding(self, other)
    }

    /// Resolve an elastic collision with `other` using the default unstick policy
    ///
    /// Exchanges the normal components of both velocities, then steps both
    /// balls until they no longer overlap. See [`collision::resolve`].
    pub fn bounce(&mut self, other: &mut Ball) -> Result<Separation, CollisionError> {
        self.bounce_with(other, &UnstickPolicy::default())
    }

    /// [`Ball::bounce`] with an explicit unstick policy
    ///
    /// On error neither ball is modified.
    pub fn bounce_with(
        &mut self,
        other: &mut Ball,
        policy: &UnstickPolicy,
    ) -> Result<Separation, CollisionError> {
        let resolution = collision::resolve(self, other, policy)?;
        self.commit(resolution.first);
        other.commit(resolution.second);
        log::debug!(
            "bounce {} <-> {}: {:?}",
            self.location,
            other.location,
            resolution.separation
        );
        Ok(resolution.separation)
    }

    /// Overwrite location and movement with a computed update
    pub fn commit(&mut self, update: BodyUpdate) {
        self.location = update.location;
        self.movement = update.movement;
    }

    /// Snapshot of the mutable kinematic state
    pub fn body(&self) -> BodyUpdate {
        BodyUpdate {
            location: self.location,
            movement: self.movement,
        }
    }
}
