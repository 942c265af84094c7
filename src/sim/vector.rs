//! Immutable displacement vectors
//!
//! Angles are measured clockwise from the x-axis (screen coordinates, y down)
//! and reported in [0, 2π).

use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::wrap_angle;

/// A linear translation within two-dimensional space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(DVec2);

impl Vector {
    /// The zero vector (no change)
    pub const ZERO: Self = Self(DVec2::ZERO);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self(DVec2::new(dx, dy))
    }

    /// Unit vector at angle `theta`
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Displacement that carries `from` onto `to`
    pub fn between(from: Point, to: Point) -> Self {
        Self::from(to.as_dvec2() - from.as_dvec2())
    }

    #[inline]
    pub fn dx(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn dy(self) -> f64 {
        self.0.y
    }

    /// Translate a point by this vector
    #[inline]
    pub fn translate(self, p: Point) -> Point {
        Point::from(p.as_dvec2() + self.0)
    }

    #[inline]
    pub fn add(self, v: Vector) -> Vector {
        Self(self.0 + v.0)
    }

    #[inline]
    pub fn dot(self, v: Vector) -> f64 {
        self.0.dot(v.0)
    }

    #[inline]
    pub fn scale(self, s: f64) -> Vector {
        Self(self.0 * s)
    }

    /// Euclidean length, without overflow or underflow in the squares
    pub fn magnitude(self) -> f64 {
        self.0.x.hypot(self.0.y)
    }

    /// Unit vector in the same direction; the zero vector stays zero
    pub fn normalize(self) -> Vector {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            Self::ZERO
        } else {
            Self(self.0 / magnitude)
        }
    }

    /// Clockwise angle from the x-axis in [0, 2π); 0 for the zero vector
    pub fn angle(self) -> f64 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return 0.0;
        }

        // acos only covers [0, π]; mirror the lower half-plane
        let alpha = (self.0.x / magnitude).clamp(-1.0, 1.0).acos();
        if self.0.y < 0.0 { wrap_angle(TAU - alpha) } else { alpha }
    }

    /// Rotate clockwise by `theta` radians, preserving magnitude
    pub fn rotate(self, theta: f64) -> Vector {
        Self::from_angle(wrap_angle(self.angle() + theta)).scale(self.magnitude())
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::add(self, rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::add(self, rhs.scale(-1.0))
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        rhs.translate(self)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}, {:?}>", self.0.x, self.0.y)
    }
}
