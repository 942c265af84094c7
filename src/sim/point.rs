//! Immutable points in the plane

use std::fmt;
use std::hash::{Hash, Hasher};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in two-dimensional Euclidean space
///
/// Equality is exact: components are compared with `f64::total_cmp`, so
/// `0.0` and `-0.0` differ and a NaN equals the same NaN. This makes `Point`
/// usable as a hash key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// X rounded to the nearest integer (ties away from zero, saturating)
    #[inline]
    pub fn int_x(&self) -> i32 {
        self.x.round() as i32
    }

    /// Y rounded to the nearest integer (ties away from zero, saturating)
    #[inline]
    pub fn int_y(&self) -> i32 {
        self.y.round() as i32
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x.total_cmp(&other.x).is_eq() && self.y.total_cmp(&other.y).is_eq()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}
