//! Ball-to-ball collision detection and response
//!
//! Resolution is a pure function over two balls: it returns their final
//! locations and movements without touching the inputs, and the caller
//! commits the result. Velocities are split into a component along the line
//! of centers (normal) and the remainder (tangent); equal-mass elastic
//! collision swaps the normal components and keeps the tangents.
//!
//! After the swap both balls are stepped until they stop overlapping. That
//! loop is capped, and when the cap is hit the pair is pushed apart along the
//! line of centers instead.

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::state::Ball;
use super::vector::Vector;
use crate::consts::DEFAULT_MAX_UNSTICK_STEPS;
use crate::error::CollisionError;

/// Extra separation added by positional correction, relative to the radii sum
const SEPARATION_SLACK: f64 = 1e-9;

/// How the post-collision overlap is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnstickPolicy {
    /// Maximum paired steps before giving up on stepping apart
    pub max_steps: u32,
    /// Push the balls apart along the line of centers once `max_steps` is spent
    pub correct_overlap: bool,
}

impl Default for UnstickPolicy {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_UNSTICK_STEPS,
            correct_overlap: true,
        }
    }
}

/// How a resolved pair ended up apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Separation {
    /// Stepping alone cleared the overlap (0 if they were not overlapping)
    Stepped { steps: u32 },
    /// Stepping hit the cap; the remaining overlap was removed by moving both balls
    Corrected { steps: u32, overlap: f64 },
}

impl Separation {
    pub fn steps(&self) -> u32 {
        match *self {
            Separation::Stepped { steps } | Separation::Corrected { steps, .. } => steps,
        }
    }

    pub fn was_corrected(&self) -> bool {
        matches!(self, Separation::Corrected { .. })
    }
}

/// Location and movement of one ball after resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyUpdate {
    pub location: Point,
    pub movement: Vector,
}

/// Result of resolving a collision between two balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub first: BodyUpdate,
    pub second: BodyUpdate,
    pub separation: Separation,
}

/// Velocity decomposed against a unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSplit {
    /// Part parallel to the normal
    pub normal: Vector,
    /// Everything else
    pub tangent: Vector,
}

/// Check whether two balls overlap (touching is not overlapping)
pub fn is_colliding(a: &Ball, b: &Ball) -> bool {
    a.location().distance(&b.location()) < a.radius() + b.radius()
}

/// Depth of the overlap between two balls, 0 when apart
pub fn overlap(a: &Ball, b: &Ball) -> f64 {
    (a.radius() + b.radius() - a.location().distance(&b.location())).max(0.0)
}

/// Split `velocity` into normal and tangent parts against `unit_normal`
///
/// A zero normal puts the whole velocity in the tangent.
pub fn split_velocity(velocity: Vector, unit_normal: Vector) -> NormalSplit {
    let normal = unit_normal.scale(velocity.dot(unit_normal));
    NormalSplit {
        normal,
        tangent: velocity.add(normal.scale(-1.0)),
    }
}

/// Post-collision velocities for an equal-mass elastic collision
///
/// Coincident centers give zero normals, in which case both velocities come
/// back unchanged.
pub fn exchange_velocities(a: &Ball, b: &Ball) -> (Vector, Vector) {
    let a_normal = Vector::between(a.location(), b.location()).normalize();
    let b_normal = Vector::between(b.location(), a.location()).normalize();

    let a_split = split_velocity(a.movement(), a_normal);
    let b_split = split_velocity(b.movement(), b_normal);

    (
        a_split.tangent.add(b_split.normal),
        b_split.tangent.add(a_split.normal),
    )
}

/// Resolve a collision between `a` and `b` without mutating either
///
/// Returns `CollisionError::FailedToSeparate` only when stepping exhausts
/// `policy.max_steps` and `policy.correct_overlap` is off.
pub fn resolve(a: &Ball, b: &Ball, policy: &UnstickPolicy) -> Result<Resolution, CollisionError> {
    let (a_velocity, b_velocity) = exchange_velocities(a, b);

    let mut a = a.clone();
    let mut b = b.clone();
    let (a_location, b_location) = (a.location(), b.location());
    a.commit(BodyUpdate {
        location: a_location,
        movement: a_velocity,
    });
    b.commit(BodyUpdate {
        location: b_location,
        movement: b_velocity,
    });

    let mut steps = 0;
    while is_colliding(&a, &b) {
        if steps == policy.max_steps {
            break;
        }
        a.step();
        b.step();
        steps += 1;
    }

    let separation = if !is_colliding(&a, &b) {
        Separation::Stepped { steps }
    } else if policy.correct_overlap {
        let overlap = push_apart(&mut a, &mut b);
        Separation::Corrected { steps, overlap }
    } else {
        return Err(CollisionError::FailedToSeparate { steps });
    };

    Ok(Resolution {
        first: a.body(),
        second: b.body(),
        separation,
    })
}

/// Move both balls apart along the line of centers until they just touch
///
/// Each ball covers half the overlap. Coincident centers fall back to the
/// x-axis: `a` moves toward -x, `b` toward +x. Returns the overlap removed.
fn push_apart(a: &mut Ball, b: &mut Ball) -> f64 {
    let sum_radii = a.radius() + b.radius();
    let depth = overlap(a, b);

    let mut axis = Vector::between(a.location(), b.location()).normalize();
    if axis == Vector::ZERO {
        axis = Vector::new(1.0, 0.0);
    }

    let push = depth * 0.5 + sum_radii * SEPARATION_SLACK;
    let a_update = BodyUpdate {
        location: axis.scale(-push).translate(a.location()),
        movement: a.movement(),
    };
    let b_update = BodyUpdate {
        location: axis.scale(push).translate(b.location()),
        movement: b.movement(),
    };
    a.commit(a_update);
    b.commit(b_update);

    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;

    fn ball(x: f64, y: f64, dx: f64, dy: f64, active: bool) -> Ball {
        let mut ball = Ball::new(Point::new(x, y), Vector::new(dx, dy), Color::GREEN);
        if active {
            ball.launch();
        }
        ball
    }

    #[test]
    fn test_is_colliding_strict() {
        let a = ball(0.0, 0.0, 0.0, 0.0, true);
        let touching = ball(30.0, 0.0, 0.0, 0.0, true);
        let overlapping = ball(29.5, 0.0, 0.0, 0.0, true);
        assert!(!is_colliding(&a, &touching));
        assert!(is_colliding(&a, &overlapping));
        assert_eq!(overlap(&a, &touching), 0.0);
        assert!((overlap(&a, &overlapping) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_split_velocity() {
        let split = split_velocity(Vector::new(3.0, 4.0), Vector::new(1.0, 0.0));
        assert_eq!(split.normal, Vector::new(3.0, 0.0));
        assert_eq!(split.tangent, Vector::new(0.0, 4.0));

        let degenerate = split_velocity(Vector::new(3.0, 4.0), Vector::ZERO);
        assert_eq!(degenerate.normal, Vector::ZERO);
        assert_eq!(degenerate.tangent, Vector::new(3.0, 4.0));
    }

    #[test]
    fn test_exchange_conserves_momentum() {
        let a = ball(0.0, 0.0, 2.0, 1.0, true);
        let b = ball(20.0, 10.0, -1.0, 0.5, true);
        let (va, vb) = exchange_velocities(&a, &b);
        let before = a.movement().add(b.movement());
        let after = va.add(vb);
        assert!((before.dx() - after.dx()).abs() < 1e-12);
        assert!((before.dy() - after.dy()).abs() < 1e-12);

        // Kinetic energy is conserved for equal masses
        let e_before = a.movement().dot(a.movement()) + b.movement().dot(b.movement());
        let e_after = va.dot(va) + vb.dot(vb);
        assert!((e_before - e_after).abs() < 1e-9);
    }

    #[test]
    fn test_exchange_coincident_centers_is_noop() {
        let a = ball(5.0, 5.0, 2.0, 0.0, true);
        let b = ball(5.0, 5.0, -1.0, 3.0, true);
        let (va, vb) = exchange_velocities(&a, &b);
        assert_eq!(va, Vector::new(2.0, 0.0));
        assert_eq!(vb, Vector::new(-1.0, 3.0));
    }

    #[test]
    fn test_resolve_is_pure() {
        let a = ball(50.0, 50.0, 2.0, 0.0, true);
        let b = ball(79.0, 50.0, -2.0, 0.0, true);
        let before = (a.clone(), b.clone());

        let resolution = resolve(&a, &b, &UnstickPolicy::default()).unwrap();

        assert_eq!((a, b), before);
        assert_eq!(resolution.first.movement, Vector::new(-2.0, 0.0));
        assert_eq!(resolution.second.movement, Vector::new(2.0, 0.0));
        assert_eq!(resolution.first.location, Point::new(48.0, 50.0));
        assert_eq!(resolution.second.location, Point::new(81.0, 50.0));
        assert_eq!(resolution.separation, Separation::Stepped { steps: 1 });
    }

    #[test]
    fn test_resolve_not_overlapping_takes_no_steps() {
        let a = ball(0.0, 0.0, 1.0, 0.0, true);
        let b = ball(100.0, 0.0, -1.0, 0.0, true);
        let resolution = resolve(&a, &b, &UnstickPolicy::default()).unwrap();
        assert_eq!(resolution.separation.steps(), 0);
        assert_eq!(resolution.first.location, a.location());
    }

    #[test]
    fn test_resolve_coincident_centers_falls_back_to_correction() {
        let a = ball(40.0, 40.0, 0.0, 0.0, true);
        let b = ball(40.0, 40.0, 0.0, 0.0, true);
        let policy = UnstickPolicy {
            max_steps: 5,
            correct_overlap: true,
        };

        let resolution = resolve(&a, &b, &policy).unwrap();

        match resolution.separation {
            Separation::Corrected { steps, overlap } => {
                assert_eq!(steps, 5);
                assert!((overlap - 30.0).abs() < 1e-12);
            }
            other => panic!("expected correction, got {other:?}"),
        }
        assert!(resolution.first.location.x() < 40.0);
        assert!(resolution.second.location.x() > 40.0);
        assert_eq!(resolution.first.location.y(), 40.0);
        let gap = resolution.first.location.distance(&resolution.second.location);
        assert!(gap >= 30.0);
    }

    #[test]
    fn test_resolve_correction_along_line_of_centers() {
        // Chasing at equal speed: stepping never opens the gap
        let a = ball(0.0, 0.0, 1.0, 1.0, true);
        let b = ball(6.0, 8.0, 1.0, 1.0, true);
        let policy = UnstickPolicy {
            max_steps: 3,
            correct_overlap: true,
        };
        // Exchange along (0.6, 0.8) swaps identical normals, so velocities stay equal
        let resolution = resolve(&a, &b, &policy).unwrap();
        assert!(resolution.separation.was_corrected());

        let first = resolution.first.location;
        let second = resolution.second.location;
        assert!(first.distance(&second) >= 30.0);
        let axis = Vector::between(first, second).normalize();
        assert!((axis.dx() - 0.6).abs() < 1e-9);
        assert!((axis.dy() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_strict_policy_errors() {
        let a = ball(40.0, 40.0, 1.0, 0.0, true);
        let b = ball(40.0, 40.0, 1.0, 0.0, true);
        let policy = UnstickPolicy {
            max_steps: 0,
            correct_overlap: false,
        };
        assert_eq!(
            resolve(&a, &b, &policy),
            Err(CollisionError::FailedToSeparate { steps: 0 })
        );
    }

    #[test]
    fn test_resolve_idle_partner_needs_correction() {
        // The active ball hands all its speed to the idle one, which only spins
        let idle = ball(50.0, 50.0, 0.0, 0.0, false);
        let active = ball(75.0, 50.0, -1.0, 0.0, true);

        let resolution = resolve(&active, &idle, &UnstickPolicy::default()).unwrap();

        assert_eq!(resolution.first.movement, Vector::ZERO);
        assert!((resolution.second.movement.magnitude() - 1.0).abs() < 1e-9);
        assert_eq!(
            resolution.separation,
            Separation::Corrected {
                steps: DEFAULT_MAX_UNSTICK_STEPS,
                overlap: 5.0
            }
        );
        // Neither ball drifted while stepping; correction split the 5.0 overlap
        assert!((resolution.first.location.x() - 77.5).abs() < 1e-6);
        assert!((resolution.second.location.x() - 47.5).abs() < 1e-6);
        assert_eq!(resolution.second.location.y(), 50.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolved_pairs_never_overlap(
                ax in 0.0f64..200.0,
                ay in 0.0f64..200.0,
                bx in 0.0f64..200.0,
                by in 0.0f64..200.0,
                adx in -5.0f64..5.0,
                ady in -5.0f64..5.0,
                bdx in -5.0f64..5.0,
                bdy in -5.0f64..5.0
            ) {
                let a = ball(ax, ay, adx, ady, true);
                let b = ball(bx, by, bdx, bdy, true);
                let policy = UnstickPolicy { max_steps: 50, correct_overlap: true };

                let resolution = resolve(&a, &b, &policy).unwrap();

                let gap = resolution.first.location.distance(&resolution.second.location);
                prop_assert!(gap >= a.radius() + b.radius());
                prop_assert!(resolution.separation.steps() <= 50);
            }

            #[test]
            fn exchange_conserves_momentum(
                ax in -100.0f64..100.0,
                ay in -100.0f64..100.0,
                bx in -100.0f64..100.0,
                by in -100.0f64..100.0,
                adx in -5.0f64..5.0,
                ady in -5.0f64..5.0,
                bdx in -5.0f64..5.0,
                bdy in -5.0f64..5.0
            ) {
                let a = ball(ax, ay, adx, ady, true);
                let b = ball(bx, by, bdx, bdy, true);
                let (va, vb) = exchange_velocities(&a, &b);
                prop_assert!((va.dx() + vb.dx() - adx - bdx).abs() < 1e-9);
                prop_assert!((va.dy() + vb.dy() - ady - bdy).abs() < 1e-9);
            }
        }
    }
}
