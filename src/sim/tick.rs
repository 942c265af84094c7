//! Fixed-step simulation tick
//!
//! Reference driver for the per-tick control flow: every ball steps and
//! bounces off the walls, then every overlapping pair is resolved in index
//! order. Callers that own their balls differently can do the same thing by
//! hand with [`Ball::step`], [`Ball::bounce_walls`] and [`Ball::bounce_with`].

use super::collision::{Separation, UnstickPolicy};
use super::state::{Ball, Bounds};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Balls whose movement was reflected by a wall
    pub wall_bounces: u32,
    /// Pairs resolved by stepping apart
    pub collisions: u32,
    /// Pairs that needed positional correction
    pub corrections: u32,
    /// Pairs left overlapping because separation failed
    pub failures: u32,
}

impl TickReport {
    pub fn merge(&mut self, other: TickReport) {
        self.wall_bounces += other.wall_bounces;
        self.collisions += other.collisions;
        self.corrections += other.corrections;
        self.failures += other.failures;
    }
}

/// Advance every ball by one step, then resolve collisions
pub fn tick(balls: &mut [Ball], bounds: Bounds, policy: &UnstickPolicy) -> TickReport {
    let mut report = TickReport::default();

    for ball in balls.iter_mut() {
        ball.step();
        let before = ball.movement();
        ball.bounce_walls(bounds);
        if ball.movement() != before {
            report.wall_bounces += 1;
        }
    }

    // Pairs are checked against positions as they stand when visited, so a
    // resolution earlier in the pass can create or clear a later overlap
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (first, second) = pair_mut(balls, i, j);
            if !first.is_colliding(second) {
                continue;
            }
            match first.bounce_with(second, policy) {
                Ok(Separation::Stepped { .. }) => report.collisions += 1,
                Ok(Separation::Corrected { steps, overlap }) => {
                    log::warn!(
                        "balls {} and {} did not separate after {} steps; pushed apart by {:.3}",
                        i,
                        j,
                        steps,
                        overlap
                    );
                    report.corrections += 1;
                }
                Err(e) => {
                    log::warn!("balls {} and {} left overlapping: {}", i, j, e);
                    report.failures += 1;
                }
            }
        }
    }

    report
}

/// All overlapping pairs `(i, j)` with `i < j`, in index order
pub fn colliding_pairs(balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in balls.iter().enumerate() {
        for (j, b) in balls.iter().enumerate().skip(i + 1) {
            if a.is_colliding(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Disjoint mutable borrows of two balls
///
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    assert_ne!(i, j, "cannot borrow a ball against itself");
    if i < j {
        let (head, tail) = balls.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = balls.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Launch the first idle ball if `tick_index` falls on the launch interval
///
/// An interval of 0 launches every idle ball at once. Returns the index of the
/// launched ball (the last one when launching everything).
pub fn launch_due(balls: &mut [Ball], tick_index: u64, interval: u32) -> Option<usize> {
    if interval == 0 {
        let mut last = None;
        for (i, ball) in balls.iter_mut().enumerate() {
            if !ball.is_active() {
                ball.launch();
                last = Some(i);
            }
        }
        return last;
    }

    if tick_index % u64::from(interval) != 0 {
        return None;
    }
    let (index, ball) = balls.iter_mut().enumerate().find(|(_, b)| !b.is_active())?;
    ball.launch();
    Some(index)
}
