//! Disk simulation core
//!
//! Value types (`Point`, `Vector`), the `Ball` entity, collision resolution and
//! a reference tick driver. Everything here is synchronous and deterministic:
//! - Stepping is sequenced by the caller, one tick at a time
//! - Pairs are visited in stable index order
//! - Random placement is seeded

pub mod collision;
pub mod point;
pub mod state;
pub mod tick;
pub mod vector;
pub mod world;

pub use collision::{BodyUpdate, Resolution, Separation, UnstickPolicy, is_colliding, resolve};
pub use point::Point;
pub use state::{Ball, BallState, Bounds, Color};
pub use tick::{TickReport, colliding_pairs, launch_due, pair_mut, tick};
pub use vector::Vector;
pub use world::{World, scatter};
