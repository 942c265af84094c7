//! Ballpit entry point
//!
//! Headless demo: loads settings (first argument, optional), scatters balls,
//! launches them one by one and runs the configured number of ticks.

use std::process::ExitCode;

use ballpit::Settings;
use ballpit::sim::World;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ballpit starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    let mut world = match World::from_settings(&settings) {
        Ok(world) => world,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..settings.ticks {
        let report = world.advance();
        if report.corrections > 0 || report.failures > 0 {
            log::debug!("tick {}: {:?}", world.time_ticks, report);
        }
    }

    let totals = world.totals();
    log::info!(
        "{} ticks: {} wall bounces, {} collisions, {} corrections, {} failures",
        world.time_ticks,
        totals.wall_bounces,
        totals.collisions,
        totals.corrections,
        totals.failures
    );
    for (i, ball) in world.balls.iter().enumerate() {
        println!(
            "ball {:>2}: at {} moving {} ({:?})",
            i,
            ball.location(),
            ball.movement(),
            ball.state()
        );
    }

    ExitCode::SUCCESS
}
