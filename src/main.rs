//! Chasing Targets entry point
//!
//! Runs a seeded episode of robots chasing bouncing targets.
//!
//! Usage: `chasing-targets [config.json] [steps]`

use chasing_targets::PlannerError;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm
}

const DEFAULT_STEPS: u64 = 200;

/// Failures of the demo binary
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("invalid steps argument {arg:?}: {source}")]
    Steps {
        arg: String,
        source: std::num::ParseIntError,
    },

    #[error(transparent)]
    Planner(#[from] PlannerError),
}

/// Episode length from the optional command-line argument
fn parse_steps(arg: Option<String>) -> Result<u64, CliError> {
    match arg {
        Some(arg) => arg
            .parse::<u64>()
            .map_err(|source| CliError::Steps { arg, source }),
        None => Ok(DEFAULT_STEPS),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), CliError> {
    use chasing_targets::sim::{World, WorldSpec};
    use chasing_targets::{Planner, PlannerConfig};

    const REPORT_EVERY: u64 = 20;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PlannerConfig::load(path)?,
        None => {
            log::info!("No config given, using defaults");
            PlannerConfig::default()
        }
    };
    let steps = parse_steps(args.next())?;

    log::info!("Chasing Targets starting ({steps} steps)...");
    let planner = Planner::new(config.clone())?;
    let spec = WorldSpec::default();
    let mut world = World::random(config, &spec)?;

    let mut closest = f64::INFINITY;
    for _ in 0..steps {
        let report = world.step(&planner)?;
        closest = closest.min(report.min_gap);
        if report.tick % REPORT_EVERY == 0 {
            log::info!(
                "tick {:>4}  min gap {:>7.3}  mean target distance {:>6.3}",
                report.tick,
                report.min_gap,
                report.mean_target_distance
            );
        }
    }

    let b = world.bounds();
    println!(
        "{} robots, {} targets in [{:.1}, {:.1}] x [{:.1}, {:.1}] after {} ticks",
        world.poses.len(),
        world.targets.len(),
        b.min.x,
        b.max.x,
        b.min.y,
        b.max.y,
        world.ticks
    );
    println!("mean target distance: {:.3}", world.mean_target_distance());
    println!("closest approach (hull gap): {closest:.3}");
    Ok(())
}
