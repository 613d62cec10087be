//! Walk your chaperone bounds: record one corner per trigger pull and
//! print the resulting `collision_bounds` fragment to stdout.
//!
//! Menu finishes the session, grip starts over. `RUST_LOG` controls
//! verbosity; `CHAPERONE_TICK_MS` overrides the 10 ms polling interval.

use std::time::Duration;

use chaperone::acquire;
use chaperone::bounds;
use chaperone::clock::{IntervalTicker, TICK_INTERVAL};
use chaperone::runtime::OpenVrSystem;
use chaperone::TrackingSystem;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> chaperone::Result<()> {
    let system = OpenVrSystem::connect()?;
    println!("Calibrating {} tracking space", system.origin_mode());
    println!();

    let mut ticker = IntervalTicker::new(tick_interval_from_env());

    println!("Waiting for controllers...");
    let candidates = acquire::wait_for_controllers(&system, &mut ticker);

    println!("Press the trigger on the controller you want to use...");
    let controller = acquire::select_controller(&system, &mut ticker, &candidates);
    acquire::await_trigger_release(&system, &mut ticker, controller);
    println!("Using controller {}", controller);

    println!("Move the controller to each corner of your play space and pull the trigger.");
    println!("Press the menu button to finish, grip to start over.");
    let session = acquire::collect(&system, &mut ticker, controller);

    let points = session.into_points()?;
    let walls = bounds::collision_bounds(&points);
    print!("{}", bounds::render_collision_bounds(&walls));
    Ok(())
}

fn tick_interval_from_env() -> Duration {
    match std::env::var("CHAPERONE_TICK_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        Some(ms) if ms > 0 => Duration::from_millis(ms),
        _ => TICK_INTERVAL,
    }
}
