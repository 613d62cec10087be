//! # chaperone - interactive play-space boundary calibration for OpenVR
//!
//! Walk a tracked controller to each corner of your physical play area,
//! pull the trigger at every one, and get the `collision_bounds` vertex
//! list SteamVR's chaperone_info format expects. Provides:
//! - A single-threaded, poll-driven acquisition workflow (select a
//!   controller, record corners, menu finishes, grip restarts)
//! - Edge-triggered button handling and pose-quality validation
//! - Wall-segment geometry generation with the stock 2.43 m ceiling
//!
//! The OpenVR connection lives behind the `openvr` feature; everything
//! else runs against the [`TrackingSystem`] trait, so the whole workflow
//! is testable with scripted devices and a virtual clock.
//!
//! ## Quick Start
//! ```no_run
//! # #[cfg(feature = "openvr")] {
//! use chaperone::clock::IntervalTicker;
//! use chaperone::runtime::OpenVrSystem;
//! use chaperone::{acquire, bounds, TrackingSystem};
//!
//! let system = OpenVrSystem::connect().unwrap();
//! println!("origin: {}", system.origin_mode());
//!
//! let mut ticker = IntervalTicker::default();
//! let candidates = acquire::wait_for_controllers(&system, &mut ticker);
//! let active = acquire::select_controller(&system, &mut ticker, &candidates);
//! acquire::await_trigger_release(&system, &mut ticker, active);
//!
//! let session = acquire::collect(&system, &mut ticker, active);
//! let walls = bounds::collision_bounds(&session.into_points().unwrap());
//! print!("{}", bounds::render_collision_bounds(&walls));
//! # }
//! ```

pub mod error;
pub mod types;
pub mod debounce;
pub mod system;
pub mod clock;
pub mod acquire;
pub mod bounds;
#[cfg(feature = "openvr")]
pub mod runtime;

pub use acquire::CalibrationSession;
pub use error::ChaperoneError;
pub use system::TrackingSystem;
pub use types::*;

/// Result type alias for chaperone operations.
pub type Result<T> = std::result::Result<T, ChaperoneError>;
