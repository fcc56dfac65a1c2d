//! Herald Clock Infrastructure
//!
//! Discrete time for the simulation. A tick is a plain integer; the clock
//! only moves when the driver advances it.
//!
//! ```text
//! start ──advance──▶ start+1 ──advance──▶ ... ──▶ horizon (inclusive)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use herald_clock::SimulationClock;
//!
//! let clock = SimulationClock::new(0, 30);
//! for tick in clock.ticks() {
//!     // poll agents at `tick`
//! }
//! ```

mod simulation;

pub use simulation::SimulationClock;

// Re-export the Clock trait for convenience
pub use herald_ports::Clock;
