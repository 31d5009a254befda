//! Parksim Simulation - Discrete-time occupancy simulation of a parking lot.
//!
//! Cars arrive by a Bernoulli trial each simulated second, wait in a FIFO
//! queue, are parked by best-fit allocation, and leave according to a
//! triangular departure curve with a hard maximum stay.
//!
//! # Example
//!
//! ```rust,no_run
//! use parksim_core::{ParkingLot, SimulationConfig};
//! use parksim_sim::ParkingSimulation;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lot = ParkingLot::from_file("parking.inf")?;
//! let config = SimulationConfig {
//!     hourly_arrival_rate: 11,
//!     deterministic_seed: Some(12345),
//!     ..Default::default()
//! };
//!
//! let mut sim = ParkingSimulation::new(lot, config)?;
//! let report = sim.run()?;
//! println!("Cars still queued: {}", report.incoming_backlog);
//! # Ok(())
//! # }
//! ```

pub mod departure;
pub mod deterministic;
pub mod queue;

pub use departure::TriangularDistribution;
pub use deterministic::{
    CapacityInvariant, CompatibilityInvariant, DepartureCause, DeterministicRng, Invariant,
    InvariantViolation, LotEvent, ParkingSimulation, RandomSource, ScriptedRandomSource,
    SimulationClock, SimulationError, SimulationMetrics, SimulationReport, default_invariants,
};
pub use queue::SpotQueue;
