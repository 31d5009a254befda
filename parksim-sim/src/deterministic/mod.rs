//! Deterministic simulation engine for parking lot occupancy.
//!
//! This module provides the tick loop, its controlled clock and random
//! sources, event reporting, metrics and invariant checks.

mod clock;
mod events;
mod invariants;
mod simulation;
mod state;

// Re-export core types for public API
pub use clock::{DeterministicRng, RandomSource, ScriptedRandomSource, SimulationClock};
pub use events::{DepartureCause, LotEvent};
pub use invariants::{
    CapacityInvariant, CompatibilityInvariant, Invariant, InvariantViolation, default_invariants,
};
pub use simulation::{ParkingSimulation, SimulationError, SimulationReport};
pub use state::SimulationMetrics;
