//! Core simulation engine: one tick per simulated second.

use std::sync::Arc;

use parksim_core::{BestFitPolicy, Car, ParkingLot, SimulationConfig, Spot, SpotPosition};
use serde::Serialize;
use thiserror::Error;

use super::clock::{DeterministicRng, RandomSource, SimulationClock};
use super::events::{DepartureCause, LotEvent};
use super::invariants::{Invariant, default_invariants};
use super::state::SimulationMetrics;
use crate::departure::TriangularDistribution;
use crate::queue::SpotQueue;

/// Maximum number of invariant violations before stopping simulation.
const MAX_INVARIANT_VIOLATIONS: usize = 10;

/// Errors that can occur during simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Deterministic seed required but not provided
    #[error("No deterministic seed provided")]
    NoDeterministicSeed,

    /// Configuration cannot drive a simulation
    #[error("Invalid simulation configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected
        reason: String,
    },

    /// Tick requested after the configured horizon
    #[error("Simulation already finished after {steps} steps")]
    Finished {
        /// Configured step count
        steps: u64,
    },

    /// Too many invariant violations occurred
    #[error("Too many invariant violations: {count}")]
    TooManyInvariantViolations {
        /// Number of violations that occurred
        count: usize,
    },
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Seed used for reproduction, when the run was seeded
    pub seed: Option<u64>,
    /// Configured number of steps
    pub steps: u64,
    /// Clock value when the report was taken
    pub clock: u64,
    /// Parkable cells in the lot
    pub capacity: usize,
    /// Cars still parked
    pub final_occupancy: usize,
    /// Cars still waiting to enter
    pub incoming_backlog: usize,
    /// Departed cars not yet drained
    pub outgoing_backlog: usize,
    /// Collected metrics
    pub metrics: SimulationMetrics,
    /// Whether simulation completed without invariant violations
    pub success: bool,
}

impl SimulationReport {
    /// Generates human-readable summary.
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        match self.seed {
            Some(seed) => summary.push_str(&format!("Simulation Report (seed: {seed})\n")),
            None => summary.push_str("Simulation Report (unseeded)\n"),
        }
        summary.push_str(&format!("Steps: {} (clock {})\n", self.steps, self.clock));
        summary.push_str(&format!("Success: {}\n\n", self.success));
        summary.push_str(&self.metrics.summary());

        if !self.metrics.invariant_violations.is_empty() {
            summary.push_str("\nInvariant violations:\n");
            for violation in &self.metrics.invariant_violations {
                summary.push_str(&format!("  - {violation}\n"));
            }
        }

        summary.push_str(&format!(
            "\nFinal state:\n  Occupancy: {}/{}\n  Incoming queue: {}\n  Outgoing queue: {}\n",
            self.final_occupancy, self.capacity, self.incoming_backlog, self.outgoing_backlog
        ));

        summary
    }
}

/// Discrete-time parking lot simulation.
///
/// Each tick runs, in order: arrival trial, departure scan, admission of
/// the incoming queue head, drain of one outgoing entry, clock advance.
pub struct ParkingSimulation<R: RandomSource = DeterministicRng> {
    /// Configuration
    config: SimulationConfig,
    /// Lot being simulated
    lot: ParkingLot,
    /// Controlled clock
    clock: SimulationClock,
    /// Source of every random draw
    rng: R,
    /// Seed behind `rng`, if known
    seed: Option<u64>,
    /// Departure curve over dwell time
    departure: TriangularDistribution,
    /// Cars waiting to enter
    incoming: SpotQueue,
    /// Cars that left their spot and await reporting
    outgoing: SpotQueue,
    /// Identity for the next arriving car
    next_car_id: u64,
    /// Metrics collector
    metrics: SimulationMetrics,
    /// Active invariants
    invariants: Vec<Arc<dyn Invariant>>,
}

impl ParkingSimulation<DeterministicRng> {
    /// Creates a seeded simulation over `lot`.
    ///
    /// # Errors
    /// - `SimulationError::NoDeterministicSeed` - No seed provided in config
    /// - `SimulationError::InvalidConfiguration` - Config fails validation
    pub fn new(lot: ParkingLot, config: SimulationConfig) -> Result<Self, SimulationError> {
        let seed = config
            .deterministic_seed
            .ok_or(SimulationError::NoDeterministicSeed)?;

        let mut simulation =
            Self::with_random_source(lot, config, DeterministicRng::from_seed(seed))?;
        simulation.seed = Some(seed);
        Ok(simulation)
    }
}

impl<R: RandomSource> ParkingSimulation<R> {
    /// Creates a simulation drawing randomness from `rng`.
    ///
    /// # Errors
    /// - `SimulationError::InvalidConfiguration` - Config fails validation
    pub fn with_random_source(
        lot: ParkingLot,
        config: SimulationConfig,
        rng: R,
    ) -> Result<Self, SimulationError> {
        config
            .validate()
            .map_err(|e| SimulationError::InvalidConfiguration {
                reason: e.to_string(),
            })?;

        let invariants = if config.check_invariants {
            default_invariants()
        } else {
            Vec::new()
        };

        Ok(Self {
            departure: TriangularDistribution::for_max_duration(config.max_parking_duration),
            config,
            lot,
            clock: SimulationClock::new(),
            rng,
            seed: None,
            incoming: SpotQueue::new(),
            outgoing: SpotQueue::new(),
            next_car_id: 1,
            metrics: SimulationMetrics::new(),
            invariants,
        })
    }

    /// Adds an invariant to check after every tick.
    pub fn add_invariant(&mut self, invariant: Arc<dyn Invariant>) {
        self.invariants.push(invariant);
    }

    /// Returns current simulation time.
    pub fn clock(&self) -> u64 {
        self.clock.now()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    pub fn incoming_queue(&self) -> &SpotQueue {
        &self.incoming
    }

    pub fn outgoing_queue(&self) -> &SpotQueue {
        &self.outgoing
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    pub fn random_source(&self) -> &R {
        &self.rng
    }

    /// Returns true once the clock has reached the configured step count.
    pub fn is_finished(&self) -> bool {
        self.clock.now() >= self.config.steps
    }

    /// Runs the remaining ticks and reports the final state.
    ///
    /// Cars still parked or queued at the end are left in place.
    ///
    /// # Errors
    /// - `SimulationError::TooManyInvariantViolations` - Too many invariant violations
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        while !self.is_finished() {
            self.tick()?;
        }
        Ok(self.report())
    }

    /// Runs one simulated second and returns what happened in it.
    ///
    /// # Errors
    /// - `SimulationError::Finished` - Clock already reached the step count
    /// - `SimulationError::TooManyInvariantViolations` - Too many invariant violations
    pub fn tick(&mut self) -> Result<Vec<LotEvent>, SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::Finished {
                steps: self.config.steps,
            });
        }

        let now = self.clock.now();
        let mut events = Vec::new();

        self.process_arrival(now, &mut events);
        self.process_departures(now, &mut events);
        self.process_admission(now, &mut events);
        self.process_exit(now, &mut events);

        for event in &events {
            tracing::info!("{event}");
            self.metrics.record_event(event);
        }
        self.metrics
            .update_peaks(self.lot.total_occupancy(), self.incoming.len());

        self.check_invariants(now)?;
        self.clock.advance();

        Ok(events)
    }

    /// Generates simulation report for the current state.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            seed: self.seed,
            steps: self.config.steps,
            clock: self.clock.now(),
            capacity: self.lot.total_capacity(),
            final_occupancy: self.lot.total_occupancy(),
            incoming_backlog: self.incoming.len(),
            outgoing_backlog: self.outgoing.len(),
            metrics: self.metrics.clone(),
            success: self.metrics.invariant_violations.is_empty(),
        }
    }

    fn process_arrival(&mut self, now: u64, events: &mut Vec<LotEvent>) {
        if !self.rng.event_occurred(self.config.arrival_probability()) {
            return;
        }

        let car = Car::new(self.next_car_id, self.rng.random_car_type());
        self.next_car_id += 1;
        self.incoming.enqueue(Spot::new(car.clone(), now));
        events.push(LotEvent::Arrived { car, clock: now });
    }

    fn process_departures(&mut self, now: u64, events: &mut Vec<LotEvent>) {
        let parked: Vec<(SpotPosition, u64)> = self
            .lot
            .occupied_spots()
            .map(|(position, spot)| (position, spot.dwell(now)))
            .collect();

        for (position, dwell) in parked {
            let cause = if dwell >= self.config.max_parking_duration {
                DepartureCause::Forced
            } else if self
                .rng
                .event_occurred(self.departure.departure_probability(dwell))
            {
                DepartureCause::Random
            } else {
                continue;
            };

            let Ok(spot) = self.lot.remove(position) else {
                continue;
            };
            events.push(LotEvent::Departed {
                car: spot.car().clone(),
                clock: now,
                position,
                dwell,
                cause,
                occupancy: self.lot.total_occupancy(),
            });
            self.outgoing.enqueue(spot);
        }
    }

    fn process_admission(&mut self, now: u64, events: &mut Vec<LotEvent>) {
        let Some(head) = self.incoming.peek() else {
            return;
        };
        let car = head.car().clone();
        let queued_at = head.timestamp();

        let Some(position) = self.lot.attempt_parking_with(&BestFitPolicy, &car, now) else {
            tracing::trace!("{car} still waiting at the head of the queue");
            return;
        };

        self.incoming.dequeue();
        events.push(LotEvent::Entered {
            car,
            clock: now,
            position,
            waited: now - queued_at,
            occupancy: self.lot.total_occupancy(),
        });
    }

    fn process_exit(&mut self, now: u64, events: &mut Vec<LotEvent>) {
        if let Some(spot) = self.outgoing.dequeue() {
            events.push(LotEvent::Exited {
                car: spot.into_car(),
                clock: now,
                occupancy: self.lot.total_occupancy(),
            });
        }
    }

    /// Checks all invariants.
    fn check_invariants(&mut self, now: u64) -> Result<(), SimulationError> {
        for invariant in &self.invariants {
            if let Err(violation) = invariant.check(&self.lot, now) {
                tracing::error!("{violation}");
                self.metrics.record_invariant_violation(violation);

                if self.metrics.invariant_violations.len() >= MAX_INVARIANT_VIOLATIONS {
                    return Err(SimulationError::TooManyInvariantViolations {
                        count: self.metrics.invariant_violations.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
