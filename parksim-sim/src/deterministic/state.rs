//! Metrics collection across a simulation run.

use std::collections::BTreeMap;

use serde::Serialize;

use super::events::{DepartureCause, LotEvent};
use super::invariants::InvariantViolation;

/// Metrics collected during simulation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationMetrics {
    /// Total events processed
    pub events_processed: u64,
    /// Events by type
    pub events_by_type: BTreeMap<String, u64>,
    /// Cars that joined the incoming queue
    pub arrivals: u64,
    /// Cars that were parked
    pub entries: u64,
    /// Departures forced by the maximum stay
    pub forced_departures: u64,
    /// Departures decided by the departure trial
    pub random_departures: u64,
    /// Cars drained from the outgoing queue
    pub exits: u64,
    /// Highest occupancy seen at the end of a tick
    pub peak_occupancy: usize,
    /// Longest the incoming queue has been
    pub peak_incoming_queue: usize,
    /// Seconds spent queueing, summed over parked cars
    pub total_wait_seconds: u64,
    /// Invariant violations detected
    pub invariant_violations: Vec<InvariantViolation>,
}

impl SimulationMetrics {
    /// Creates new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event being processed.
    pub fn record_event(&mut self, event: &LotEvent) {
        self.events_processed += 1;
        *self
            .events_by_type
            .entry(event.as_str().to_string())
            .or_insert(0) += 1;

        match event {
            LotEvent::Arrived { .. } => self.arrivals += 1,
            LotEvent::Entered { waited, .. } => {
                self.entries += 1;
                self.total_wait_seconds += waited;
            }
            LotEvent::Departed { cause, .. } => match cause {
                DepartureCause::Forced => self.forced_departures += 1,
                DepartureCause::Random => self.random_departures += 1,
            },
            LotEvent::Exited { .. } => self.exits += 1,
        }
    }

    /// Updates peak occupancy and queue length.
    pub fn update_peaks(&mut self, occupancy: usize, incoming_queue: usize) {
        self.peak_occupancy = self.peak_occupancy.max(occupancy);
        self.peak_incoming_queue = self.peak_incoming_queue.max(incoming_queue);
    }

    /// Records an invariant violation.
    pub fn record_invariant_violation(&mut self, violation: InvariantViolation) {
        self.invariant_violations.push(violation);
    }

    /// Total departures of either cause.
    pub fn departures(&self) -> u64 {
        self.forced_departures + self.random_departures
    }

    /// Mean seconds a parked car spent in the incoming queue.
    pub fn average_wait_seconds(&self) -> f64 {
        if self.entries == 0 {
            return 0.0;
        }
        self.total_wait_seconds as f64 / self.entries as f64
    }

    /// Generates summary statistics.
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!("Events processed: {}\n", self.events_processed));
        summary.push_str(&format!("Arrivals: {}\n", self.arrivals));
        summary.push_str(&format!("Entries: {}\n", self.entries));
        summary.push_str(&format!(
            "Departures: {} ({} forced)\n",
            self.departures(),
            self.forced_departures
        ));
        summary.push_str(&format!("Exits: {}\n", self.exits));
        summary.push_str(&format!("Peak occupancy: {}\n", self.peak_occupancy));
        summary.push_str(&format!(
            "Peak incoming queue: {}\n",
            self.peak_incoming_queue
        ));
        summary.push_str(&format!(
            "Average wait: {:.1}s\n",
            self.average_wait_seconds()
        ));
        summary.push_str(&format!(
            "Invariant violations: {}\n",
            self.invariant_violations.len()
        ));

        summary
    }
}
