//! Occupancy records and grid coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::car::Car;

/// Row and column of a cell in the lot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpotPosition {
    /// Parking row index
    pub row: usize,
    /// Index of the spot within the row
    pub column: usize,
}

impl SpotPosition {
    /// Creates position from row and column.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SpotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A car together with the simulated second it arrived.
///
/// Used both for occupied cells and for entries waiting in the
/// incoming and outgoing queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    car: Car,
    timestamp: u64,
}

impl Spot {
    pub fn new(car: Car, timestamp: u64) -> Self {
        Self { car, timestamp }
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    /// Simulated second the car was parked or queued.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Seconds elapsed between the timestamp and `clock`, zero if `clock` is earlier.
    pub fn dwell(&self, clock: u64) -> u64 {
        clock.saturating_sub(self.timestamp)
    }

    pub fn into_car(self) -> Car {
        self.car
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (timestamp {})", self.car, self.timestamp)
    }
}
