//! Parksim Core - Parking lot model and best-fit allocation
//!
//! This crate provides the static side of the simulation: car and spot
//! classification, layout loading, the occupancy grid with its park and
//! remove operations, the allocation policy, and configuration.

pub mod config;
pub mod lot;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::SimulationConfig;
pub use lot::{
    AllocationPolicy, BestFitPolicy, Car, CarType, LotLayout, OccupancyError, ParkingLot, Spot,
    SpotPosition, fits,
};

/// Errors raised while building a lot or its configuration.
///
/// These abort construction. Per-cell occupancy failures are reported
/// separately through [`OccupancyError`].
#[derive(Debug, thiserror::Error)]
pub enum LotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout has no rows")]
    EmptyLayout,

    #[error("Unknown spot label '{label}' at row {row}, column {column}")]
    UnknownLabel {
        label: String,
        row: usize,
        column: usize,
    },

    #[error("Row {row} has {found} spots, expected {expected}")]
    RowTooShort {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

impl LotError {
    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, LotError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, LotError>;
