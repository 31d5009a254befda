//! Events emitted by each simulation tick.

use std::fmt;

use parksim_core::{Car, SpotPosition};
use serde::Serialize;

/// Why a parked car left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DepartureCause {
    /// Dwell time reached the maximum parking duration
    Forced,
    /// Departure trial succeeded
    Random,
}

/// Something that happened during a tick, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LotEvent {
    /// Car showed up and joined the incoming queue
    Arrived { car: Car, clock: u64 },
    /// Car at the head of the incoming queue was parked
    Entered {
        car: Car,
        clock: u64,
        position: SpotPosition,
        waited: u64,
        occupancy: usize,
    },
    /// Car left its spot and joined the outgoing queue
    Departed {
        car: Car,
        clock: u64,
        position: SpotPosition,
        dwell: u64,
        cause: DepartureCause,
        occupancy: usize,
    },
    /// Car was drained from the outgoing queue
    Exited { car: Car, clock: u64, occupancy: usize },
}

impl LotEvent {
    /// Returns string representation of event type for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            LotEvent::Arrived { .. } => "Arrived",
            LotEvent::Entered { .. } => "Entered",
            LotEvent::Departed { .. } => "Departed",
            LotEvent::Exited { .. } => "Exited",
        }
    }

    pub fn car(&self) -> &Car {
        match self {
            LotEvent::Arrived { car, .. }
            | LotEvent::Entered { car, .. }
            | LotEvent::Departed { car, .. }
            | LotEvent::Exited { car, .. } => car,
        }
    }
}

impl fmt::Display for LotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotEvent::Arrived { car, clock } => {
                write!(f, "{car} arrived at timestamp {clock}")
            }
            LotEvent::Entered {
                car,
                clock,
                position,
                occupancy,
                ..
            } => write!(
                f,
                "{car} entered {position} at timestamp {clock}; occupancy is at {occupancy}"
            ),
            LotEvent::Departed {
                car,
                clock,
                cause,
                occupancy,
                ..
            } => {
                let how = match cause {
                    DepartureCause::Forced => " (maximum stay reached)",
                    DepartureCause::Random => "",
                };
                write!(
                    f,
                    "{car} left its spot at timestamp {clock}{how}; occupancy is at {occupancy}"
                )
            }
            LotEvent::Exited {
                car,
                clock,
                occupancy,
            } => write!(
                f,
                "{car} EXITED at timestamp {clock}; occupancy is at {occupancy}"
            ),
        }
    }
}
