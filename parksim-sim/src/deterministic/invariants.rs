//! Invariant checking framework for simulation validation.

use std::fmt;
use std::sync::Arc;

use parksim_core::{ParkingLot, fits};
use serde::Serialize;

/// Violation of a simulation invariant.
#[derive(Debug, Clone, Serialize)]
pub struct InvariantViolation {
    /// Name of the violated invariant
    pub invariant: String,
    /// Detailed description of the violation
    pub description: String,
    /// Simulated second the violation was detected
    pub clock: u64,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invariant '{}' violated at timestamp {}: {}",
            self.invariant, self.clock, self.description
        )
    }
}

/// Trait for checking lot invariants between ticks.
pub trait Invariant: Send + Sync {
    /// Checks if invariant holds for the lot at `clock`.
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the invariant condition is not met.
    fn check(&self, lot: &ParkingLot, clock: u64) -> Result<(), InvariantViolation>;

    /// Returns name of this invariant.
    fn name(&self) -> &str;

    /// Builds a violation of this invariant.
    fn violation(&self, clock: u64, description: String) -> InvariantViolation {
        InvariantViolation {
            invariant: self.name().to_string(),
            description,
            clock,
        }
    }
}

/// Ensures every parked car fits its spot and no NA cell is occupied.
pub struct CompatibilityInvariant;

impl Invariant for CompatibilityInvariant {
    fn check(&self, lot: &ParkingLot, clock: u64) -> Result<(), InvariantViolation> {
        for (position, spot) in lot.occupied_spots() {
            let Some(spot_type) = lot.layout().spot_type(position) else {
                return Err(self.violation(clock, format!("{position} is outside the layout")));
            };
            if !fits(spot_type, spot.car().car_type()) {
                return Err(self.violation(
                    clock,
                    format!("{} parked on {spot_type} spot {position}", spot.car()),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Compatibility"
    }
}

/// Ensures occupancy never exceeds capacity and matches the grid.
pub struct CapacityInvariant;

impl Invariant for CapacityInvariant {
    fn check(&self, lot: &ParkingLot, clock: u64) -> Result<(), InvariantViolation> {
        let occupancy = lot.total_occupancy();
        let capacity = lot.total_capacity();
        if occupancy > capacity {
            return Err(self.violation(
                clock,
                format!("occupancy {occupancy} exceeds capacity {capacity}"),
            ));
        }

        let counted = lot.occupied_spots().count();
        if counted != occupancy {
            return Err(self.violation(
                clock,
                format!("occupancy counter {occupancy} disagrees with {counted} occupied cells"),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Capacity"
    }
}

/// Invariants checked when a run enables invariant checking.
pub fn default_invariants() -> Vec<Arc<dyn Invariant>> {
    vec![Arc::new(CompatibilityInvariant), Arc::new(CapacityInvariant)]
}

#[cfg(test)]
mod tests {
    use parksim_core::{Car, CarType, LotLayout, SpotPosition};

    use super::*;

    /// Fails whenever any car is parked.
    struct EmptyLotInvariant;

    impl Invariant for EmptyLotInvariant {
        fn check(&self, lot: &ParkingLot, clock: u64) -> Result<(), InvariantViolation> {
            if lot.total_occupancy() > 0 {
                return Err(self.violation(clock, "lot is not empty".to_string()));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "EmptyLot"
        }
    }

    #[test]
    fn test_default_invariants_hold_for_allocated_lot() {
        let mut lot = ParkingLot::new(LotLayout::parse("E, S, R, L\n").unwrap());
        for (id, car_type) in CarType::CAR_TYPES.into_iter().enumerate() {
            assert!(lot.attempt_parking(&Car::new(id as u64, car_type), 0));
        }

        for invariant in default_invariants() {
            assert!(invariant.check(&lot, 0).is_ok(), "{}", invariant.name());
        }
    }

    #[test]
    fn test_violation_carries_name_and_clock() {
        let mut lot = ParkingLot::new(LotLayout::parse("R\n").unwrap());
        lot.park(SpotPosition::new(0, 0), Car::new(1, CarType::Regular), 0)
            .unwrap();

        let violation = EmptyLotInvariant.check(&lot, 17).unwrap_err();
        assert_eq!(violation.invariant, "EmptyLot");
        assert_eq!(violation.clock, 17);
        assert_eq!(
            violation.to_string(),
            "Invariant 'EmptyLot' violated at timestamp 17: lot is not empty"
        );
    }
}
