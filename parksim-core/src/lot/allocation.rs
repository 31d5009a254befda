//! Spot selection strategies for arriving cars.

use super::car::Car;
use super::compatibility::preference_rank;
use super::parking_lot::ParkingLot;
use super::spot::SpotPosition;

/// Chooses where an arriving car should park.
///
/// Implementations only select; the lot records the occupancy.
pub trait AllocationPolicy {
    /// Returns the chosen free, eligible cell, or `None` if there is none.
    fn select_spot(&self, lot: &ParkingLot, car: &Car) -> Option<SpotPosition>;
}

/// Best-fit allocation over the whole lot.
///
/// Scans every cell once in row-major order and keeps the free, eligible
/// cell whose spot type ranks highest in the car's preference order. A
/// candidate is only displaced by a strictly better one, so ties go to
/// the first cell encountered.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFitPolicy;

impl AllocationPolicy for BestFitPolicy {
    fn select_spot(&self, lot: &ParkingLot, car: &Car) -> Option<SpotPosition> {
        let mut best: Option<(usize, SpotPosition)> = None;

        for (position, spot_type) in lot.layout().cells() {
            if lot.is_occupied(position) {
                continue;
            }
            let Some(rank) = preference_rank(spot_type, car.car_type()) else {
                continue;
            };

            if best.is_none_or(|(best_rank, _)| rank < best_rank) {
                best = Some((rank, position));
                if rank == 0 {
                    // Nothing can beat a first choice, and ties keep the earliest.
                    break;
                }
            }
        }

        best.map(|(_, position)| position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::{CarType, LotLayout};

    fn lot(text: &str) -> ParkingLot {
        ParkingLot::new(LotLayout::parse(text).unwrap())
    }

    fn select(lot: &ParkingLot, car_type: CarType) -> Option<SpotPosition> {
        BestFitPolicy.select_spot(lot, &Car::new(1, car_type))
    }

    #[test]
    fn test_small_car_prefers_small_over_earlier_regular() {
        let lot = lot("L, R\nR, S\n");
        assert_eq!(select(&lot, CarType::Small), Some(SpotPosition::new(1, 1)));
    }

    #[test]
    fn test_electric_car_falls_back_to_small() {
        let lot = lot("L, R, S\n");
        assert_eq!(
            select(&lot, CarType::Electric),
            Some(SpotPosition::new(0, 2))
        );
    }

    #[test]
    fn test_regular_car_keeps_regular_over_later_large() {
        let lot = lot("N, R\nL, L\n");
        assert_eq!(
            select(&lot, CarType::Regular),
            Some(SpotPosition::new(0, 1))
        );
    }

    #[test]
    fn test_regular_car_uses_large_when_no_regular_exists() {
        let lot = lot("S, E\nS, L\n");
        assert_eq!(
            select(&lot, CarType::Regular),
            Some(SpotPosition::new(1, 1))
        );
    }

    #[test]
    fn test_large_car_takes_first_large() {
        let lot = lot("R, L\nL, R\n");
        assert_eq!(select(&lot, CarType::Large), Some(SpotPosition::new(0, 1)));
    }

    #[test]
    fn test_scan_covers_rows_after_the_first() {
        let lot = lot("E, E, E\nN, N, N\nR, N, N\n");
        assert_eq!(
            select(&lot, CarType::Regular),
            Some(SpotPosition::new(2, 0))
        );
    }

    #[test]
    fn test_ties_go_to_first_in_scan_order() {
        let lot = lot("R, S\nS, R\n");
        assert_eq!(select(&lot, CarType::Small), Some(SpotPosition::new(0, 1)));
    }

    #[test]
    fn test_occupied_cells_are_skipped() {
        let mut lot = lot("S, S, R\n");
        lot.park(SpotPosition::new(0, 0), Car::new(9, CarType::Small), 0)
            .unwrap();

        assert_eq!(select(&lot, CarType::Small), Some(SpotPosition::new(0, 1)));
    }

    #[test]
    fn test_no_eligible_spot() {
        let lot = lot("E, S\nN, R\n");
        assert_eq!(select(&lot, CarType::Large), None);
    }
}
