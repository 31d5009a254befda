//! Which spot types each car type may use, and in what order of preference.
//!
//! The table is ordered best-first, so membership answers "does it fit" and
//! position answers "how good is the fit". ELECTRIC spots are reserved for
//! electric cars; LARGE spots accept everyone but are always a last resort.

use super::car::CarType;

/// Eligible spot types per car type, most preferred first.
fn eligible_spots(car_type: CarType) -> &'static [CarType] {
    match car_type {
        CarType::Electric => &[
            CarType::Electric,
            CarType::Small,
            CarType::Regular,
            CarType::Large,
        ],
        CarType::Small => &[CarType::Small, CarType::Regular, CarType::Large],
        CarType::Regular => &[CarType::Regular, CarType::Large],
        CarType::Large => &[CarType::Large],
        CarType::Na => &[],
    }
}

/// Returns true if a car of `car_type` may park in a spot of `spot_type`.
///
/// `CarType::Na` never fits on either side.
pub fn fits(spot_type: CarType, car_type: CarType) -> bool {
    preference_rank(spot_type, car_type).is_some()
}

/// Position of `spot_type` in the car's preference order, 0 being best.
///
/// Returns `None` when the spot is not eligible for the car at all.
pub fn preference_rank(spot_type: CarType, car_type: CarType) -> Option<usize> {
    eligible_spots(car_type)
        .iter()
        .position(|&eligible| eligible == spot_type)
}
