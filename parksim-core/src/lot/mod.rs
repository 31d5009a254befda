//! Parking lot model: classification, layout, occupancy and allocation.

mod allocation;
mod car;
mod compatibility;
mod layout;
mod parking_lot;
mod spot;

pub use allocation::{AllocationPolicy, BestFitPolicy};
pub use car::{Car, CarType};
pub use compatibility::{fits, preference_rank};
pub use layout::LotLayout;
pub use parking_lot::{OccupancyError, ParkingLot};
pub use spot::{Spot, SpotPosition};
