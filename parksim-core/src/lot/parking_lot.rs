//! Occupancy state of a parking lot.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use super::allocation::{AllocationPolicy, BestFitPolicy};
use super::car::{Car, CarType};
use super::compatibility::fits;
use super::layout::LotLayout;
use super::spot::{Spot, SpotPosition};

/// Recoverable failures of explicit park and remove requests.
///
/// None of these change lot state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccupancyError {
    /// Coordinates fall outside the grid
    #[error("No such parking index exists: {position}")]
    OutOfRange {
        /// Requested cell
        position: SpotPosition,
    },

    /// Removal requested where no car is parked
    #[error("There is no car parked at {position}")]
    Vacant {
        /// Requested cell
        position: SpotPosition,
    },

    /// Cell already holds a car
    #[error("Spot {position} is already occupied")]
    Occupied {
        /// Requested cell
        position: SpotPosition,
    },

    /// Car type is not allowed on the cell's spot type
    #[error("A {car_type} car cannot park on the {spot_type} spot at {position}")]
    Incompatible {
        /// Requested cell
        position: SpotPosition,
        /// Type of the car being parked
        car_type: CarType,
        /// Layout type of the cell
        spot_type: CarType,
    },
}

/// A fixed layout together with the car currently in each cell.
#[derive(Debug, Clone)]
pub struct ParkingLot {
    layout: LotLayout,
    occupancy: Vec<Option<Spot>>,
    occupied: usize,
}

impl ParkingLot {
    /// Creates an empty lot over `layout`.
    pub fn new(layout: LotLayout) -> Self {
        let occupancy = vec![None; layout.rows() * layout.columns()];
        Self {
            layout,
            occupancy,
            occupied: 0,
        }
    }

    /// Loads the layout at `path` and creates an empty lot over it.
    ///
    /// # Errors
    ///
    /// - `LotError::Io` - Layout file could not be read
    /// - `LotError::EmptyLayout`, `LotError::UnknownLabel`, `LotError::RowTooShort` - Malformed layout
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        LotLayout::from_file(path).map(Self::new)
    }

    pub fn layout(&self) -> &LotLayout {
        &self.layout
    }

    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    pub fn columns(&self) -> usize {
        self.layout.columns()
    }

    /// Returns the spot record at `position`, if a car is parked there.
    pub fn spot_at(&self, position: SpotPosition) -> Option<&Spot> {
        self.layout
            .index_of(position)
            .and_then(|index| self.occupancy[index].as_ref())
    }

    pub fn is_occupied(&self, position: SpotPosition) -> bool {
        self.spot_at(position).is_some()
    }

    /// Returns true if `car` may be parked at `position` right now.
    ///
    /// The cell must exist, be free, and have a spot type the car fits.
    pub fn can_park_at(&self, position: SpotPosition, car: &Car) -> bool {
        self.check_parkable(position, car).is_ok()
    }

    /// Parks `car` at an explicit cell.
    ///
    /// # Errors
    ///
    /// - `OccupancyError::OutOfRange` - Position outside the grid
    /// - `OccupancyError::Occupied` - Cell already holds a car
    /// - `OccupancyError::Incompatible` - Car does not fit the cell's spot type
    pub fn park(
        &mut self,
        position: SpotPosition,
        car: Car,
        timestamp: u64,
    ) -> Result<(), OccupancyError> {
        let index = self.check_parkable(position, &car).inspect_err(|e| {
            tracing::warn!("{e}");
        })?;

        self.occupancy[index] = Some(Spot::new(car, timestamp));
        self.occupied += 1;
        Ok(())
    }

    /// Removes and returns the car parked at `position`.
    ///
    /// # Errors
    ///
    /// - `OccupancyError::OutOfRange` - Position outside the grid
    /// - `OccupancyError::Vacant` - No car parked there
    pub fn remove(&mut self, position: SpotPosition) -> Result<Spot, OccupancyError> {
        let result = match self.layout.index_of(position) {
            None => Err(OccupancyError::OutOfRange { position }),
            Some(index) => self.occupancy[index]
                .take()
                .ok_or(OccupancyError::Vacant { position }),
        };

        match &result {
            Ok(_) => self.occupied -= 1,
            Err(e) => tracing::warn!("{e}"),
        }
        result
    }

    /// Parks `car` wherever the best-fit policy chooses.
    ///
    /// Returns false, leaving the lot untouched, when no eligible free cell exists.
    pub fn attempt_parking(&mut self, car: &Car, timestamp: u64) -> bool {
        self.attempt_parking_with(&BestFitPolicy, car, timestamp)
            .is_some()
    }

    /// Parks `car` wherever `policy` chooses and returns the chosen cell.
    pub fn attempt_parking_with<P: AllocationPolicy + ?Sized>(
        &mut self,
        policy: &P,
        car: &Car,
        timestamp: u64,
    ) -> Option<SpotPosition> {
        let position = policy.select_spot(self, car)?;
        match self.park(position, car.clone(), timestamp) {
            Ok(()) => {
                tracing::debug!("Allocated {position} to {car}");
                Some(position)
            }
            Err(_) => None,
        }
    }

    /// Number of cells that can host a car.
    pub fn total_capacity(&self) -> usize {
        self.layout.capacity()
    }

    /// Number of cells currently holding a car.
    pub fn total_occupancy(&self) -> usize {
        self.occupied
    }

    /// Iterates occupied cells in row-major order.
    pub fn occupied_spots(&self) -> impl Iterator<Item = (SpotPosition, &Spot)> + '_ {
        self.layout
            .cells()
            .zip(&self.occupancy)
            .filter_map(|((position, _), spot)| spot.as_ref().map(|spot| (position, spot)))
    }

    fn check_parkable(&self, position: SpotPosition, car: &Car) -> Result<usize, OccupancyError> {
        let index = self
            .layout
            .index_of(position)
            .ok_or(OccupancyError::OutOfRange { position })?;

        if self.occupancy[index].is_some() {
            return Err(OccupancyError::Occupied { position });
        }

        let spot_type = self
            .layout
            .spot_type(position)
            .ok_or(OccupancyError::OutOfRange { position })?;
        if !fits(spot_type, car.car_type()) {
            return Err(OccupancyError::Incompatible {
                position,
                car_type: car.car_type(),
                spot_type,
            });
        }

        Ok(index)
    }
}

impl fmt::Display for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== Lot Design ====")?;
        for row in 0..self.rows() {
            let labels: Vec<&str> = (0..self.columns())
                .map(|column| {
                    self.layout
                        .spot_type(SpotPosition::new(row, column))
                        .unwrap_or(CarType::Na)
                        .label()
                })
                .collect();
            writeln!(f, "{}", labels.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "==== Parking Occupancy ====")?;
        for (position, _) in self.layout.cells() {
            match self.spot_at(position) {
                Some(spot) => writeln!(f, "{position}: {spot}")?,
                None => writeln!(f, "{position}: Unoccupied")?,
            }
        }
        Ok(())
    }
}
