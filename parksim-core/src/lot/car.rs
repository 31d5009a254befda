//! Car and spot classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification shared by cars and layout cells.
///
/// `Na` only appears in layouts, where it marks a cell that cannot host
/// any car. Cars are always one of the four remaining types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarType {
    /// Not assignable
    Na,
    /// Electric vehicle, or a charging spot reserved for one
    Electric,
    /// Compact car
    Small,
    /// Standard car
    Regular,
    /// Oversized vehicle
    Large,
}

impl CarType {
    /// Every type a car can have, in the order random cars draw from.
    pub const CAR_TYPES: [CarType; 4] = [
        CarType::Electric,
        CarType::Small,
        CarType::Regular,
        CarType::Large,
    ];

    /// Parses a layout label, either short (`E`) or full (`ELECTRIC`).
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "N" | "NA" => Some(CarType::Na),
            "E" | "ELECTRIC" => Some(CarType::Electric),
            "S" | "SMALL" => Some(CarType::Small),
            "R" | "REGULAR" => Some(CarType::Regular),
            "L" | "LARGE" => Some(CarType::Large),
            _ => None,
        }
    }

    /// Short label used when rendering a layout.
    pub fn label(self) -> &'static str {
        match self {
            CarType::Na => "N",
            CarType::Electric => "E",
            CarType::Small => "S",
            CarType::Regular => "R",
            CarType::Large => "L",
        }
    }

    /// Returns true for the layout marker that never hosts a car.
    pub fn is_na(self) -> bool {
        self == CarType::Na
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CarType::Na => "NA",
            CarType::Electric => "ELECTRIC",
            CarType::Small => "SMALL",
            CarType::Regular => "REGULAR",
            CarType::Large => "LARGE",
        };
        f.write_str(name)
    }
}

/// A car looking for, or occupying, a spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    id: u64,
    car_type: CarType,
}

impl Car {
    /// Creates a car with the given identity and type.
    pub fn new(id: u64, car_type: CarType) -> Self {
        Self { id, car_type }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn car_type(&self) -> CarType {
        self.car_type
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} car #{}", self.car_type, self.id)
    }
}
