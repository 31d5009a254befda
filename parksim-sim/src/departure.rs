//! Departure model: how likely a parked car is to leave in a given second.

use serde::{Deserialize, Serialize};

/// Triangular probability density over `[low, high]` peaking at `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularDistribution {
    low: f64,
    mode: f64,
    high: f64,
}

impl TriangularDistribution {
    /// Creates a distribution; callers must ensure `low < mode < high`.
    pub fn new(low: f64, mode: f64, high: f64) -> Self {
        debug_assert!(low < mode && mode < high, "invalid triangle {low}/{mode}/{high}");
        Self { low, mode, high }
    }

    /// Departure curve for a maximum stay: zero to `max`, peaking halfway.
    pub fn for_max_duration(max_parking_duration: u64) -> Self {
        let high = max_parking_duration as f64;
        Self::new(0.0, (max_parking_duration / 2) as f64, high)
    }

    /// Density at `x`; zero outside `[low, high]`.
    pub fn pdf(&self, x: f64) -> f64 {
        let Self { low, mode, high } = *self;
        if x < low || x > high {
            0.0
        } else if x < mode {
            2.0 * (x - low) / ((high - low) * (mode - low))
        } else if x == mode {
            2.0 / (high - low)
        } else {
            2.0 * (high - x) / ((high - low) * (high - mode))
        }
    }

    /// Per-second departure probability after `dwell` seconds parked.
    pub fn departure_probability(&self, dwell: u64) -> f64 {
        self.pdf(dwell as f64).clamp(0.0, 1.0)
    }
}
