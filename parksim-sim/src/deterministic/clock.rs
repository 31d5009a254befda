//! Time control and random number generation for deterministic simulations.

use std::collections::VecDeque;

use parksim_core::CarType;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic clock counting simulated seconds.
///
/// Time only moves forward, one tick at a time, and is independent of
/// wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    current: u64,
}

impl SimulationClock {
    /// Creates new clock starting at simulation time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns current simulation time in seconds.
    pub fn now(&self) -> u64 {
        self.current
    }

    /// Advances simulation time by one second.
    pub fn advance(&mut self) {
        self.current += 1;
    }
}

/// Source of every random decision the engine makes.
///
/// The engine only consumes draws through this trait, so tests can supply
/// scripted outcomes instead of a seeded generator.
pub trait RandomSource {
    /// Runs a Bernoulli trial with the given success probability.
    ///
    /// Probabilities at or below zero never succeed; at or above one always do.
    fn event_occurred(&mut self, probability: f64) -> bool;

    /// Picks the type of a newly arrived car.
    fn random_car_type(&mut self) -> CarType;
}

/// Deterministic random number generator for reproducible simulations.
///
/// Uses ChaCha8 algorithm for fast, high-quality pseudorandom numbers
/// with deterministic seed-based generation.
#[derive(Debug)]
pub struct DeterministicRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DeterministicRng {
    /// Creates deterministic RNG from seed value.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for this RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates random number in range [0, 1).
    pub fn random_f64(&mut self) -> f64 {
        // 53 high bits, so the result is strictly below 1.0
        (self.rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generates random number in range [min, max).
    pub fn random_range(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        min + (self.rng.next_u64() % (max - min))
    }

    /// Selects random element from slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let index = self.random_range(0, slice.len() as u64) as usize;
            Some(&slice[index])
        }
    }
}

impl RandomSource for DeterministicRng {
    fn event_occurred(&mut self, probability: f64) -> bool {
        self.random_f64() < probability
    }

    fn random_car_type(&mut self) -> CarType {
        self.choose(&CarType::CAR_TYPES)
            .copied()
            .unwrap_or(CarType::Regular)
    }
}

/// Random source replaying scripted outcomes.
///
/// Bernoulli trials consume `outcomes` front to back and fall back to
/// `default_outcome` once exhausted; car types work the same way. Every
/// requested probability is recorded for later inspection.
#[derive(Debug, Clone)]
pub struct ScriptedRandomSource {
    outcomes: VecDeque<bool>,
    car_types: VecDeque<CarType>,
    default_outcome: bool,
    default_car_type: CarType,
    requested_probabilities: Vec<f64>,
}

impl ScriptedRandomSource {
    /// Creates a source whose every trial returns `default_outcome`.
    pub fn always(default_outcome: bool) -> Self {
        Self {
            outcomes: VecDeque::new(),
            car_types: VecDeque::new(),
            default_outcome,
            default_car_type: CarType::Regular,
            requested_probabilities: Vec::new(),
        }
    }

    /// Queues trial outcomes to return before the default.
    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.outcomes.extend(outcomes);
        self
    }

    /// Queues car types to hand out before the default.
    pub fn with_car_types(mut self, car_types: impl IntoIterator<Item = CarType>) -> Self {
        self.car_types.extend(car_types);
        self
    }

    /// Sets the car type returned once the queue is exhausted.
    pub fn with_default_car_type(mut self, car_type: CarType) -> Self {
        self.default_car_type = car_type;
        self
    }

    /// Probabilities passed to every trial so far, in call order.
    pub fn requested_probabilities(&self) -> &[f64] {
        &self.requested_probabilities
    }
}

impl RandomSource for ScriptedRandomSource {
    fn event_occurred(&mut self, probability: f64) -> bool {
        self.requested_probabilities.push(probability);
        self.outcomes.pop_front().unwrap_or(self.default_outcome)
    }

    fn random_car_type(&mut self) -> CarType {
        self.car_types
            .pop_front()
            .unwrap_or(self.default_car_type)
    }
}
