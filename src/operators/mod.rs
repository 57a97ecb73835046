//! Operator interfaces, and the default operators (initialization, crossover, mutation)
//!

use crate::data::LecturerIndex;
use crate::schedule::Schedule;
use rand::Rng;
use rustc_hash::FxHashMap;

pub mod default;

pub trait Initialize {
    /// Builds a complete, independently owned individual
    fn initialize<R: Rng>(&self, rng: &mut R) -> Schedule;
}

pub trait Crossover {
    /// Combines two parents into a new child; the child's fitness is not computed
    fn crossover<R: Rng>(&self, first: &Schedule, second: &Schedule, rng: &mut R) -> Schedule;
}

pub trait Mutate {
    type Kind;
    /// Perturbs the schedule in place and returns which kind of mutation was applied
    fn mutate<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) -> Self::Kind;
}

/// Teaching hours handed out so far while building one schedule.
///
/// A table lives only as long as the construction of a single individual, so loads never
/// leak between individuals.
#[derive(Debug, Clone, Default)]
pub struct LoadTable {
    hours: FxHashMap<LecturerIndex, u32>,
}

impl LoadTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, lecturer: LecturerIndex) -> u32 {
        self.hours.get(&lecturer).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, lecturer: LecturerIndex) {
        *self.hours.entry(lecturer).or_insert(0) += 1;
    }

    pub fn decrement(&mut self, lecturer: LecturerIndex) {
        if let Some(hours) = self.hours.get_mut(&lecturer) {
            *hours = hours.saturating_sub(1);
        }
    }
}
