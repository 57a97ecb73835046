//! timetable builds a weekly academic timetable for student groups with a genetic algorithm.
//!
//! The library holds the domain model, the hard constraints, the penalty-based objective and the
//! evolutionary search; the `timetable` binary wraps it with CSV input, YAML configuration and
//! table output.

pub mod config;
pub mod constraints;
pub mod data;
pub mod error;
pub mod interfaces;
pub mod objectives;
pub mod operators;
pub mod optimizers;
pub mod report;
pub mod schedule;
pub mod synthetic;

pub use error::Error;

use config::Config;
use data::Dataset;
use interfaces::Interface;
use objectives::default::DefaultObjective;
use objectives::metric::Metric;
use operators::default::DefaultOperators;
use optimizers::genetic::GeneticAlgorithm;
use optimizers::OptimizationResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The run's random source: seeded when the configuration names a seed, OS entropy otherwise
pub fn rng(config: &Config) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Searches for the best schedule of `dataset` with the default objective and operators
pub fn solve<R: Rng>(
    dataset: &Dataset,
    config: &Config,
    interface: &dyn Interface,
    rng: &mut R,
) -> Result<OptimizationResult<Metric>, Error> {
    let algorithm = GeneticAlgorithm::new(config)?;
    let objective = DefaultObjective::new(dataset, config.weights);
    let operators = DefaultOperators::new(dataset, &config.genetic);
    Ok(algorithm.optimize(&objective, &operators, interface, rng))
}
