//! Objective interface, and the default fitness evaluator
//!

use crate::schedule::Schedule;
use serde::Serialize;
use std::fmt::Display;
pub mod default;
pub mod metric;

pub trait Objective {
    type Metric: Display + Clone + Serialize;

    /// Returns the penalty breakdown and the fitness in (0, 1], higher is better
    fn evaluate(&self, schedule: &Schedule) -> (Self::Metric, f64);

    /// Evaluates the schedule and stores the result as its fitness
    fn score(&self, schedule: &mut Schedule) -> f64 {
        let (_, fitness) = self.evaluate(schedule);
        schedule.set_fitness(fitness);
        fitness
    }
}
