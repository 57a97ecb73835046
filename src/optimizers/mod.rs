//! Optimization methods, and the result they hand back
//!

use crate::schedule::Schedule;
use serde::Serialize;
use std::fmt::Display;
pub mod genetic;

/// Why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    GenerationLimit,
    PerfectFitness,
}

impl Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GenerationLimit => f.write_str("generation limit reached"),
            Self::PerfectFitness => f.write_str("perfect fitness reached"),
        }
    }
}

pub struct OptimizationResult<M> {
    pub schedule: Schedule,
    pub metric: M,
    pub fitness: f64,
    pub generations: usize,
    pub termination: Termination,
}

/// Keeps the better half of the population, best first
pub fn select(mut population: Vec<Schedule>) -> Vec<Schedule> {
    let survivors = population.len() / 2;
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    population.truncate(survivors);
    population
}

/// The first individual with the highest fitness
pub fn fittest(population: &[Schedule]) -> Option<&Schedule> {
    population.iter().fold(None, |best: Option<&Schedule>, x| match best {
        Some(b) if b.fitness() >= x.fitness() => Some(b),
        _ => Some(x),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(fitness: &[f64]) -> Vec<Schedule> {
        fitness
            .iter()
            .map(|f| {
                let mut schedule = Schedule::new();
                schedule.set_fitness(*f);
                schedule
            })
            .collect()
    }

    #[test]
    fn selection_keeps_the_better_half_sorted() {
        for size in 2..9 {
            let fitness: Vec<f64> = (0..size).map(|i| ((i * 7) % 5) as f64 / 10.0 + 0.1).collect();
            let survivors = select(population(&fitness));
            assert_eq!(survivors.len(), size / 2);
            assert!(survivors
                .windows(2)
                .all(|w| w[0].fitness() >= w[1].fitness()));
            let mut sorted = fitness.clone();
            sorted.sort_by(|a, b| b.total_cmp(a));
            assert_eq!(survivors[0].fitness(), sorted[0]);
        }
    }

    #[test]
    fn fittest_prefers_the_first_of_equals() {
        let mut individuals = population(&[0.2, 0.5, 0.5]);
        individuals[2].insert(
            crate::schedule::TimeSlot::from_index(0),
            crate::schedule::Lesson::new(0, crate::data::LessonType::Lecture, 0, None),
        );
        let best = fittest(&individuals).unwrap();
        assert_eq!(best.fitness(), 0.5);
        assert!(best.is_empty());
        assert!(fittest(&[]).is_none());
    }
}
