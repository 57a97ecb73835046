//! Genetic algorithm

use super::{fittest, select, OptimizationResult, Termination};
use crate::config::Config;
use crate::interfaces::{Interface, Message};
use crate::objectives::Objective;
use crate::operators::{Crossover, Initialize, Mutate};
use crate::schedule::Schedule;
use crate::Error;
use rand::seq::index::sample;
use rand::Rng;
use web_time::Instant;

#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    pub population_size: usize,
    pub generations: usize,
    pub injection_rate: f64,
    pub mutation_rate: f64,
    pub max_acceptance_retries: usize,
    pub report_interval: usize,
}

impl GeneticAlgorithm {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let genetic = &config.genetic;
        Ok(Self {
            population_size: config.population_size,
            generations: config.generations,
            injection_rate: genetic.injection_rate,
            mutation_rate: genetic.mutation_rate,
            max_acceptance_retries: genetic.max_acceptance_retries,
            report_interval: genetic.report_interval.max(1),
        })
    }

    fn spawn<O, F, R>(&self, objective: &O, operators: &F, rng: &mut R) -> Schedule
    where
        O: Objective,
        F: Initialize,
        R: Rng,
    {
        let mut schedule = operators.initialize(rng);
        objective.score(&mut schedule);
        schedule
    }

    /// Two distinct survivors, or the same one twice if it is the only survivor
    fn parents<'a, R: Rng>(survivors: &'a [Schedule], rng: &mut R) -> (&'a Schedule, &'a Schedule) {
        if survivors.len() < 2 {
            return (&survivors[0], &survivors[0]);
        }
        let picked = sample(rng, survivors.len(), 2);
        (&survivors[picked.index(0)], &survivors[picked.index(1)])
    }

    /// Fills the next generation from the survivors of the current one
    fn breed<O, F, R>(&self, survivors: &[Schedule], objective: &O, operators: &F, rng: &mut R) -> Vec<Schedule>
    where
        O: Objective,
        F: Initialize + Crossover + Mutate,
        R: Rng,
    {
        let mut next = Vec::with_capacity(self.population_size);
        let mut rejections = 0;
        while next.len() < self.population_size {
            if rng.random_bool(self.injection_rate) {
                next.push(self.spawn(objective, operators, rng));
                continue;
            }
            let (first, second) = Self::parents(survivors, rng);
            let mut child = operators.crossover(first, second, rng);
            objective.score(&mut child);
            if rng.random_bool(self.mutation_rate) {
                operators.mutate(&mut child, rng);
                objective.score(&mut child);
            } else if child.fitness() < first.fitness().min(second.fitness())
                && rejections < self.max_acceptance_retries
            {
                rejections += 1;
                continue;
            }
            rejections = 0;
            next.push(child);
        }
        next
    }

    /// Runs generations until the limit is reached or a schedule without penalty shows up
    pub fn optimize<O, F, R>(
        &self,
        objective: &O,
        operators: &F,
        interface: &dyn Interface,
        rng: &mut R,
    ) -> OptimizationResult<O::Metric>
    where
        O: Objective,
        F: Initialize + Crossover + Mutate,
        R: Rng,
    {
        let mut population: Vec<Schedule> = (0..self.population_size)
            .map(|_| self.spawn(objective, operators, rng))
            .collect();
        let mut best = match fittest(&population) {
            Some(best) => best.clone(),
            None => Schedule::new(),
        };
        interface.post(Message::Initialized {
            population: population.len(),
            best_fitness: best.fitness(),
        });

        let start = Instant::now();
        let mut generation = 0;
        while generation < self.generations && best.fitness() < 1.0 {
            let survivors = select(population);
            population = self.breed(&survivors, objective, operators, rng);
            generation += 1;
            if let Some(current) = fittest(&population) {
                if current.fitness() > best.fitness() {
                    best = current.clone();
                    let (metric, _) = objective.evaluate(&best);
                    interface.post(Message::BetterSolution {
                        generation,
                        fitness: best.fitness(),
                        metric: format!("{metric}"),
                    });
                }
            }
            if generation % self.report_interval == 0 || best.fitness() == 1.0 {
                let total: f64 = population.iter().map(Schedule::fitness).sum();
                interface.post(Message::Progress {
                    generation,
                    best_fitness: best.fitness(),
                    average_fitness: total / population.len() as f64,
                });
            }
            if generation == self.report_interval {
                let micros = start.elapsed().as_micros() as u64 / self.report_interval as u64;
                interface.post(Message::Elapsed { micros });
            }
        }

        let termination = if best.fitness() == 1.0 {
            Termination::PerfectFitness
        } else {
            Termination::GenerationLimit
        };
        interface.post(Message::Terminated {
            generation,
            reason: termination.to_string(),
        });
        let (metric, fitness) = objective.evaluate(&best);
        OptimizationResult {
            schedule: best,
            metric,
            fitness,
            generations: generation,
            termination,
        }
    }
}
