use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use timetable::config::Config;
use timetable::data::Dataset;
use timetable::objectives::default::DefaultObjective;
use timetable::objectives::Objective;
use timetable::operators::default::DefaultOperators;
use timetable::operators::{Crossover, Initialize, Mutate};
use timetable::synthetic;

fn setup() -> (Dataset, Config, StdRng) {
    let mut rng = StdRng::seed_from_u64(42);
    let dataset = synthetic::dataset(&mut rng).unwrap();
    (dataset, Config::default(), rng)
}

fn evaluate(c: &mut Criterion) {
    let (dataset, config, mut rng) = setup();
    let objective = DefaultObjective::new(&dataset, config.weights);
    let operators = DefaultOperators::new(&dataset, &config.genetic);
    let schedule = operators.initialize(&mut rng);
    c.bench_function("evaluate", |b| {
        b.iter(|| objective.evaluate(black_box(&schedule)))
    });
}

fn mutate(c: &mut Criterion) {
    let (dataset, config, mut rng) = setup();
    let objective = DefaultObjective::new(&dataset, config.weights);
    let operators = DefaultOperators::new(&dataset, &config.genetic);
    let schedule = operators.initialize(&mut rng);
    c.bench_function("mutate", |b| {
        b.iter(|| {
            let mut child = schedule.clone();
            operators.mutate(&mut child, &mut rng);
            objective.score(&mut child)
        })
    });
}

fn crossover(c: &mut Criterion) {
    let (dataset, config, mut rng) = setup();
    let objective = DefaultObjective::new(&dataset, config.weights);
    let operators = DefaultOperators::new(&dataset, &config.genetic);
    let first = operators.initialize(&mut rng);
    let second = operators.initialize(&mut rng);
    c.bench_function("crossover", |b| {
        b.iter(|| {
            let mut child = operators.crossover(&first, &second, &mut rng);
            objective.score(&mut child)
        })
    });
}

criterion_group!(benches, evaluate, mutate, crossover);
criterion_main!(benches);
