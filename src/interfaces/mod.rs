use serde::Serialize;

pub mod command_line;

/// Messages reported to the user while the search runs
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Initialized {
        population: usize,
        best_fitness: f64,
    },
    Progress {
        generation: usize,
        best_fitness: f64,
        average_fitness: f64,
    },
    BetterSolution {
        generation: usize,
        fitness: f64,
        metric: String,
    },
    Terminated {
        generation: usize,
        reason: String,
    },
    Elapsed {
        micros: u64,
    },
}

/// Output channel for progress reports, so the command line and tests can consume the
/// same messages in their own way.
///
/// Implementors only need `post`.
pub trait Interface {
    fn post(&self, message: Message);
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Interface for Silent {
    fn post(&self, _message: Message) {}
}
