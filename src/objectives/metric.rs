// Penalty breakdown of a schedule and how it is printed to the command line

use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metric {
    /// Free periods between lessons of the same day, summed over groups and lecturers
    pub gaps: u32,
    /// Lessons assigned beyond the lecturers' weekly limits
    pub overload: u32,
    /// Missing or surplus lessons against the subjects' required counts
    pub subject_deviation: u32,
    /// Weighted sum of the three counts above
    pub penalty: f64,
}

impl Metric {
    pub fn fitness(&self) -> f64 {
        1.0 / (1.0 + self.penalty)
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "gaps: {}; overload: {}; subject deviation: {}; penalty: {:.2}; fitness: {:.6}",
            self.gaps,
            self.overload,
            self.subject_deviation,
            self.penalty,
            self.fitness()
        )
    }
}
