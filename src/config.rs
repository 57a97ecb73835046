//! Run configuration, read from a YAML file.
//!
//! Every field has a default, so an absent file or a partial file is fine.

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    pub gap: f64,
    pub overload: f64,
    pub subject_deviation: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            gap: 1.0,
            overload: 2.0,
            subject_deviation: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Chance that a slot of the next generation is filled by a fresh random individual
    pub injection_rate: f64,
    /// Chance that a crossover child is mutated instead of being screened
    pub mutation_rate: f64,
    /// Chance of copying a slot from the first parent during crossover
    pub crossover_bias: f64,
    pub micro_mutations: usize,
    /// Rejected children tolerated in a row before one is accepted anyway
    pub max_acceptance_retries: usize,
    pub report_interval: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            injection_rate: 0.1,
            mutation_rate: 0.7,
            crossover_bias: 0.5,
            micro_mutations: 5,
            max_acceptance_retries: 32,
            report_interval: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub auditoriums: PathBuf,
    pub groups: PathBuf,
    pub lecturers: PathBuf,
    pub subjects: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            auditoriums: PathBuf::from("auditoriums.csv"),
            groups: PathBuf::from("groups.csv"),
            lecturers: PathBuf::from("lecturers.csv"),
            subjects: PathBuf::from("subjects.csv"),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub population_size: usize,
    pub generations: usize,
    pub seed: Option<u64>,
    pub weights: PenaltyWeights,
    pub genetic: GeneticConfig,
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            seed: None,
            weights: PenaltyWeights::default(),
            genetic: GeneticConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads the file if it exists, otherwise falls back to the defaults
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| format!("{}: {}", path.display(), e).into())
    }

    /// Settings that make scheduling impossible are rejected before any work starts
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        let genetic = &self.genetic;
        for (name, rate) in [
            ("injection_rate", genetic.injection_rate),
            ("mutation_rate", genetic.mutation_rate),
            ("crossover_bias", genetic.crossover_bias),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must lie in [0, 1], got {rate}").into());
            }
        }
        let weights = &self.weights;
        if [weights.gap, weights.overload, weights.subject_deviation]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err("penalty weights must be finite and non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "population_size: 8\nweights:\n  overload: 5\ngenetic:\n  micro_mutations: 2\n",
        )
        .unwrap();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.generations, 100);
        assert_eq!(config.weights.overload, 5.0);
        assert_eq!(config.weights.gap, 1.0);
        assert_eq!(config.genetic.micro_mutations, 2);
        assert_eq!(config.genetic.mutation_rate, 0.7);
        assert_eq!(config.input.groups, PathBuf::from("groups.csv"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load(Path::new("definitely/not/here.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn impossible_settings_fail_fast() {
        let mut config = Config::default();
        config.population_size = 0;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.genetic.mutation_rate = 1.5;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.weights.gap = -1.0;
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
