use crate::config::Config;
use crate::data::{Auditorium, Dataset, Group, Lecturer, Subject};
use crate::interfaces::{Interface, Message};
use crate::objectives::metric::Metric;
use crate::optimizers::OptimizationResult;
use crate::report::Timetable;
use crate::synthetic;
use crate::Error;
use chrono::Local;
use clap::{Parser, Subcommand};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Command line arguments
#[derive(Parser, Clone, Debug)]
#[command(name = "timetable")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,
    /// Configuration file, config.yaml by default
    pub config: Option<PathBuf>,
    /// Auditorium table
    #[arg(long, value_name = "FILE")]
    pub auditoriums: Option<PathBuf>,
    /// Group table
    #[arg(long, value_name = "FILE")]
    pub groups: Option<PathBuf>,
    /// Lecturer table
    #[arg(long, value_name = "FILE")]
    pub lecturers: Option<PathBuf>,
    /// Subject table
    #[arg(long, value_name = "FILE")]
    pub subjects: Option<PathBuf>,
    #[arg(short, long)]
    pub population_size: Option<usize>,
    #[arg(short, long)]
    pub generations: Option<usize>,
    /// Seed of the random source; runs with the same seed and data give the same timetable
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Output directory, a timestamped one by default
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Evolve a timetable from the input tables and print the even-week and odd-week tables
    Optimize,
    /// Write a random starting dataset as the four input tables
    Synthesize,
}

impl CommandLineArgs {
    /// The configuration file with command line overrides applied on top
    pub fn config(&self) -> Result<Config, Error> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.yaml"));
        let mut config = Config::load(&path)?;
        if let Some(population_size) = self.population_size {
            config.population_size = population_size;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        let input = &mut config.input;
        for (field, value) in [
            (&mut input.auditoriums, &self.auditoriums),
            (&mut input.groups, &self.groups),
            (&mut input.lecturers, &self.lecturers),
            (&mut input.subjects, &self.subjects),
        ] {
            if let Some(path) = value {
                *field = path.clone();
            }
        }
        Ok(config)
    }
}

/// Reads every row of a `;`-delimited table with a header line.
///
/// A file that cannot be opened yields no rows; rows that fail to parse are skipped.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let mut reader = match ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            return vec![];
        }
    };
    reader
        .deserialize()
        .enumerate()
        .filter_map(|(index, row)| match row {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{}, row {}: {}, skipped", path.display(), index + 1, e);
                None
            }
        })
        .collect()
}

fn validate<T, E>(records: Vec<T>, origin: &str) -> Vec<E>
where
    E: TryFrom<T, Error = Error>,
{
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match E::try_from(record) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!("{}, row {}: {}, skipped", origin, index + 1, e);
                None
            }
        })
        .collect()
}

/// Valid entities from `path`, or from `fallback` when the file has none
fn load<T, E, F>(path: &Path, fallback: F) -> Vec<E>
where
    T: DeserializeOwned,
    E: TryFrom<T, Error = Error>,
    F: FnOnce() -> Vec<T>,
{
    let origin = path.display().to_string();
    let entities = validate(read_records::<T>(path), &origin);
    if !entities.is_empty() {
        return entities;
    }
    info!("no valid rows in {origin}, generating random ones");
    validate(fallback(), "generated data")
}

/// Loads the four input tables named in the configuration, synthesizing each missing one
pub fn load_dataset<R: rand::Rng>(config: &Config, rng: &mut R) -> Result<Dataset, Error> {
    let input = &config.input;
    let auditoriums: Vec<Auditorium> = load(&input.auditoriums, || synthetic::auditoriums(rng));
    let groups: Vec<Group> = load(&input.groups, || synthetic::groups(rng));
    let lecturers: Vec<Lecturer> = load(&input.lecturers, || synthetic::lecturers(rng));
    let numbers: Vec<String> = groups.iter().map(|g| g.number.clone()).collect();
    let subjects: Vec<Subject> = load(&input.subjects, || synthetic::subjects(&numbers, rng));
    Dataset::new(auditoriums, groups, lecturers, subjects)
}

fn write_table<S: Serialize>(path: &Path, rows: &[S]) -> Result<(), Error> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// The command line front end: renders progress to stdout and saves results to a directory
pub struct CommandLine {
    pub args: CommandLineArgs,
    pub output_dir: PathBuf,
}

impl CommandLine {
    pub fn new(args: CommandLineArgs) -> Result<Self, Error> {
        let output_dir = args.output.clone().unwrap_or_else(|| {
            let time = Local::now().format("%m-%d+%H_%M_%S").to_string();
            PathBuf::from(format!("output-{time}"))
        });
        create_dir_all(&output_dir)?;
        Ok(Self { args, output_dir })
    }

    /// Prints both week tables and saves them together with the penalty breakdown
    pub fn report(
        &self,
        result: &OptimizationResult<Metric>,
        dataset: &Dataset,
    ) -> Result<(), Error> {
        let timetable = Timetable::new(&result.schedule, dataset);
        println!();
        println!("{}", timetable.even);
        println!("{}", timetable.odd);
        println!("{}", result.metric);
        write_table(&self.output_dir.join("even_week.csv"), &timetable.even.rows)?;
        write_table(&self.output_dir.join("odd_week.csv"), &timetable.odd.rows)?;
        write(
            self.output_dir.join("metric.yaml"),
            serde_yaml::to_string(&result.metric)?,
        )?;
        let placements: Vec<_> = result.schedule.iter().collect();
        write(
            self.output_dir.join("schedule.json"),
            serde_json::to_string_pretty(&placements)?,
        )?;
        info!("results saved in {}", self.output_dir.display());
        Ok(())
    }

    /// Writes a random dataset as four input tables into the output directory
    pub fn synthesize<R: rand::Rng>(&self, rng: &mut R) -> Result<(), Error> {
        let groups = synthetic::groups(rng);
        let numbers: Vec<String> = groups.iter().map(|g| g.number.clone()).collect();
        write_table(&self.output_dir.join("auditoriums.csv"), &synthetic::auditoriums(rng))?;
        write_table(&self.output_dir.join("groups.csv"), &groups)?;
        write_table(&self.output_dir.join("lecturers.csv"), &synthetic::lecturers(rng))?;
        write_table(
            &self.output_dir.join("subjects.csv"),
            &synthetic::subjects(&numbers, rng),
        )?;
        info!("random dataset saved in {}", self.output_dir.display());
        Ok(())
    }
}

impl Interface for CommandLine {
    fn post(&self, message: Message) {
        match message {
            Message::Initialized {
                population,
                best_fitness,
            } => println!("Initial population of {population}, best fitness {best_fitness:.4}"),
            Message::Progress {
                generation,
                best_fitness,
                average_fitness,
            } => println!(
                "Generation {generation}: best fitness {best_fitness:.4}, average {average_fitness:.4}"
            ),
            Message::BetterSolution {
                generation,
                fitness,
                metric,
            } => println!(
                "{} generation {generation} found a better schedule, fitness {fitness:.4}: {metric}",
                Local::now().format("%H:%M:%S")
            ),
            Message::Terminated { generation, reason } => {
                println!("Stopped after {generation} generations, {reason}")
            }
            Message::Elapsed { micros } => println!("One generation takes {micros} μs"),
        }
    }
}
