//! timetable: weekly academic timetable generator [command line]
//!
//! Reads auditoriums, groups, lecturers and subjects from `;`-delimited tables, evolves a
//! timetable with a genetic algorithm and prints the even-week and odd-week tables.
//!
//! See config.yaml for the tunable parameters.

use clap::Parser;
use timetable::interfaces::command_line::{load_dataset, Command, CommandLine, CommandLineArgs};
use timetable::{rng, solve, Error};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();
    let args = CommandLineArgs::parse();
    let config = args.config()?;
    config.validate()?;
    let mut rng = rng(&config);
    let command = args.command.clone();
    let command_line = CommandLine::new(args)?;
    match command {
        Command::Optimize => {
            let dataset = load_dataset(&config, &mut rng)?;
            let result = solve(&dataset, &config, &command_line, &mut rng)?;
            command_line.report(&result, &dataset)?;
        }
        Command::Synthesize => command_line.synthesize(&mut rng)?,
    }
    Ok(())
}
