use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use crate::config::{Config, Scenario};
use crate::demo::Demo;

mod config;
mod demo;

/// Replays ring buffer scenarios and prints the contents after each step
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[arg(long, value_enum, default_value_t)]
    scenario: Scenario,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write a full trace log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            scenario: cli.scenario,
            verbosity: cli.verbose,
            log_file: cli.log_file,
        }
    }
}

fn main() -> ExitCode {
    color_backtrace::install();
    let config = Config::from(Cli::parse());

    if let Err(err) = init_logging(&config) {
        eprintln!("failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }

    let demo = Demo::new(config.scenario);
    match demo.run(&mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("failed to write output: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config) -> io::Result<()> {
    let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level(),
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_file {
        loggers.push(WriteLogger::new(LevelFilter::Trace, log_config, File::create(path)?));
    }

    CombinedLogger::init(loggers).map_err(io::Error::other)
}
