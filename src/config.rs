use std::path::PathBuf;

use clap::ValueEnum;
use log::LevelFilter;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Overflow, pop from both ends, refill, then push to the front of a full buffer
    #[default]
    Overwrite,
    /// Build from an initial list, then fill the last free slot
    Initializer,
}

#[derive(Default)]
pub struct Config {
    pub scenario: Scenario,
    pub verbosity: u8,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
