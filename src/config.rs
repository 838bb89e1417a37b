//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{
    state::TargetInstant,
    tasks::{CountdownSettings, DEFAULT_TERMINAL_MESSAGE},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "match-countdown")]
#[command(about = "Count down to a scheduled match")]
#[command(version)]
pub struct Config {
    /// Instant to count down to, e.g. 2025-03-01T18:00:00+01:00.
    /// Without an offset the local timezone is used.
    pub target: TargetInstant,

    /// Text shown once the target instant has passed
    #[arg(short, long, default_value = DEFAULT_TERMINAL_MESSAGE)]
    pub message: String,

    /// Milliseconds between two renders
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub period_ms: u64,

    /// Print one JSON object per render instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Print one line per render instead of redrawing in place
    #[arg(long, conflicts_with = "json")]
    pub append: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Build the countdown settings from the parsed arguments
    pub fn settings(&self) -> CountdownSettings {
        CountdownSettings {
            terminal_message: self.message.clone(),
            period: Duration::from_millis(self.period_ms),
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
