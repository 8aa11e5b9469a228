use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gastro-hours")]
#[command(about = "Weekly opening hours for a restaurant catalog")]
pub struct CliConfig {
    /// Path to TOML catalog file
    #[arg(short, long, default_value = "catalog.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check every restaurant's opening hours for range errors and overlaps
    Validate,

    /// List restaurants with their open/closed state
    List {
        /// Evaluate at this local time ("YYYY-MM-DD HH:MM") instead of now
        #[arg(long, value_parser = parse_instant)]
        at: Option<NaiveDateTime>,

        #[arg(long)]
        limit: Option<i64>,

        #[arg(long, default_value = "0")]
        offset: i64,
    },

    /// Answer whether one restaurant is open
    IsOpen {
        slug: String,

        #[arg(long, value_parser = parse_instant)]
        at: Option<NaiveDateTime>,
    },

    /// Print a restaurant's weekly schedule
    Schedule { slug: String },
}

impl Command {
    pub fn at(&self) -> Option<NaiveDateTime> {
        match self {
            Command::List { at, .. } | Command::IsOpen { at, .. } => *at,
            Command::Validate | Command::Schedule { .. } => None,
        }
    }
}

pub fn parse_instant(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("expected \"YYYY-MM-DD HH:MM\": {}", e))
}
