//! CLI module - command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::rank;

pub mod commands;

/// skillpulse - search a job role, chart the skills employers ask for
#[derive(Parser, Debug)]
#[command(name = "skillpulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skillpulse/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one extraction for a term and print the ranked skills
    Run(RunArgs),
    /// Open the interactive search screen
    Tui,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Job-role keyword (e.g. "data engineer intern")
    pub term: Option<String>,

    /// How many skills the chart shows
    #[arg(long, default_value_t = rank::CHART_TOP_N)]
    pub top: usize,
}
