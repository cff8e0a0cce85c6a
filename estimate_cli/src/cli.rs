use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use estimate_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "estimate")]
#[command(about = "Construction material and cost estimates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// More logging (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the calculators
    List {
        /// Only this category (e.g. "brickwork", "water_tank")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the inputs and outputs of a calculator
    Show {
        /// Calculator id, e.g. "flat-bar-metal"
        id: String,
    },

    /// Run a calculator
    Calc {
        id: String,

        #[command(flatten)]
        values: FormValues,

        /// Print the detail view as JSON
        #[arg(long)]
        json: bool,

        /// Print the formula breakdown
        #[arg(long)]
        detail: bool,
    },

    /// Fill in a calculator field by field
    Prompt { id: String },

    /// Run a calculator and keep it in a project file
    Save {
        /// Project file (.est); created if missing
        project: PathBuf,

        id: String,

        #[command(flatten)]
        values: FormValues,

        /// Label shown in the history list
        #[arg(short, long, default_value = "")]
        label: String,
    },

    /// List the calculations saved in a project file
    History {
        /// Project file; defaults to `history_file` from the config
        project: Option<PathBuf>,

        /// Only this calculator
        #[arg(long)]
        id: Option<String>,
    },

    /// Write a PDF report of a calculation
    Report {
        id: String,

        #[command(flatten)]
        values: FormValues,

        /// Output file
        #[arg(short, long, default_value = "estimate.pdf")]
        output: PathBuf,

        /// Report title; the calculator title when omitted
        #[arg(long, default_value = "")]
        title: String,
    },
}

/// Values typed into a calculator form
#[derive(clap::Args, Debug, Default)]
pub struct FormValues {
    /// Input value, `key=value`
    #[arg(short = 'i', long = "input", value_parser = parse_pair)]
    pub inputs: Vec<(String, String)>,

    /// Select option, `key=value`; applies the option's fills
    #[arg(long = "select", value_parser = parse_pair)]
    pub selects: Vec<(String, String)>,
}

pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
