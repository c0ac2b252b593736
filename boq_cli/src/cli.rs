//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "boq")]
#[command(version)]
#[command(about = "Bill of Quantities calculator for .boq project files")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project file
    Init {
        /// Path of the .boq file to create
        path: PathBuf,

        /// Project name
        #[arg(long, default_value = "Untitled project")]
        name: String,

        /// Client name
        #[arg(long, default_value = "")]
        client: String,

        /// Estimator name, also used as the lock holder
        #[arg(long, env = "USER", default_value = "estimator")]
        estimator: String,

        /// Fill the project with sample floors, templates and materials
        #[arg(long)]
        sample: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check every floor, template and material in a project
    Validate {
        /// Path to the .boq file
        path: PathBuf,
    },

    /// Calculate the quantity report
    Calculate {
        /// Path to the .boq file
        path: PathBuf,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only print the cost summary
        #[arg(long)]
        summary: bool,
    },
}
