use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for admdiv-cli
#[derive(Debug, Parser)]
#[command(
    name = "admdiv",
    version,
    about = "Build canonical administrative-division tables from the GNS name file"
)]
pub struct CliArgs {
    /// JSON pipeline configuration (flags below override it)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (debug)
    #[arg(short = 'v', long = "verbose", global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the master table from a GNS name file
    Build {
        /// GNS name table (tab-separated, optionally .gz)
        names: PathBuf,

        /// Separate coordinate table (ufi, lat_dd, long_dd[, primary])
        #[arg(long)]
        coordinates: Option<PathBuf>,

        /// Country code table (Country_Code, Short_Name, Full_Name)
        #[arg(long)]
        countries: Option<PathBuf>,

        /// Master CSV to write
        #[arg(short = 'o', long = "out", default_value = "Master_Subdivisions.csv")]
        out: PathBuf,

        /// Also write one CSV per country into this directory
        #[arg(long)]
        exports: Option<PathBuf>,

        /// Also write one CSV per admin level next to the master file
        #[arg(long = "by-level")]
        by_level: bool,

        /// Write the run report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write per-country counts as CSV
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Break ties by language (English, then common local languages)
        #[arg(long = "prefer-languages")]
        prefer_languages: bool,

        /// Skip rows with an empty display column
        #[arg(long = "display-only")]
        display_only: bool,

        /// Keep non-administrative designations (e.g. PPL)
        #[arg(long = "all-designations")]
        all_designations: bool,

        /// Neither read nor write the parsed cache
        #[arg(long = "no-cache")]
        no_cache: bool,

        /// Select winners on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Split an existing master CSV into one file per country
    Split {
        /// Master CSV
        master: PathBuf,

        /// Output directory
        #[arg(default_value = "countries")]
        out_dir: PathBuf,
    },

    /// Search an existing master CSV
    Query {
        /// Master CSV
        master: PathBuf,

        /// Country name substring (case/accent-insensitive), or a code with --countries
        #[arg(long)]
        country: Option<String>,

        /// Country code table used to resolve --country codes and full names
        #[arg(long)]
        countries: Option<PathBuf>,

        /// Level label, e.g. ADM2
        #[arg(long)]
        level: Option<String>,

        /// Subdivision name substring (case/accent-insensitive)
        #[arg(long)]
        name: Option<String>,

        /// Maximum rows to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Per-country division counts of an existing master CSV
    Summary {
        /// Master CSV
        master: PathBuf,

        /// Number of countries to print
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}
