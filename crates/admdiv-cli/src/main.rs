//! admdiv-cli — Command-line interface for admdiv-core
//!
//! This binary turns the GNS administrative-regions name file into one
//! canonical row per (feature, admin level). It builds the master table,
//! splits it per country, searches it, and prints per-country counts.
//!
//! Usage examples
//! --------------
//!
//! - Build the master table (and per-country files)
//!   $ admdiv build Administrative_Regions.txt --countries Country_Codes.csv
//!   $ admdiv build names.txt.gz --out master.csv --exports countries/ --report run.json
//!
//! - Split an existing master table
//!   $ admdiv split master.csv countries/
//!
//! - Search divisions
//!   $ admdiv query master.csv --country gambia --level adm2
//!   $ admdiv query master.csv --name "sao paulo"
//!   $ admdiv query master.csv --country GA --countries Country_Codes.csv
//!
//! - Largest countries by division count
//!   $ admdiv summary master.csv --top 10
//!
//! Logging
//! -------
//!
//! Progress goes to stderr through `env_logger` (default `info`). Use `-v`
//! for debug detail, `-q` for warnings only, or set `RUST_LOG`.
mod args;

use crate::args::{CliArgs, Commands};
use admdiv_core::config::PipelineConfig;
use admdiv_core::loader::CountryTable;
use admdiv_core::export::{export_levels, export_partitions, CsvTableWriter};
use admdiv_core::pipeline::{run_files, PipelineInputs};
use admdiv_core::query::DivisionQuery;
use admdiv_core::summary::CountrySummary;
use admdiv_core::{AdminLevel, MasterTable};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let default_filter = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    match args.command {
        Commands::Build {
            names,
            coordinates,
            countries,
            out,
            exports,
            by_level,
            report,
            summary,
            prefer_languages,
            display_only,
            all_designations,
            no_cache,
            sequential,
        } => {
            // Flags only ever switch a setting on top of the config file.
            config.selection.prefer_languages |= prefer_languages;
            config.loader.require_display |= display_only;
            config.loader.admin_only &= !all_designations;
            config.cache &= !no_cache;
            config.parallel &= !sequential;

            let inputs = PipelineInputs {
                names,
                coordinates,
                countries,
            };
            let output = run_files(&inputs, &config)?;

            output.table.write_to(&out, &CsvTableWriter)?;
            log::info!("Wrote {} rows to {}", output.table.len(), out.display());

            if let Some(dir) = exports {
                export_partitions(&output.table, &dir, &CsvTableWriter)?;
            }
            if by_level {
                for path in export_levels(&output.table, &out, &CsvTableWriter)? {
                    log::info!("  -> {}", path.display());
                }
            }
            if let Some(path) = summary {
                CountrySummary::write_csv(&CountrySummary::from_table(&output.table), &path)?;
                log::info!("Wrote summary to {}", path.display());
            }
            if let Some(path) = report {
                output.report.write_json(&path)?;
                log::info!("Wrote run report to {}", path.display());
            }
        }

        Commands::Split { master, out_dir } => {
            let table = MasterTable::read_csv(&master)?;
            let files = export_partitions(&table, &out_dir, &CsvTableWriter)?;
            for file in files {
                println!("{:>7}  {}", file.rows, file.path.display());
            }
        }

        Commands::Query {
            master,
            country,
            countries,
            level,
            name,
            limit,
        } => {
            let table = MasterTable::read_csv(&master)?;
            let query = DivisionQuery { country, level, name };
            let hits = match countries {
                Some(path) => query.run_with_countries(&table, &CountryTable::load(&path)?),
                None => query.run(&table),
            };
            if hits.is_empty() {
                println!("No divisions found");
            } else {
                for row in hits.iter().take(limit) {
                    let coords = match (row.latitude, row.longitude) {
                        (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
                        _ => "-".to_string(),
                    };
                    println!(
                        "{} | {} | {} | ufi {} | {}",
                        row.country_name, row.admin_level, row.subdivision_name, row.ufi, coords
                    );
                }
                if hits.len() > limit {
                    println!("... {} more", hits.len() - limit);
                }
            }
        }

        Commands::Summary { master, top } => {
            let table = MasterTable::read_csv(&master)?;
            let summaries = CountrySummary::from_table(&table);
            let mut header = format!("{:<32}", "Country");
            for label in AdminLevel::LABELS {
                header.push_str(&format!(" {label:>7}"));
            }
            println!("{header} {:>7}", "Total");
            for s in summaries.iter().take(top) {
                let mut line = format!("{:<32}", s.country_name);
                for count in s.counts {
                    line.push_str(&format!(" {count:>7}"));
                }
                println!("{line} {:>7}", s.total);
            }
            println!("Countries: {}  Divisions: {}", summaries.len(), table.len());
        }
    }

    Ok(())
}
