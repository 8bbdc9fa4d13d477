// crates/admdiv-core/src/pipeline.rs

//! # Pipeline
//!
//! Loader → classifier → aggregator → selector → coordinate joiner →
//! hierarchy labeler → assembler. One pass, no mutation of loaded records.

use crate::aggregate::{group_records, NameGroup};
use crate::assemble::{assemble, MasterTable};
use crate::common::RunReport;
use crate::config::{PipelineConfig, SelectionPolicy};
use crate::coords::CoordinateIndex;
use crate::error::Result;
use crate::hierarchy::HierarchyLabeler;
use crate::loader::{self, CountryTable, LoadedDataset};
use crate::model::NameRecord;
use crate::select::select_best;
use std::path::PathBuf;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Input files of a run.
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    /// GNS name table (`Administrative_Regions.txt`, optionally `.gz`).
    pub names: PathBuf,
    /// Optional stand-alone coordinate table.
    pub coordinates: Option<PathBuf>,
    /// Optional `Country_Codes.csv`; without it raw codes are shown.
    pub countries: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: MasterTable,
    pub report: RunReport,
}

/// Picks one winner per group. Results are in group order whether or not
/// selection runs in parallel.
pub fn select_winners<'a>(
    groups: &[NameGroup<'a>],
    policy: &SelectionPolicy,
    parallel: bool,
) -> Result<Vec<&'a NameRecord>> {
    #[cfg(feature = "parallel")]
    if parallel {
        return groups.par_iter().map(|g| select_best(g, policy)).collect();
    }
    #[cfg(not(feature = "parallel"))]
    if parallel {
        log::debug!("'parallel' feature disabled, selecting sequentially");
    }
    groups.iter().map(|g| select_best(g, policy)).collect()
}

/// Runs the reconciliation over an already loaded dataset.
pub fn run(dataset: &LoadedDataset, countries: &CountryTable, config: &PipelineConfig) -> Result<PipelineOutput> {
    let grouping = group_records(&dataset.names);
    log::info!(
        "Selecting best names for {} (feature, level) groups",
        grouping.groups.len()
    );

    let winners = select_winners(&grouping.groups, &config.selection, config.parallel)?;

    let index = CoordinateIndex::build(&dataset.coordinates);
    log::debug!("Coordinate index covers {} features", index.len());
    let labeler = HierarchyLabeler::new(countries);
    let assembly = assemble(&winners, &index, &labeler);

    let report = RunReport {
        total_input_records: dataset.stats.total_input_records,
        dropped_malformed: dataset.stats.dropped_malformed,
        dropped_ungroupable: grouping.ungroupable.len(),
        skipped_non_admin: dataset.stats.skipped_non_admin,
        skipped_hidden: dataset.stats.skipped_hidden,
        invalid_coordinates: dataset.stats.invalid_coordinates,
        ambiguous_coordinates: index.ambiguous_features(),
        features_missing_coordinates: assembly.features_missing_coordinates,
        unresolved_country_codes: assembly.unresolved_country_codes,
        unknown_admin_levels: assembly.unknown_admin_levels,
        groups: grouping.groups.len(),
        output_rows: assembly.table.len(),
    };
    debug_assert_eq!(report.groups, report.output_rows);

    Ok(PipelineOutput {
        table: assembly.table,
        report,
    })
}

/// Loads the inputs (through the parsed cache when enabled) and runs.
pub fn run_files(inputs: &PipelineInputs, config: &PipelineConfig) -> Result<PipelineOutput> {
    let dataset = if config.cache {
        loader::load_dataset_cached(&inputs.names, inputs.coordinates.as_deref(), &config.loader)?
    } else {
        loader::load_dataset(&inputs.names, inputs.coordinates.as_deref(), &config.loader)?
    };
    let countries = match &inputs.countries {
        Some(path) => CountryTable::load(path)?,
        None => {
            log::warn!("No country table given; raw country codes will be shown");
            CountryTable::default()
        }
    };
    let output = run(&dataset, &countries, config)?;
    output.report.log_summary();
    Ok(output)
}
