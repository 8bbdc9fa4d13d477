// crates/admdiv-core/src/lib.rs

//! admdiv-core
//! ===========
//!
//! Reconciles the GNS administrative-division name table into one canonical
//! row per (feature, admin level): classify every name, group by feature,
//! pick the best name, join coordinates, label country and level, and emit
//! a deterministic master table that can be split per country.
//!
//! ```no_run
//! use admdiv_core::config::PipelineConfig;
//! use admdiv_core::export::{export_partitions, CsvTableWriter};
//! use admdiv_core::pipeline::{run_files, PipelineInputs};
//!
//! # fn main() -> admdiv_core::Result<()> {
//! let inputs = PipelineInputs {
//!     names: "Administrative_Regions.txt".into(),
//!     coordinates: None,
//!     countries: Some("Country_Codes.csv".into()),
//! };
//! let output = run_files(&inputs, &PipelineConfig::default())?;
//! output.table.write_to("Master_Subdivisions.csv", &CsvTableWriter)?;
//! export_partitions(&output.table, "countries", &CsvTableWriter)?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aggregate;
pub mod assemble;
pub mod classify;
pub mod common;
pub mod config;
pub mod coords;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod loader; // Name, coordinate and country tables + parsed cache
pub mod model;
pub mod pipeline;
pub mod query;
pub mod select;
pub mod summary;
pub mod text;

#[cfg(test)]
mod test_support;

// Re-exports
pub use crate::assemble::MasterTable;
pub use crate::common::RunReport;
pub use crate::config::PipelineConfig;
pub use crate::error::{AdmDivError, Result};
pub use crate::model::{AdminLevel, SelectedDivision};
