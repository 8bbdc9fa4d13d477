// crates/admdiv-core/src/loader/mod.rs

//! # Record Loader
//!
//! Handles the physical layer (I/O, decompression, delimited parsing) and
//! turns every raw row into either a typed record or a diagnostic.

use crate::config::LoaderOptions;
use crate::error::{AdmDivError, Result};
use crate::model::{CoordinateRecord, NameRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

pub mod cache;
pub mod common_io;
pub mod countries;
mod raw;

pub use cache::load_dataset_cached;
pub use countries::{CountryEntry, CountryTable};

use raw::{InlineCoordinate, RawCoordinateRow, RawNameRow, RowOutcome};

/// Diagnostics for rows that did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowIssue {
    /// A required field is missing or unparsable.
    MalformedRecord { line: u64, reason: String },
    /// The record has no feature id and cannot be grouped.
    UngroupableRecord { line: u64 },
}

impl RowIssue {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord { line, reason } => write!(f, "line {line}: malformed record ({reason})"),
            Self::UngroupableRecord { line } => write!(f, "line {line}: record has no ufi"),
        }
    }
}

/// Counters collected while reading the input tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Data rows seen in the name table.
    pub total_input_records: usize,
    pub dropped_malformed: usize,
    pub skipped_non_admin: usize,
    pub skipped_hidden: usize,
    /// Coordinate values that were present but unusable.
    pub invalid_coordinates: usize,
}

/// Parsed input: name records, coordinates and what was dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedDataset {
    pub names: Vec<NameRecord>,
    pub coordinates: Vec<CoordinateRecord>,
    pub stats: LoadStats,
    pub issues: Vec<RowIssue>,
}

impl LoadedDataset {
    fn push_coordinate(&mut self, c: CoordinateRecord) {
        let seq = self.coordinates.len();
        self.coordinates.push(CoordinateRecord { seq, ..c });
    }

    /// Reads a GNS name table. Coordinates on the same rows are collected too.
    pub fn read_names<R: Read>(&mut self, reader: R, delimiter: u8, options: &LoaderOptions) -> Result<()> {
        let mut rdr = table_reader(reader, delimiter);
        let headers = rdr.headers()?.clone();

        for result in rdr.records() {
            let seq = self.stats.total_input_records;
            self.stats.total_input_records += 1;

            let record = match result {
                Ok(r) => r,
                Err(e) if e.is_io_error() => return Err(AdmDivError::Csv(e)),
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line());
                    self.reject(RowIssue::malformed(line, e.to_string()));
                    continue;
                }
            };
            let line = record.position().map_or(0, |p| p.line());

            let raw: RawNameRow = match record.deserialize(Some(&headers)) {
                Ok(raw) => raw,
                Err(e) => {
                    self.reject(RowIssue::malformed(line, e.to_string()));
                    continue;
                }
            };

            match raw.parse(seq, line, options) {
                RowOutcome::Parsed { record, coordinate } => {
                    match coordinate {
                        InlineCoordinate::Valid(c) => self.push_coordinate(c),
                        InlineCoordinate::Invalid => self.stats.invalid_coordinates += 1,
                        InlineCoordinate::Absent => {}
                    }
                    self.names.push(record);
                }
                RowOutcome::SkippedNonAdmin => self.stats.skipped_non_admin += 1,
                RowOutcome::SkippedHidden => self.stats.skipped_hidden += 1,
                RowOutcome::Malformed(issue) => self.reject(issue),
            }
        }
        Ok(())
    }

    /// Reads a stand-alone coordinate table (`ufi`, `lat_dd`, `long_dd`, optional `primary`).
    pub fn read_coordinates<R: Read>(&mut self, reader: R, delimiter: u8) -> Result<()> {
        let mut rdr = table_reader(reader, delimiter);
        for row in rdr.deserialize::<RawCoordinateRow>() {
            let parsed = match row {
                Ok(raw) => raw.parse(self.coordinates.len()),
                Err(e) if e.is_io_error() => return Err(AdmDivError::Csv(e)),
                Err(_) => None,
            };
            match parsed {
                Some(c) => self.push_coordinate(c),
                None => self.stats.invalid_coordinates += 1,
            }
        }
        Ok(())
    }

    fn reject(&mut self, issue: RowIssue) {
        log::warn!("Skipping {issue}");
        self.stats.dropped_malformed += 1;
        self.issues.push(issue);
    }
}

fn table_reader<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        // GNS tab files are unquoted and names may contain '"'.
        .quoting(delimiter == b',')
        .from_reader(reader)
}

/// Loads the name table and, if given, a separate coordinate table.
///
/// Coordinates on the name rows come first, then the coordinate table, so
/// "first seen" means name table order before coordinate table order.
pub fn load_dataset(names: &Path, coordinates: Option<&Path>, options: &LoaderOptions) -> Result<LoadedDataset> {
    let mut dataset = LoadedDataset::default();

    log::info!("Reading name records from {}", names.display());
    let reader = common_io::open_stream(names)?;
    dataset.read_names(reader, common_io::delimiter_for(names), options)?;

    if let Some(path) = coordinates {
        log::info!("Reading coordinates from {}", path.display());
        let reader = common_io::open_stream(path)?;
        dataset.read_coordinates(reader, common_io::delimiter_for(path))?;
    }

    log::info!(
        "Loaded {} name records ({} malformed, {} non-admin, {} hidden) and {} coordinates",
        dataset.names.len(),
        dataset.stats.dropped_malformed,
        dataset.stats.skipped_non_admin,
        dataset.stats.skipped_hidden,
        dataset.coordinates.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AdminLevel;

    const NAMES: &str = "rk\tufi\tuni\tfull_name\tnt\tlat_dd\tlong_dd\tdesig_cd\tcc_ft\tname_rank\tlang_cd\tdisplay\n\
1\t10\t100\tWestern \"Division\"\tN\t13.2\t-16.1\tADM1\tGA\t1\teng\t1,2\n\
2\t10\t101\tWest\tV\t13.2\t-16.1\tADM1\tGA\t2\t\t\n\
3\t11\t102\tBanjul Town\tN\t\t\tPPL\tGA\t1\t\t1\n\
4\t\t103\tOrphan\tN\t\t\tADM2\tGA\t1\t\t1\n\
5\t12\tabc\tBroken\tN\t\t\tADM2\tGA\t1\t\t1\n\
6\t13\t104\tFar Away\tN\t95.0\t10.0\tADM2\tGA\t\t\t1\n\
7\t14\n";

    fn load(options: &LoaderOptions) -> LoadedDataset {
        let mut ds = LoadedDataset::default();
        ds.read_names(NAMES.as_bytes(), b'\t', options).unwrap();
        ds
    }

    #[test]
    fn reads_gns_rows_and_counts_rejects() {
        let ds = load(&LoaderOptions::default());
        assert_eq!(ds.stats.total_input_records, 7);
        assert_eq!(ds.stats.skipped_non_admin, 1);
        // bad uni on line 6, missing name/uni on the short line 8
        assert_eq!(ds.stats.dropped_malformed, 2);
        assert_eq!(ds.stats.invalid_coordinates, 1);

        let names: Vec<_> = ds.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Western \"Division\"", "West", "Orphan", "Far Away"]);
        assert_eq!(ds.names[2].ufi, None);
        assert_eq!(ds.names[3].admin_level, AdminLevel::Adm2);
        assert_eq!(ds.names[0].language.as_deref(), Some("eng"));

        assert_eq!(ds.coordinates.len(), 2);
        assert!(ds.coordinates.iter().all(|c| c.ufi == 10));
        assert_eq!(ds.coordinates[1].seq, 1);
    }

    #[test]
    fn malformed_rows_report_their_line() {
        let ds = load(&LoaderOptions::default());
        assert!(ds.issues.contains(&RowIssue::MalformedRecord {
            line: 6,
            reason: "invalid uni \"abc\"".into()
        }));
    }

    #[test]
    fn display_filter_is_opt_in() {
        let ds = load(&LoaderOptions {
            require_display: true,
            ..LoaderOptions::default()
        });
        assert_eq!(ds.stats.skipped_hidden, 2);
        assert!(ds.names.iter().all(|n| n.name != "West"));
    }

    #[test]
    fn keeps_non_admin_rows_when_asked() {
        let ds = load(&LoaderOptions {
            admin_only: false,
            ..LoaderOptions::default()
        });
        let town = ds.names.iter().find(|n| n.name == "Banjul Town").unwrap();
        assert_eq!(town.admin_level, AdminLevel::Unknown("PPL".into()));
    }

    #[test]
    fn reads_separate_coordinate_table() {
        let mut ds = load(&LoaderOptions::default());
        let table = "ufi,lat_dd,long_dd,primary\n13,10.5,11.5,Y\nzz,1,1,\n14,1.0,\n";
        ds.read_coordinates(table.as_bytes(), b',').unwrap();
        assert_eq!(ds.coordinates.len(), 3);
        let last = ds.coordinates.last().unwrap();
        assert_eq!((last.ufi, last.seq, last.primary), (13, 2, true));
        assert_eq!(ds.stats.invalid_coordinates, 3);
    }

    #[test]
    fn reads_aliased_column_names() {
        let table = "feature_id,name_id,name_text,name_type_code,name_rank,administrative_level,country_code\n\
F1,1,Main,N,3,2,GA\n\
5,2,Alt,V,5,2,GA\n";
        let mut ds = LoadedDataset::default();
        ds.read_names(table.as_bytes(), b',', &LoaderOptions::default()).unwrap();
        // non-numeric feature ids are malformed, not ungroupable
        assert_eq!(ds.stats.dropped_malformed, 1);
        assert_eq!(ds.names.len(), 1);
        assert_eq!(ds.names[0].admin_level, AdminLevel::Adm2);
        assert_eq!(ds.names[0].ufi, Some(5));
    }
}
