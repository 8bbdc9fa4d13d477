// crates/admdiv-core/src/export.rs

//! # Tabular output and the Country Partitioner
//!
//! The core only needs "write these rows to that path"; [`TableWriter`] is
//! that seam. [`CsvTableWriter`] is the implementation the CLI uses.

use crate::assemble::MasterTable;
use crate::error::Result;
use crate::loader::common_io;
use crate::model::{SelectedDivision, MASTER_COLUMNS};
use crate::text::file_stem_for;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

pub trait TableWriter {
    /// File extension of produced files, without the dot.
    fn extension(&self) -> &str;

    fn write_rows(&self, path: &Path, rows: &[&SelectedDivision]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableWriter;

impl TableWriter for CsvTableWriter {
    fn extension(&self) -> &str {
        "csv"
    }

    fn write_rows(&self, path: &Path, rows: &[&SelectedDivision]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        // Explicit header so an empty table still has one.
        writer.write_record(MASTER_COLUMNS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl MasterTable {
    pub fn write_to(&self, path: impl AsRef<Path>, writer: &dyn TableWriter) -> Result<()> {
        let rows: Vec<&SelectedDivision> = self.rows().iter().collect();
        writer.write_rows(path.as_ref(), &rows)
    }

    /// Reads a master (or partition) CSV back.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let mut rdr = csv::Reader::from_reader(reader);
        let rows = rdr
            .deserialize::<SelectedDivision>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(rows))
    }
}

/// Rows grouped by country name, countries in name order.
pub fn partition_by_country(table: &MasterTable) -> BTreeMap<&str, Vec<&SelectedDivision>> {
    let mut parts: BTreeMap<&str, Vec<&SelectedDivision>> = BTreeMap::new();
    for row in table.rows() {
        parts.entry(row.country_name.as_str()).or_default().push(row);
    }
    parts
}

/// One written partition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionFile {
    pub country_name: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// File stems per country: sanitized name, `Unknown` when nothing is left,
/// `_2`, `_3`, ... appended on collisions. Input must be in country order.
pub fn partition_stems<'a>(countries: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, String)> {
    let mut taken: HashSet<String> = HashSet::new();
    countries
        .into_iter()
        .map(|country| {
            let base = file_stem_for(country).unwrap_or_else(|| "Unknown".to_string());
            let mut stem = base.clone();
            let mut n = 2;
            while !taken.insert(stem.to_lowercase()) {
                stem = format!("{base}_{n}");
                n += 1;
            }
            (country, stem)
        })
        .collect()
}

/// Writes one file per distinct country name into `dir`.
///
/// Every master row lands in exactly one file.
pub fn export_partitions(
    table: &MasterTable,
    dir: impl AsRef<Path>,
    writer: &dyn TableWriter,
) -> Result<Vec<PartitionFile>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let parts = partition_by_country(table);
    let stems = partition_stems(parts.keys().copied());

    let mut written = Vec::with_capacity(parts.len());
    for (country, stem) in stems {
        let rows = &parts[country];
        let path = dir.join(format!("{stem}.{}", writer.extension()));
        log::debug!("  -> {country}: {} rows -> {}", rows.len(), path.display());
        writer.write_rows(&path, rows)?;
        written.push(PartitionFile {
            country_name: country.to_string(),
            path,
            rows: rows.len(),
        });
    }
    log::info!("Exported {} country files to {}", written.len(), dir.display());
    Ok(written)
}

/// Writes `<stem>_<LEVEL>.<ext>` next to `master` for every level present.
pub fn export_levels(table: &MasterTable, master: &Path, writer: &dyn TableWriter) -> Result<Vec<PathBuf>> {
    let stem = master
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "divisions".to_string());
    let mut written = Vec::new();
    for level in table.levels() {
        let rows: Vec<&SelectedDivision> = table.rows_at_level(level).collect();
        let path = master.with_file_name(format!("{stem}_{level}.{}", writer.extension()));
        writer.write_rows(&path, &rows)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, name: &str, ufi: i64) -> SelectedDivision {
        SelectedDivision {
            country_name: country.into(),
            admin_level: "ADM1".into(),
            subdivision_name: name.into(),
            latitude: Some(1.5),
            longitude: None,
            ufi,
            uni: ufi * 10,
            name_type: "N".into(),
        }
    }

    #[test]
    fn stems_are_unique() {
        let stems = partition_stems(["", "Korea, South", "Korea South", "korea south"]);
        let names: Vec<_> = stems.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(names, ["Unknown", "Korea South", "Korea South_2", "korea south_3"]);
    }

    #[test]
    fn csv_round_trip_keeps_missing_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.csv");
        let table = MasterTable::from_rows(vec![row("Gambia", "Banjul", 1), row("", "Nowhere", 2)]);
        table.write_to(&path, &CsvTableWriter).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Country_Name,Admin_Level,Subdivision_Name,Latitude,Longitude,UFI,UNI,Name_Type\n"));
        assert!(text.contains("Gambia,ADM1,Banjul,1.5,,1,10,N\n"));

        let back = MasterTable::read_csv(&path).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn empty_table_still_has_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        MasterTable::default().write_to(&path, &CsvTableWriter).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), MASTER_COLUMNS.join(",") + "\n");
    }

    #[test]
    fn partitions_cover_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = MasterTable::from_rows(vec![
            row("Gambia", "Banjul", 1),
            row("Senegal", "Dakar", 2),
            row("Gambia", "Kanifing", 3),
            row("", "Nowhere", 4),
        ]);
        let files = export_partitions(&table, dir.path(), &CsvTableWriter).unwrap();
        assert_eq!(files.iter().map(|f| f.rows).sum::<usize>(), table.len());
        let stems: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(stems, ["Unknown.csv", "Gambia.csv", "Senegal.csv"]);

        let gambia = MasterTable::read_csv(dir.path().join("Gambia.csv")).unwrap();
        assert_eq!(gambia.len(), 2);
    }
}
