// crates/admdiv-core/src/loader/countries.rs
use super::common_io;
use crate::error::Result;
use crate::text::{contains_folded, fold_key};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One row of `Country_Codes.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    #[serde(rename = "Country_Code", alias = "code")]
    pub code: String,
    #[serde(rename = "Short_Name", alias = "short_name", alias = "name")]
    pub short_name: String,
    #[serde(rename = "Full_Name", alias = "full_name", default)]
    pub full_name: Option<String>,
}

/// Immutable country-code lookup.
///
/// Built once and handed to the hierarchy labeler by reference. Codes are
/// matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    /// Sorted by code.
    entries: Vec<CountryEntry>,
    by_code: HashMap<String, usize>,
}

impl CountryTable {
    pub fn from_entries(entries: impl IntoIterator<Item = CountryEntry>) -> Self {
        let mut entries: Vec<CountryEntry> = entries
            .into_iter()
            .map(|mut e| {
                e.code = e.code.trim().to_ascii_uppercase();
                e.short_name = e.short_name.trim().to_string();
                e.full_name = e.full_name.map(|f| f.trim().to_string()).filter(|f| !f.is_empty());
                e
            })
            .filter(|e| !e.code.is_empty() && !e.short_name.is_empty())
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        // First entry of a duplicated code wins.
        entries.dedup_by(|later, first| later.code == first.code);

        let by_code = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code.clone(), i))
            .collect();
        Self { entries, by_code }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut entries = Vec::new();
        for row in rdr.deserialize::<CountryEntry>() {
            match row {
                Ok(entry) => entries.push(entry),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => log::warn!("Skipping country row: {e}"),
            }
        }
        let table = Self::from_entries(entries);
        log::info!("Loaded {} country codes", table.len());
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_reader(common_io::open_stream(path)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, code: &str) -> Option<&CountryEntry> {
        self.by_code
            .get(&code.trim().to_ascii_uppercase())
            .map(|&i| &self.entries[i])
    }

    /// Finds countries by code or name.
    ///
    /// An exact code match wins; otherwise short names, then full names, are
    /// searched accent- and case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&CountryEntry> {
        let query = query.trim();
        if fold_key(query).is_empty() {
            return Vec::new();
        }
        if let Some(entry) = self.resolve(query) {
            return vec![entry];
        }
        let by_short: Vec<_> = self
            .entries
            .iter()
            .filter(|e| contains_folded(&e.short_name, query))
            .collect();
        if !by_short.is_empty() {
            return by_short;
        }
        self.entries
            .iter()
            .filter(|e| e.full_name.as_deref().is_some_and(|f| contains_folded(f, query)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODES: &str = "Country_Code,Short_Name,Full_Name\n\
GM,Gambia,\"Gambia, The\"\n\
ci,Côte d'Ivoire,Republic of Côte d'Ivoire\n\
DE,Germany,Federal Republic of Germany\n\
GM,Duplicate,\n\
,Nowhere,\n";

    #[test]
    fn parses_country_codes_csv() {
        let table = CountryTable::from_reader(CODES.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("gm").unwrap().short_name, "Gambia");
        assert_eq!(table.resolve("CI").unwrap().full_name.as_deref(), Some("Republic of Côte d'Ivoire"));
        assert!(table.resolve("XX").is_none());
    }

    #[test]
    fn searches_code_then_names() {
        let table = CountryTable::from_reader(CODES.as_bytes()).unwrap();
        assert_eq!(table.search("de")[0].short_name, "Germany");
        assert_eq!(table.search("cote")[0].code, "CI");
        assert_eq!(table.search("federal")[0].code, "DE");
        assert!(table.search("atlantis").is_empty());
        assert!(table.search("  ").is_empty());
    }
}
