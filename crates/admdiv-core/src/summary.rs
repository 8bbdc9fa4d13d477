// crates/admdiv-core/src/summary.rs

//! Per-country division counts over a master table.

use crate::assemble::MasterTable;
use crate::error::Result;
use crate::model::AdminLevel;
use std::collections::BTreeMap;
use std::path::Path;

/// Division counts of one country, one counter per [`AdminLevel::LABELS`] entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySummary {
    pub country_name: String,
    /// Indexed like [`AdminLevel::LABELS`].
    pub counts: [usize; AdminLevel::LABELS.len()],
    pub total: usize,
}

impl CountrySummary {
    /// CSV header: country, one column per level label, total.
    pub fn header() -> Vec<&'static str> {
        let mut header = vec!["Country_Name"];
        header.extend(AdminLevel::LABELS);
        header.push("Total");
        header
    }

    fn count(&mut self, label: &str) {
        self.counts[AdminLevel::parse(label).label_index()] += 1;
        self.total += 1;
    }

    /// One summary per country, largest first, ties by name.
    pub fn from_table(table: &MasterTable) -> Vec<CountrySummary> {
        let mut by_country: BTreeMap<&str, CountrySummary> = BTreeMap::new();
        for row in table.rows() {
            by_country
                .entry(row.country_name.as_str())
                .or_insert_with(|| CountrySummary {
                    country_name: row.country_name.clone(),
                    ..CountrySummary::default()
                })
                .count(&row.admin_level);
        }
        let mut out: Vec<_> = by_country.into_values().collect();
        out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.country_name.cmp(&b.country_name)));
        out
    }

    pub fn write_csv(summaries: &[CountrySummary], path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(Self::header())?;
        for s in summaries {
            let mut record = vec![s.country_name.clone()];
            record.extend(s.counts.iter().map(usize::to_string));
            record.push(s.total.to_string());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
