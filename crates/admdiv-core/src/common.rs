// crates/admdiv-core/src/common.rs
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// End-of-run counts.
///
/// Per-row problems never abort a run; they end up here instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub total_input_records: usize,
    pub dropped_malformed: usize,
    pub dropped_ungroupable: usize,
    pub skipped_non_admin: usize,
    pub skipped_hidden: usize,
    pub invalid_coordinates: usize,
    pub ambiguous_coordinates: usize,
    pub features_missing_coordinates: usize,
    pub unresolved_country_codes: usize,
    pub unknown_admin_levels: usize,
    pub groups: usize,
    pub output_rows: usize,
}

impl RunReport {
    pub fn log_summary(&self) {
        log::info!("Input records:              {}", self.total_input_records);
        log::info!("Dropped (malformed):        {}", self.dropped_malformed);
        log::info!("Dropped (no ufi):           {}", self.dropped_ungroupable);
        log::info!("Skipped (non-admin/hidden): {}/{}", self.skipped_non_admin, self.skipped_hidden);
        log::info!("Invalid coordinates:        {}", self.invalid_coordinates);
        log::info!("Features w/o coordinates:   {}", self.features_missing_coordinates);
        if self.ambiguous_coordinates > 0 {
            log::warn!("{} features had several coordinate records (first seen used)", self.ambiguous_coordinates);
        }
        if self.unresolved_country_codes > 0 {
            log::warn!("{} rows kept a raw country code", self.unresolved_country_codes);
        }
        if self.unknown_admin_levels > 0 {
            log::warn!("{} rows have an UNKNOWN admin level", self.unknown_admin_levels);
        }
        log::info!("Output rows:                {}", self.output_rows);
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
