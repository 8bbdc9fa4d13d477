// crates/admdiv-core/src/model/record.rs
use super::AdminLevel;
use serde::{Deserialize, Serialize};

/// One name string of one feature, as parsed from the GNS name table.
///
/// `ufi` is optional here so that rows without a feature identifier can be
/// represented long enough to be counted and dropped by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Position in the input, used as the final tie-break.
    pub seq: usize,
    /// 1-based physical line in the source file (header is line 1).
    pub line: u64,
    pub ufi: Option<i64>,
    pub uni: i64,
    pub name: String,
    /// Raw name-type code (`N`, `C`, `V`, `D`, ...).
    pub name_type: Option<String>,
    pub name_rank: Option<u32>,
    pub language: Option<String>,
    pub script: Option<String>,
    pub transliteration: Option<String>,
    pub admin_level: AdminLevel,
    pub country_code: Option<String>,
}

/// A coordinate pair attached to a feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub seq: usize,
    pub ufi: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Set only when the coordinate table carries an explicit primary flag.
    pub primary: bool,
}

impl CoordinateRecord {
    /// Returns `None` when either value lies outside decimal-degree range.
    pub fn new(seq: usize, ufi: i64, latitude: f64, longitude: f64, primary: bool) -> Option<Self> {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        in_range.then_some(Self {
            seq,
            ufi,
            latitude,
            longitude,
            primary,
        })
    }
}
