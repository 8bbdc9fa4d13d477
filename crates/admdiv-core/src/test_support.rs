// crates/admdiv-core/src/test_support.rs
#![cfg(test)]

use crate::model::{AdminLevel, CoordinateRecord, NameRecord};

pub(crate) fn name(
    seq: usize,
    ufi: i64,
    level: AdminLevel,
    name_type: &str,
    rank: Option<u32>,
    text: &str,
) -> NameRecord {
    NameRecord {
        seq,
        line: seq as u64 + 2,
        ufi: Some(ufi),
        uni: 1000 + seq as i64,
        name: text.to_string(),
        name_type: Some(name_type.to_string()).filter(|s| !s.is_empty()),
        name_rank: rank,
        language: None,
        script: None,
        transliteration: None,
        admin_level: level,
        country_code: Some("GM".to_string()),
    }
}

pub(crate) fn coord(seq: usize, ufi: i64, lat: f64, lon: f64) -> CoordinateRecord {
    CoordinateRecord::new(seq, ufi, lat, lon, false).expect("test coordinate in range")
}
