// crates/admdiv-core/src/loader/raw.rs

//! Raw row shapes as they come out of the GNS tables.
//!
//! NOTE: These types mirror the external dataset. Every field is optional
//! text; all interpretation happens in [`RawNameRow::parse`], so the
//! "trust the input" assumptions live in one place.

use super::RowIssue;
use crate::config::LoaderOptions;
use crate::model::{AdminLevel, CoordinateRecord, NameRecord};
use crate::text::parse_opt_f64;
use serde::Deserialize;

/// One row of `Administrative_Regions.txt` (only the columns we use).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawNameRow {
    #[serde(alias = "feature_id")]
    pub ufi: Option<String>,
    #[serde(alias = "name_id")]
    pub uni: Option<String>,
    #[serde(alias = "name_text")]
    pub full_name: Option<String>,
    #[serde(alias = "name_type_code")]
    pub nt: Option<String>,
    pub name_rank: Option<String>,
    #[serde(alias = "administrative_level")]
    pub desig_cd: Option<String>,
    #[serde(alias = "country_code")]
    pub cc_ft: Option<String>,
    #[serde(alias = "latitude")]
    pub lat_dd: Option<String>,
    #[serde(alias = "longitude")]
    pub long_dd: Option<String>,
    pub lang_cd: Option<String>,
    pub script_cd: Option<String>,
    pub transl_cd: Option<String>,
    pub display: Option<String>,
}

/// One row of an optional stand-alone coordinate table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawCoordinateRow {
    #[serde(alias = "feature_id")]
    pub ufi: Option<String>,
    #[serde(alias = "latitude")]
    pub lat_dd: Option<String>,
    #[serde(alias = "longitude")]
    pub long_dd: Option<String>,
    #[serde(alias = "is_primary")]
    pub primary: Option<String>,
}

/// Coordinates carried on the name row itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum InlineCoordinate {
    Absent,
    Valid(CoordinateRecord),
    Invalid,
}

#[derive(Debug)]
pub(crate) enum RowOutcome {
    Parsed {
        record: NameRecord,
        coordinate: InlineCoordinate,
    },
    SkippedNonAdmin,
    SkippedHidden,
    Malformed(RowIssue),
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Ranks are whole numbers but exports sometimes write them as `1.0`.
fn parse_rank(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().or_else(|| {
        let value = raw.parse::<f64>().ok()?;
        (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value)).then_some(value as u32)
    })
}

fn parse_id(v: Option<&str>) -> Option<std::result::Result<i64, String>> {
    v.map(|s| s.parse::<i64>().map_err(|_| s.to_string()))
}

impl RawNameRow {
    pub(crate) fn parse(self, seq: usize, line: u64, options: &LoaderOptions) -> RowOutcome {
        let desig = non_empty(self.desig_cd);
        if options.admin_only && !AdminLevel::is_administrative(desig.as_deref().unwrap_or("")) {
            return RowOutcome::SkippedNonAdmin;
        }
        if options.require_display && non_empty(self.display).is_none() {
            return RowOutcome::SkippedHidden;
        }

        let Some(name) = non_empty(self.full_name) else {
            return RowOutcome::Malformed(RowIssue::malformed(line, "missing full_name"));
        };
        let uni = match parse_id(non_empty(self.uni).as_deref()) {
            Some(Ok(uni)) => uni,
            Some(Err(raw)) => {
                return RowOutcome::Malformed(RowIssue::malformed(line, format!("invalid uni {raw:?}")))
            }
            None => return RowOutcome::Malformed(RowIssue::malformed(line, "missing uni")),
        };
        let ufi = match parse_id(non_empty(self.ufi).as_deref()) {
            Some(Ok(ufi)) => Some(ufi),
            Some(Err(raw)) => {
                return RowOutcome::Malformed(RowIssue::malformed(line, format!("invalid ufi {raw:?}")))
            }
            None => None,
        };

        let lat_raw = non_empty(self.lat_dd);
        let lon_raw = non_empty(self.long_dd);
        let coordinate = match (ufi, lat_raw.is_some() || lon_raw.is_some()) {
            (_, false) | (None, _) => InlineCoordinate::Absent,
            (Some(ufi), true) => {
                let lat = parse_opt_f64(lat_raw.as_deref());
                let lon = parse_opt_f64(lon_raw.as_deref());
                match lat.zip(lon).and_then(|(lat, lon)| CoordinateRecord::new(0, ufi, lat, lon, false)) {
                    Some(c) => InlineCoordinate::Valid(c),
                    None => InlineCoordinate::Invalid,
                }
            }
        };

        let record = NameRecord {
            seq,
            line,
            ufi,
            uni,
            name,
            name_type: non_empty(self.nt),
            name_rank: non_empty(self.name_rank).and_then(|r| parse_rank(&r)),
            language: non_empty(self.lang_cd),
            script: non_empty(self.script_cd),
            transliteration: non_empty(self.transl_cd),
            admin_level: AdminLevel::parse(desig.as_deref().unwrap_or("")),
            country_code: non_empty(self.cc_ft),
        };

        RowOutcome::Parsed { record, coordinate }
    }
}

impl RawCoordinateRow {
    /// `None` when the row has no usable feature id or coordinates.
    pub(crate) fn parse(self, seq: usize) -> Option<CoordinateRecord> {
        let ufi = non_empty(self.ufi)?.parse::<i64>().ok()?;
        let lat = parse_opt_f64(self.lat_dd.as_deref())?;
        let lon = parse_opt_f64(self.long_dd.as_deref())?;
        let primary = non_empty(self.primary).is_some_and(|p| {
            matches!(p.to_ascii_lowercase().as_str(), "y" | "yes" | "1" | "true")
        });
        CoordinateRecord::new(seq, ufi, lat, lon, primary)
    }
}
