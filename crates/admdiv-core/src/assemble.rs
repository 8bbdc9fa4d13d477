// crates/admdiv-core/src/assemble.rs

//! # Dataset Assembler
//!
//! Turns winning records into [`SelectedDivision`] rows and orders them into
//! the write-once [`MasterTable`].

use crate::coords::CoordinateIndex;
use crate::hierarchy::HierarchyLabeler;
use crate::model::{NameRecord, SelectedDivision};
use std::collections::{BTreeSet, HashSet};

/// The assembled output, sorted by country, level, name, ufi, uni.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterTable {
    rows: Vec<SelectedDivision>,
}

impl MasterTable {
    pub fn from_rows(mut rows: Vec<SelectedDivision>) -> Self {
        rows.sort_by(|a, b| {
            (&a.country_name, &a.admin_level, &a.subdivision_name, a.ufi, a.uni).cmp(&(
                &b.country_name,
                &b.admin_level,
                &b.subdivision_name,
                b.ufi,
                b.uni,
            ))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[SelectedDivision] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct country names, sorted.
    pub fn country_names(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.country_name.as_str()).collect()
    }

    /// Distinct level labels present, sorted.
    pub fn levels(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.admin_level.as_str()).collect()
    }

    pub fn rows_at_level<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a SelectedDivision> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.admin_level.eq_ignore_ascii_case(label))
    }
}

/// Assembled table plus the data-quality counts gathered on the way.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub table: MasterTable,
    pub unresolved_country_codes: usize,
    pub unknown_admin_levels: usize,
    pub features_missing_coordinates: usize,
}

pub fn assemble(winners: &[&NameRecord], coordinates: &CoordinateIndex, labeler: &HierarchyLabeler<'_>) -> Assembly {
    let mut unresolved_country_codes = 0;
    let mut unknown_admin_levels = 0;
    let mut missing: HashSet<i64> = HashSet::new();

    let rows = winners
        .iter()
        .filter_map(|record| {
            // The aggregator never emits records without a ufi.
            let ufi = record.ufi?;
            let label = labeler.label(record);
            if !label.country_resolved {
                unresolved_country_codes += 1;
            }
            if !label.level_known {
                log::debug!("Unknown admin level {} for ufi {ufi}", record.admin_level);
                unknown_admin_levels += 1;
            }
            let coords = coordinates.join(ufi);
            if coords.is_none() {
                missing.insert(ufi);
            }
            Some(SelectedDivision {
                country_name: label.country_name,
                admin_level: label.level.to_string(),
                subdivision_name: record.name.clone(),
                latitude: coords.map(|c| c.0),
                longitude: coords.map(|c| c.1),
                ufi,
                uni: record.uni,
                name_type: record.name_type.clone().unwrap_or_default(),
            })
        })
        .collect();

    Assembly {
        table: MasterTable::from_rows(rows),
        unresolved_country_codes,
        unknown_admin_levels,
        features_missing_coordinates: missing.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{CountryEntry, CountryTable};
    use crate::model::AdminLevel;
    use crate::test_support::{coord, name};

    #[test]
    fn builds_sorted_rows_with_fallbacks() {
        let countries = CountryTable::from_entries([CountryEntry {
            code: "GM".into(),
            short_name: "Gambia".into(),
            full_name: None,
        }]);
        let labeler = HierarchyLabeler::new(&countries);
        let index = CoordinateIndex::build(&[coord(0, 2, 13.4, -16.6)]);

        let mut foreign = name(0, 1, AdminLevel::Adm1, "N", Some(1), "Dakar");
        foreign.country_code = Some("SG".into());
        let lower_river = name(1, 2, AdminLevel::Adm1, "N", Some(1), "Lower River");
        let central = name(2, 3, AdminLevel::Adm1, "C", Some(1), "Central River");
        let winners = vec![&foreign, &lower_river, &central];

        let assembly = assemble(&winners, &index, &labeler);
        let rows = assembly.table.rows();
        let order: Vec<_> = rows.iter().map(|r| r.subdivision_name.as_str()).collect();
        assert_eq!(order, ["Central River", "Lower River", "Dakar"]);

        assert_eq!(rows[0].latitude, None);
        assert_eq!(rows[1].latitude, Some(13.4));
        assert_eq!(rows[1].longitude, Some(-16.6));
        assert_eq!(rows[2].country_name, "SG");
        assert_eq!(rows[0].name_type, "C");

        assert_eq!(assembly.unresolved_country_codes, 1);
        assert_eq!(assembly.features_missing_coordinates, 2);
        assert_eq!(assembly.unknown_admin_levels, 0);
    }

    #[test]
    fn filters_rows_by_level() {
        let rows = vec![
            SelectedDivision {
                country_name: "A".into(),
                admin_level: "ADM2".into(),
                subdivision_name: "x".into(),
                latitude: None,
                longitude: None,
                ufi: 1,
                uni: 1,
                name_type: "N".into(),
            },
            SelectedDivision {
                country_name: "A".into(),
                admin_level: "ADM1".into(),
                subdivision_name: "y".into(),
                latitude: None,
                longitude: None,
                ufi: 2,
                uni: 2,
                name_type: "N".into(),
            },
        ];
        let table = MasterTable::from_rows(rows);
        assert_eq!(table.rows()[0].admin_level, "ADM1");
        assert_eq!(table.rows_at_level("adm2").count(), 1);
        assert_eq!(table.levels().into_iter().collect::<Vec<_>>(), ["ADM1", "ADM2"]);
    }
}
