// crates/admdiv-core/src/hierarchy.rs

//! # Hierarchy Labeler
//!
//! Derives the output level label and the country display name of a
//! winning record. Unresolvable values fall back instead of failing the row.

use crate::loader::CountryTable;
use crate::model::NameRecord;

/// Label and country of one winning record, plus whether each had to fall back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyLabel {
    pub level: &'static str,
    pub country_name: String,
    pub level_known: bool,
    pub country_resolved: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct HierarchyLabeler<'a> {
    countries: &'a CountryTable,
}

impl<'a> HierarchyLabeler<'a> {
    pub fn new(countries: &'a CountryTable) -> Self {
        Self { countries }
    }

    pub fn label(&self, record: &NameRecord) -> HierarchyLabel {
        let (country_name, country_resolved) = self.country_name(record.country_code.as_deref());
        HierarchyLabel {
            level: record.admin_level.label(),
            country_name,
            level_known: !record.admin_level.is_unknown(),
            country_resolved,
        }
    }

    /// Short name from the table, else the raw code, else an empty string.
    pub fn country_name(&self, code: Option<&str>) -> (String, bool) {
        match code {
            Some(code) => match self.countries.resolve(code) {
                Some(entry) => (entry.short_name.clone(), true),
                None => (code.to_string(), false),
            },
            None => (String::new(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CountryEntry;
    use crate::model::AdminLevel;
    use crate::test_support::name;

    fn table() -> CountryTable {
        CountryTable::from_entries([CountryEntry {
            code: "GA".into(),
            short_name: "Gambia, The".into(),
            full_name: None,
        }])
    }

    #[test]
    fn resolves_known_codes() {
        let countries = table();
        let labeler = HierarchyLabeler::new(&countries);
        let label = labeler.label(&name(0, 1, AdminLevel::Adm3, "N", Some(1), "Kiang West"));
        assert_eq!(label.country_name, "GM");
        assert!(!label.country_resolved);

        let mut record = name(0, 1, AdminLevel::Adm3, "N", Some(1), "Kiang West");
        record.country_code = Some("ga".into());
        let label = labeler.label(&record);
        assert_eq!(label.level, "ADM3");
        assert_eq!(label.country_name, "Gambia, The");
        assert!(label.country_resolved && label.level_known);
    }

    #[test]
    fn flags_unknown_levels_and_missing_codes() {
        let countries = table();
        let labeler = HierarchyLabeler::new(&countries);
        let mut record = name(0, 1, AdminLevel::Unknown("ADM5".into()), "N", Some(1), "Deep");
        record.country_code = None;
        let label = labeler.label(&record);
        assert_eq!(label.level, "UNKNOWN");
        assert!(!label.level_known);
        assert_eq!(label.country_name, "");
        assert!(!label.country_resolved);

        let general = labeler.label(&name(0, 1, AdminLevel::General, "N", None, "Region"));
        assert_eq!(general.level, "ADMD");
        assert!(general.level_known);
    }
}
