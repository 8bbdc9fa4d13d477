// crates/admdiv-core/src/query.rs
use crate::assemble::MasterTable;
use crate::loader::CountryTable;
use crate::model::SelectedDivision;
use crate::text::{contains_folded, fold_key};

/// Filter over an assembled table. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivisionQuery {
    /// Folded substring of the country name, or (with a country table) a
    /// country code or full name.
    pub country: Option<String>,
    /// Level label, e.g. `ADM2` (case-insensitive, exact).
    pub level: Option<String>,
    /// Folded substring of the subdivision name.
    pub name: Option<String>,
}

impl DivisionQuery {
    pub fn matches(&self, row: &SelectedDivision) -> bool {
        self.matches_resolved(row, &[])
    }

    /// `resolved` holds display names the country filter resolved to.
    fn matches_resolved(&self, row: &SelectedDivision, resolved: &[String]) -> bool {
        self.country.as_deref().map_or(true, |c| {
            contains_folded(&row.country_name, c) || resolved.iter().any(|r| *r == row.country_name)
        }) && self
            .level
            .as_deref()
            .map_or(true, |l| row.admin_level.eq_ignore_ascii_case(l.trim()))
            && self
                .name
                .as_deref()
                .map_or(true, |n| contains_folded(&row.subdivision_name, n))
    }

    /// Matching rows in table order; exact (folded) name matches first.
    pub fn run<'a>(&self, table: &'a MasterTable) -> Vec<&'a SelectedDivision> {
        self.run_resolved(table, &[])
    }

    /// Like [`run`](Self::run), with the country filter also resolved through
    /// [`CountryTable::search`], so `GA` finds rows of `Gambia, The`.
    pub fn run_with_countries<'a>(&self, table: &'a MasterTable, countries: &CountryTable) -> Vec<&'a SelectedDivision> {
        let resolved: Vec<String> = self
            .country
            .as_deref()
            .map(|c| countries.search(c).into_iter().map(|e| e.short_name.clone()).collect())
            .unwrap_or_default();
        log::debug!("Country filter resolved to {resolved:?}");
        self.run_resolved(table, &resolved)
    }

    fn run_resolved<'a>(&self, table: &'a MasterTable, resolved: &[String]) -> Vec<&'a SelectedDivision> {
        let mut hits: Vec<&SelectedDivision> = table
            .rows()
            .iter()
            .filter(|r| self.matches_resolved(r, resolved))
            .collect();
        if let Some(name) = self.name.as_deref() {
            let wanted = fold_key(name);
            // Stable sort keeps table order within each bucket.
            hits.sort_by_key(|r| fold_key(&r.subdivision_name) != wanted);
        }
        hits
    }
}
