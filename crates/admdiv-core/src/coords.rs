// crates/admdiv-core/src/coords.rs

//! # Coordinate Joiner
//!
//! Resolves one coordinate per feature. Policy when a feature has several
//! coordinate records: the first-seen record flagged `primary`, otherwise the
//! first-seen record. Features without coordinates resolve to `None`.

use crate::model::CoordinateRecord;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Read-only ufi → coordinate index, safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct CoordinateIndex {
    by_ufi: HashMap<i64, CoordinateRecord>,
    /// Features that had more than one coordinate record.
    ambiguous: usize,
}

impl CoordinateIndex {
    pub fn build(records: &[CoordinateRecord]) -> Self {
        let mut by_ufi: HashMap<i64, CoordinateRecord> = HashMap::with_capacity(records.len());
        let mut seen_twice: HashSet<i64> = HashSet::new();

        // `records` is in load order, so the first insert per ufi is the first seen.
        for record in records {
            match by_ufi.entry(record.ufi) {
                Entry::Vacant(slot) => {
                    slot.insert(*record);
                }
                Entry::Occupied(mut slot) => {
                    seen_twice.insert(record.ufi);
                    if record.primary && !slot.get().primary {
                        slot.insert(*record);
                    }
                }
            }
        }

        Self {
            by_ufi,
            ambiguous: seen_twice.len(),
        }
    }

    pub fn lookup(&self, ufi: i64) -> Option<&CoordinateRecord> {
        self.by_ufi.get(&ufi)
    }

    /// `(latitude, longitude)` or `None` for a feature without coordinates.
    pub fn join(&self, ufi: i64) -> Option<(f64, f64)> {
        self.lookup(ufi).map(|c| (c.latitude, c.longitude))
    }

    pub fn len(&self) -> usize {
        self.by_ufi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ufi.is_empty()
    }

    pub fn ambiguous_features(&self) -> usize {
        self.ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::coord;

    #[test]
    fn first_seen_wins() {
        let index = CoordinateIndex::build(&[coord(0, 1, 10.0, 20.0), coord(1, 1, 11.0, 21.0), coord(2, 2, 5.0, 6.0)]);
        assert_eq!(index.join(1), Some((10.0, 20.0)));
        assert_eq!(index.join(2), Some((5.0, 6.0)));
        assert_eq!(index.ambiguous_features(), 1);
    }

    #[test]
    fn primary_flag_overrides_order() {
        let mut primary = coord(2, 1, 12.0, 22.0);
        primary.primary = true;
        let mut later_primary = coord(3, 1, 13.0, 23.0);
        later_primary.primary = true;
        let index = CoordinateIndex::build(&[coord(0, 1, 10.0, 20.0), primary, later_primary]);
        assert_eq!(index.join(1), Some((12.0, 22.0)));
    }

    #[test]
    fn missing_feature_has_no_coordinates() {
        let index = CoordinateIndex::build(&[coord(0, 1, 10.0, 20.0)]);
        assert_eq!(index.join(99), None);
        assert!(CoordinateIndex::default().is_empty());
    }
}
