// crates/admdiv-core/src/aggregate.rs

//! # Feature Aggregator
//!
//! Groups name records by `(ufi, admin level)`. The same feature at two
//! levels gives two groups; each gets its own winner. All unknown
//! designations of one feature form a single group.

use crate::loader::RowIssue;
use crate::model::{AdminLevel, NameRecord};
use std::collections::BTreeMap;

/// Grouping key. Ordered, so group iteration never depends on hashing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub ufi: i64,
    pub level: AdminLevel,
}

/// Candidates of one group, in input order. Never empty when produced by
/// [`group_records`].
#[derive(Debug, Clone)]
pub struct NameGroup<'a> {
    pub key: GroupKey,
    pub candidates: Vec<&'a NameRecord>,
}

#[derive(Debug, Default)]
pub struct Grouping<'a> {
    /// Ascending by key.
    pub groups: Vec<NameGroup<'a>>,
    /// Records dropped for lack of a feature id.
    pub ungroupable: Vec<RowIssue>,
}

pub fn group_records(records: &[NameRecord]) -> Grouping<'_> {
    let mut map: BTreeMap<GroupKey, Vec<&NameRecord>> = BTreeMap::new();
    let mut ungroupable = Vec::new();

    for record in records {
        let Some(ufi) = record.ufi else {
            log::warn!("Dropping '{}' on line {}: no ufi", record.name, record.line);
            ungroupable.push(RowIssue::UngroupableRecord { line: record.line });
            continue;
        };
        let key = GroupKey {
            ufi,
            level: record.admin_level.group_level(),
        };
        map.entry(key).or_default().push(record);
    }

    let groups = map
        .into_iter()
        .map(|(key, candidates)| NameGroup { key, candidates })
        .collect::<Vec<_>>();
    log::debug!("Grouped {} records into {} groups", records.len(), groups.len());

    Grouping { groups, ungroupable }
}
