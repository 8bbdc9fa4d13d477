// crates/admdiv-core/src/select.rs

//! # Best-Name Selector
//!
//! Picks the winning record of one group. Candidates are ordered by
//!
//! 1. the classifier's [`PriorityKey`] (tier, then rank),
//! 2. the language preference, only when [`SelectionPolicy::prefer_languages`] is set,
//! 3. input position (`seq`), earliest first.
//!
//! `seq` is unique per record, so this is a total order and the winner never
//! depends on hash or thread scheduling order.

use crate::aggregate::NameGroup;
use crate::classify::{classify, PriorityKey};
use crate::config::SelectionPolicy;
use crate::error::{AdmDivError, Result};
use crate::model::NameRecord;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static COMMON_LOCAL_LANGUAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["spa", "fra", "deu", "ita", "por", "rus", "ara", "zho", "jpn", "hin"]
        .into_iter()
        .collect()
});

/// 0 = English, 1 = common local language, 2 = anything else.
pub fn language_rank(language: Option<&str>) -> u8 {
    match language.map(str::trim) {
        Some(l) if l.eq_ignore_ascii_case("eng") => 0,
        Some(l) if COMMON_LOCAL_LANGUAGES.contains(l.to_ascii_lowercase().as_str()) => 1,
        _ => 2,
    }
}

/// Full ordering key of a candidate under `policy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionKey {
    pub priority: PriorityKey,
    pub language: u8,
    pub seq: usize,
}

pub fn selection_key(record: &NameRecord, policy: &SelectionPolicy) -> SelectionKey {
    SelectionKey {
        priority: classify(record),
        language: if policy.prefer_languages {
            language_rank(record.language.as_deref())
        } else {
            0
        },
        seq: record.seq,
    }
}

/// Returns the best candidate of `group`.
///
/// An empty group is an invariant breach and yields [`AdmDivError::EmptyGroup`].
pub fn select_best<'a>(group: &NameGroup<'a>, policy: &SelectionPolicy) -> Result<&'a NameRecord> {
    group
        .candidates
        .iter()
        .copied()
        .min_by_key(|r| selection_key(r, policy))
        .ok_or_else(|| AdmDivError::EmptyGroup {
            ufi: group.key.ufi,
            level: group.key.level.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::GroupKey;
    use crate::model::AdminLevel;
    use crate::test_support::name;

    fn group(records: &[NameRecord]) -> NameGroup<'_> {
        NameGroup {
            key: GroupKey {
                ufi: 1,
                level: AdminLevel::Adm2,
            },
            candidates: records.iter().collect(),
        }
    }

    fn winner(records: &[NameRecord]) -> String {
        select_best(&group(records), &SelectionPolicy::default())
            .unwrap()
            .name
            .clone()
    }

    #[test]
    fn official_beats_variant_regardless_of_rank() {
        let records = [
            name(0, 1, AdminLevel::Adm2, "V", Some(5), "Alt1"),
            name(1, 1, AdminLevel::Adm2, "N", Some(3), "Main"),
        ];
        assert_eq!(winner(&records), "Main");
    }

    #[test]
    fn lower_rank_wins_within_official_tier() {
        let records = [
            name(0, 1, AdminLevel::Adm2, "N", Some(3), "A"),
            name(1, 1, AdminLevel::Adm2, "N", Some(1), "B"),
        ];
        assert_eq!(winner(&records), "B");
    }

    #[test]
    fn official_wins_in_every_input_order() {
        let base = [("V", "Variant"), ("N", "Official"), ("C", "Conventional")];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders {
            let records: Vec<_> = order
                .iter()
                .enumerate()
                .map(|(seq, &i)| name(seq, 1, AdminLevel::Adm2, base[i].0, Some(1), base[i].1))
                .collect();
            assert_eq!(winner(&records), "Official", "order {order:?}");
        }
    }

    #[test]
    fn equal_keys_fall_back_to_input_order() {
        let records = [
            name(4, 1, AdminLevel::Adm2, "N", Some(1), "First"),
            name(9, 1, AdminLevel::Adm2, "N", Some(1), "Second"),
        ];
        assert_eq!(winner(&records), "First");
        // selection is reproducible
        assert_eq!(winner(&records), "First");
    }

    #[test]
    fn variant_only_group_still_has_a_winner() {
        let records = [
            name(0, 1, AdminLevel::Adm2, "V", Some(4), "Var4"),
            name(1, 1, AdminLevel::Adm2, "V", Some(2), "Var2"),
            name(2, 1, AdminLevel::Adm2, "", None, "NoType"),
        ];
        assert_eq!(winner(&records), "Var2");
    }

    #[test]
    fn empty_group_is_an_error() {
        let empty = group(&[]);
        let err = select_best(&empty, &SelectionPolicy::default()).unwrap_err();
        assert!(matches!(err, AdmDivError::EmptyGroup { ufi: 1, .. }));
    }

    #[test]
    fn language_preference_is_opt_in() {
        let mut french = name(0, 1, AdminLevel::Adm2, "N", Some(1), "Gambie");
        french.language = Some("fra".into());
        let mut english = name(1, 1, AdminLevel::Adm2, "N", Some(1), "Gambia");
        english.language = Some("eng".into());
        let records = [french, english];

        assert_eq!(winner(&records), "Gambie");
        let policy = SelectionPolicy { prefer_languages: true };
        assert_eq!(select_best(&group(&records), &policy).unwrap().name, "Gambia");
    }

    #[test]
    fn language_never_overrides_rank() {
        let mut english = name(0, 1, AdminLevel::Adm2, "N", Some(2), "English");
        english.language = Some("eng".into());
        let records = [english, name(1, 1, AdminLevel::Adm2, "N", Some(1), "Local")];
        let policy = SelectionPolicy { prefer_languages: true };
        assert_eq!(select_best(&group(&records), &policy).unwrap().name, "Local");
    }

    #[test]
    fn selection_keys_order_best_first() {
        let records = [
            name(0, 1, AdminLevel::Adm2, "V", Some(1), "v"),
            name(1, 1, AdminLevel::Adm2, "C", Some(1), "c"),
            name(2, 1, AdminLevel::Adm2, "N", Some(1), "n"),
        ];
        let mut sorted: Vec<_> = records.iter().collect();
        sorted.sort_by_key(|r| selection_key(r, &SelectionPolicy::default()));
        let order: Vec<_> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, ["n", "c", "v"]);
        assert_eq!(language_rank(Some("DEU")), 1);
        assert_eq!(language_rank(None), 2);
    }
}
