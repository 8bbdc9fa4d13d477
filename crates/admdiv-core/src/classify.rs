// crates/admdiv-core/src/classify.rs

//! # Name Classifier
//!
//! Turns a name record's type code and rank into an ordered [`PriorityKey`].
//! Smaller keys are better. Classification never fails: unknown or missing
//! codes land in the lowest tier and stay eligible.

use crate::model::NameRecord;
use serde::{Deserialize, Serialize};

/// Priority tier of a GNS name-type code. Declaration order is preference
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NameType {
    /// `N`: approved / official name.
    Official,
    /// `C`: conventional name.
    Conventional,
    /// `V`: variant name.
    Variant,
    /// Everything else: `D`, `VA`, `VS`, unknown or missing codes.
    Other,
}

impl NameType {
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some(c) if c.eq_ignore_ascii_case("N") => Self::Official,
            Some(c) if c.eq_ignore_ascii_case("C") => Self::Conventional,
            Some(c) if c.eq_ignore_ascii_case("V") => Self::Variant,
            _ => Self::Other,
        }
    }
}

/// Comparison key of one candidate: tier first, then rank.
///
/// A missing rank sorts after every present rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey {
    pub tier: NameType,
    pub rank: u32,
}

impl PriorityKey {
    pub const MISSING_RANK: u32 = u32::MAX;
}

pub fn classify(record: &NameRecord) -> PriorityKey {
    PriorityKey {
        tier: NameType::from_code(record.name_type.as_deref()),
        rank: record.name_rank.unwrap_or(PriorityKey::MISSING_RANK),
    }
}
