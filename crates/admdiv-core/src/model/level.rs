// crates/admdiv-core/src/model/level.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative depth of a division, derived from the GNS designation code.
///
/// `ADM1`..`ADM4` (with or without the historical `H` suffix) and the bare
/// digits `1`..`4` map to the four numbered levels. `ADMD` is a general
/// administrative division with no fixed depth. Anything else is kept as
/// [`AdminLevel::Unknown`] with the normalized raw code for diagnostics;
/// grouping goes through [`AdminLevel::group_level`], which merges them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AdminLevel {
    Adm1,
    Adm2,
    Adm3,
    Adm4,
    General,
    Unknown(String),
}

impl AdminLevel {
    /// Labels in output order, `UNKNOWN` last.
    pub const LABELS: [&'static str; 6] = ["ADM1", "ADM2", "ADM3", "ADM4", "ADMD", "UNKNOWN"];

    pub fn parse(raw: &str) -> Self {
        let code = raw.trim().to_ascii_uppercase();
        let level = match code.strip_prefix("ADM") {
            Some(body) => match body.strip_suffix('H').unwrap_or(body) {
                "1" => Some(Self::Adm1),
                "2" => Some(Self::Adm2),
                "3" => Some(Self::Adm3),
                "4" => Some(Self::Adm4),
                "D" => Some(Self::General),
                _ => None,
            },
            None => match code.as_str() {
                "1" => Some(Self::Adm1),
                "2" => Some(Self::Adm2),
                "3" => Some(Self::Adm3),
                "4" => Some(Self::Adm4),
                _ => None,
            },
        };
        level.unwrap_or(Self::Unknown(code))
    }

    /// Whether a designation code describes an administrative division at all.
    ///
    /// Empty codes count as administrative (they become `Unknown`); codes
    /// such as `PPL` or `STM` do not.
    pub fn is_administrative(raw: &str) -> bool {
        let code = raw.trim();
        code.is_empty()
            || code.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("ADM"))
            || code.chars().all(|c| c.is_ascii_digit())
    }

    /// Level used as the grouping key. Every unknown code collapses into
    /// one `Unknown` bucket because they all share the `UNKNOWN` label.
    pub fn group_level(&self) -> Self {
        match self {
            Self::Unknown(_) => Self::Unknown(String::new()),
            known => known.clone(),
        }
    }

    /// Position of [`Self::label`] in [`Self::LABELS`].
    pub fn label_index(&self) -> usize {
        match self {
            Self::Adm1 => 0,
            Self::Adm2 => 1,
            Self::Adm3 => 2,
            Self::Adm4 => 3,
            Self::General => 4,
            Self::Unknown(_) => 5,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Adm1 => "ADM1",
            Self::Adm2 => "ADM2",
            Self::Adm3 => "ADM3",
            Self::Adm4 => "ADM4",
            Self::General => "ADMD",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(raw) if !raw.is_empty() => write!(f, "UNKNOWN({raw})"),
            other => f.write_str(other.label()),
        }
    }
}
