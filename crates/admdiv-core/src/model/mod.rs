// crates/admdiv-core/src/model/mod.rs

//! # Records
//!
//! Typed records produced once at the loader boundary and never mutated
//! afterwards, plus the output row type.

pub mod division;
pub mod level;
pub mod record;

pub use division::{SelectedDivision, MASTER_COLUMNS};
pub use level::AdminLevel;
pub use record::{CoordinateRecord, NameRecord};
