// crates/admdiv-core/src/model/division.rs
use serde::{Deserialize, Serialize};

/// Header of the master table and of every partition file.
pub const MASTER_COLUMNS: [&str; 8] = [
    "Country_Name",
    "Admin_Level",
    "Subdivision_Name",
    "Latitude",
    "Longitude",
    "UFI",
    "UNI",
    "Name_Type",
];

/// One row of the master table: the winning name of one
/// (feature, admin level) group.
///
/// Field order is the column order of the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDivision {
    #[serde(rename = "Country_Name")]
    pub country_name: String,
    #[serde(rename = "Admin_Level")]
    pub admin_level: String,
    #[serde(rename = "Subdivision_Name")]
    pub subdivision_name: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "UFI")]
    pub ufi: i64,
    #[serde(rename = "UNI")]
    pub uni: i64,
    #[serde(rename = "Name_Type")]
    pub name_type: String,
}

impl SelectedDivision {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
