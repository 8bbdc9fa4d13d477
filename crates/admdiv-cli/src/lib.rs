//! admdiv-cli
//! ==========
//!
//! Command-line interface for the `admdiv-core` reconciliation pipeline.
//!
//! This crate primarily provides a binary (`admdiv`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install admdiv-cli
//! admdiv build Administrative_Regions.txt --countries Country_Codes.csv --exports countries/
//! admdiv summary Master_Subdivisions.csv --top 10
//! admdiv query Master_Subdivisions.csv --country gambia --level ADM2
//! ```
//!
//! For programmatic access use the [`admdiv-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
