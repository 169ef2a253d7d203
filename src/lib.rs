// Copyright (C) 2025 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! The `idfm_metro` crate builds a dataset of the metro stations of
//! Île-de-France from the open data exports of
//! [IDFM](https://data.iledefrance-mobilites.fr/): the stop areas, their
//! accesses and the lines serving them, each line with its icon and color.
//!
//! A run goes through the following steps, in this order:
//! 1. [clean](clean::clean) the files generated by the previous run
//! 2. [normalize](transform) each export into a generated file
//! 3. [extract the lines](lines::extract_lines), download their icons and
//!    compute their colors
//! 4. [combine](combine::combine) everything into the metro stations

#![deny(missing_docs)]

pub mod clean;
pub mod combine;
pub mod configuration;
mod error;
pub mod lines;
mod minidom_utils;
pub mod objects;
pub mod read_utils;
pub mod serde_utils;
#[doc(hidden)]
pub mod test_utils;
pub mod transform;
pub mod write_utils;

pub use configuration::Configuration;
pub use error::Error;

/// Transport mode of the lines attached to the stations
pub const METRO_MODE: &str = "METRO";
/// Type of the zones kept in the final file
pub const METRO_STATION_TYPE: &str = "metroStation";

/// Names of the files read and written by the pipeline
pub mod files {
    /// Stop areas export
    pub const SOURCE_ZONES: &str = "zones-d-arrets.json";
    /// Accesses export
    pub const SOURCE_ACCESSES: &str = "acces.json";
    /// Links between stop areas and accesses export
    pub const SOURCE_ZONES_ACCESSES: &str = "relations-acces.json";
    /// Links between stop areas and lines export
    pub const SOURCE_ZONES_LINES: &str = "emplacement-des-gares-idf.json";

    /// Normalized stop areas
    pub const ZONES: &str = "zones.json";
    /// Normalized accesses
    pub const ACCESSES: &str = "accesses.json";
    /// Normalized links between stop areas and accesses
    pub const ZONES_ACCESSES: &str = "zones_accesses_rel.json";
    /// Normalized links between stop areas and lines
    pub const ZONES_LINES: &str = "zones_lines_rel.json";
    /// Distinct lines with their colors
    pub const LINES: &str = "lines.json";
    /// Metro stations with their accesses and lines
    pub const ZONES_METRO: &str = "zones_metro.json";
}

/// The corresponding result type used by the crate.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Run every step of the pipeline, stopping at the first error
pub fn run<D: lines::IconDownloader>(config: &Configuration, downloader: &D) -> Result<()> {
    tracing::info!("Building metro stations with {:?}", config);
    clean::clean(config)?;
    transform::transform_zones(config)?;
    transform::transform_accesses(config)?;
    transform::transform_zone_access_relationships(config)?;
    transform::transform_zone_line_relationships(config)?;
    lines::extract_lines(config, downloader)?;
    combine::combine(config)?;
    tracing::info!("Metro stations written in {:?}", config.generated_dir);
    Ok(())
}
