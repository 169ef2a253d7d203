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

//! Normalization of each open data export into a generated file.
//!
//! No filtering and no join happen here, the objects are read with their
//! raw field names and written back with the normalized ones.

use crate::{
    configuration::Configuration,
    files,
    objects::{Access, Zone, ZoneAccessRelationship, ZoneLineRelationship},
    read_utils::read_objects,
    write_utils::write_objects,
    Result,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

fn transform<O>(config: &Configuration, source: &str, generated: &str) -> Result<()>
where
    O: DeserializeOwned + Serialize,
{
    info!("Transforming {} into {}", source, generated);
    let objects: Vec<O> = read_objects(config.source_file(source))?;
    write_objects(config.generated_file(generated), &objects)
}

/// Normalize the stop areas
pub fn transform_zones(config: &Configuration) -> Result<()> {
    transform::<Zone>(config, files::SOURCE_ZONES, files::ZONES)
}

/// Normalize the accesses
pub fn transform_accesses(config: &Configuration) -> Result<()> {
    transform::<Access>(config, files::SOURCE_ACCESSES, files::ACCESSES)
}

/// Normalize the links between stop areas and accesses
pub fn transform_zone_access_relationships(config: &Configuration) -> Result<()> {
    transform::<ZoneAccessRelationship>(
        config,
        files::SOURCE_ZONES_ACCESSES,
        files::ZONES_ACCESSES,
    )
}

/// Normalize the links between stop areas and lines.
/// Rows without zone are kept, with a warning.
pub fn transform_zone_line_relationships(config: &Configuration) -> Result<()> {
    info!(
        "Transforming {} into {}",
        files::SOURCE_ZONES_LINES,
        files::ZONES_LINES
    );
    let relationships: Vec<ZoneLineRelationship> =
        read_objects(config.source_file(files::SOURCE_ZONES_LINES))?;
    for relationship in relationships.iter().filter(|r| r.zone_id.is_none()) {
        warn!(
            "{} line {} linked to no zone",
            relationship.mode, relationship.line_id
        );
    }
    write_objects(config.generated_file(files::ZONES_LINES), &relationships)
}
