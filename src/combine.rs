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

//! Attach accesses and lines to the metro stations.

use crate::{
    configuration::Configuration,
    files,
    objects::{Access, Line, Zone, ZoneAccessRelationship, ZoneLineRelationship},
    read_utils::{read_collection_with_id, read_objects},
    write_utils::write_objects,
    Error, Result, METRO_MODE, METRO_STATION_TYPE,
};
use std::collections::HashMap;
use tracing::info;
use typed_index_collection::CollectionWithId;

/// Accesses of each zone, in the order of the relationships
pub fn accesses_by_zone(
    accesses: &CollectionWithId<Access>,
    relationships: &[ZoneAccessRelationship],
) -> Result<HashMap<String, Vec<Access>>> {
    let mut accesses_by_zone: HashMap<String, Vec<Access>> = HashMap::new();
    for relationship in relationships {
        let access = accesses
            .get(&relationship.access_id)
            .ok_or_else(|| Error::Lookup {
                relation: files::ZONES_ACCESSES,
                object_type: "access",
                id: relationship.access_id.clone(),
            })?;
        accesses_by_zone
            .entry(relationship.zone_id.clone())
            .or_default()
            .push(access.clone());
    }
    Ok(accesses_by_zone)
}

/// Metro lines of each zone, in the order of the relationships.
/// Relationships of the other modes are ignored.
pub fn metro_lines_by_zone(
    lines: &CollectionWithId<Line>,
    relationships: &[ZoneLineRelationship],
) -> Result<HashMap<String, Vec<Line>>> {
    let mut lines_by_zone: HashMap<String, Vec<Line>> = HashMap::new();
    for relationship in relationships.iter().filter(|r| r.mode == METRO_MODE) {
        let line = lines
            .get(&relationship.line_id)
            .ok_or_else(|| Error::Lookup {
                relation: files::ZONES_LINES,
                object_type: "line",
                id: relationship.line_id.clone(),
            })?;
        // Rows without zone are reported when normalized.
        if let Some(zone_id) = &relationship.zone_id {
            lines_by_zone
                .entry(zone_id.clone())
                .or_default()
                .push(line.clone());
        }
    }
    Ok(lines_by_zone)
}

/// Keep the metro stations only, with their accesses and lines
pub fn combine_zones(
    zones: &CollectionWithId<Zone>,
    mut accesses_by_zone: HashMap<String, Vec<Access>>,
    mut lines_by_zone: HashMap<String, Vec<Line>>,
) -> Vec<Zone> {
    zones
        .values()
        .filter(|zone| zone.zone_type.as_deref() == Some(METRO_STATION_TYPE))
        .map(|zone| {
            let mut zone = zone.clone();
            zone.accesses = accesses_by_zone.remove(&zone.id).unwrap_or_default();
            zone.lines = lines_by_zone.remove(&zone.id).unwrap_or_default();
            zone
        })
        .collect()
}

/// Read every generated file and write the metro stations with their
/// accesses and lines
pub fn combine(config: &Configuration) -> Result<()> {
    info!("Combining zones, accesses and lines");
    let accesses: CollectionWithId<Access> =
        read_collection_with_id(config.generated_file(files::ACCESSES))?;
    let zones: CollectionWithId<Zone> =
        read_collection_with_id(config.generated_file(files::ZONES))?;
    let lines: CollectionWithId<Line> =
        read_collection_with_id(config.generated_file(files::LINES))?;
    let zones_accesses: Vec<ZoneAccessRelationship> =
        read_objects(config.generated_file(files::ZONES_ACCESSES))?;
    let zones_lines: Vec<ZoneLineRelationship> =
        read_objects(config.generated_file(files::ZONES_LINES))?;

    let accesses_by_zone = accesses_by_zone(&accesses, &zones_accesses)?;
    let lines_by_zone = metro_lines_by_zone(&lines, &zones_lines)?;
    let zones_metro = combine_zones(&zones, accesses_by_zone, lines_by_zone);
    info!("{} metro stations out of {} zones", zones_metro.len(), zones.len());
    write_objects(config.generated_file(files::ZONES_METRO), &zones_metro)
}
