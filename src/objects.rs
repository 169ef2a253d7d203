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

//! Definition of the objects read from the open data exports and written to
//! the generated files.
//!
//! Every object is deserialized through a [Record] so that it can be read
//! either from the raw export (e.g. `zdaid`) or from a normalized file
//! (e.g. `id`). Serialization always uses the normalized names, in the
//! order of declaration.

use crate::serde_utils::{Record, RecordError};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use typed_index_collection::Id;

/// Geographic coordinates (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude
    pub lon: f64,
    /// Latitude
    pub lat: f64,
}

/// An entrance or an exit of a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Record")]
pub struct Access {
    /// Unique identifier
    pub id: String,
    /// Name of the access
    pub name: String,
    /// Number displayed on the access, if any
    pub short_name: Option<i64>,
    /// X coordinate in Lambert 93 (EPSG:2154)
    pub x_lambert_93: i64,
    /// Y coordinate in Lambert 93 (EPSG:2154)
    pub y_lambert_93: i64,
    /// Coordinates in WGS84
    pub geo_point: GeoPoint,
}

impl TryFrom<Record> for Access {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(Access {
            id: record.identifier(&["accid", "id"])?,
            name: record.string(&["accname", "name"])?,
            short_name: record.opt_integer(&["accshortname", "short_name"])?,
            x_lambert_93: record.integer(&["accxepsg2154", "accxespg2154", "x_lambert_93"])?,
            y_lambert_93: record.integer(&["accyepsg2154", "accyespg2154", "y_lambert_93"])?,
            geo_point: record.value(&["accgeopoint", "geo_point"])?,
        })
    }
}

impl Id<Access> for Access {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A transit line, with the icon used to display it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Record")]
pub struct Line {
    /// Unique identifier
    pub id: String,
    /// Name of the line (e.g. `1`, `7bis`)
    pub name: String,
    /// Where the icon can be downloaded
    pub icon_url: Option<String>,
    /// Name of the downloaded icon file
    pub icon_filename: Option<String>,
    /// Dominant color of the icon, as found in its `fill` attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TryFrom<Record> for Line {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(Line {
            id: record.identifier(&["id"])?,
            name: record.string(&["name"])?,
            icon_url: record.opt_string(&["icon_url"])?,
            icon_filename: record.opt_string(&["icon_filename"])?,
            color: record.opt_string(&["color"])?,
        })
    }
}

impl Id<Line> for Line {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl From<&ZoneLineRelationship> for Line {
    fn from(relationship: &ZoneLineRelationship) -> Self {
        Line {
            id: relationship.line_id.clone(),
            name: relationship.line_name.clone(),
            icon_url: relationship.line_icon_url.clone(),
            icon_filename: relationship.line_icon_filename.clone(),
            color: None,
        }
    }
}

/// A stop area ("zone d'arrêt")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Record")]
pub struct Zone {
    /// Unique identifier
    pub id: String,
    /// Name of the zone
    pub name: String,
    /// Kind of zone (e.g. `metroStation`, `railStation`)
    #[serde(rename = "type")]
    pub zone_type: Option<String>,
    /// Town of the zone
    pub town: String,
    /// Postal code of the zone
    pub postal_region: String,
    /// X coordinate in Lambert 93 (EPSG:2154)
    pub x_lambert_93: i64,
    /// Y coordinate in Lambert 93 (EPSG:2154)
    pub y_lambert_93: i64,
    /// Accesses of the zone, only filled for metro stations
    pub accesses: Vec<Access>,
    /// Lines serving the zone, only filled for metro stations
    pub lines: Vec<Line>,
}

impl TryFrom<Record> for Zone {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(Zone {
            id: record.identifier(&["zdaid", "id"])?,
            name: record.string(&["zdaname", "name"])?,
            zone_type: record.opt_string(&["zdatype", "type"])?,
            town: record.string(&["zdatown", "town"])?,
            postal_region: record.string(&["zdapostalregion", "postal_region"])?,
            x_lambert_93: record.integer(&["zdaxepsg2154", "x_lambert_93"])?,
            y_lambert_93: record.integer(&["zdayepsg2154", "y_lambert_93"])?,
            accesses: record.value_or_default(&["accesses"])?,
            lines: record.value_or_default(&["lines"])?,
        })
    }
}

impl Id<Zone> for Zone {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Link between a [Zone] and one of its [Access]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Record")]
pub struct ZoneAccessRelationship {
    /// Identifier of the zone
    pub zone_id: String,
    /// Identifier of the access
    pub access_id: String,
}

impl TryFrom<Record> for ZoneAccessRelationship {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(ZoneAccessRelationship {
            zone_id: record.string(&["zdaid", "zone_id"])?,
            access_id: record.string(&["accid", "access_id"])?,
        })
    }
}

/// Link between a [Zone] and a [Line] stopping there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Record")]
pub struct ZoneLineRelationship {
    /// Identifier of the zone, the export sometimes has no zone
    pub zone_id: Option<String>,
    /// Identifier of the line
    pub line_id: String,
    /// Name of the line
    pub line_name: String,
    /// Where the icon of the line can be downloaded
    pub line_icon_url: Option<String>,
    /// Name of the icon file
    pub line_icon_filename: Option<String>,
    /// Transport mode (e.g. `METRO`, `RER`, `TRAMWAY`)
    pub mode: String,
}

impl TryFrom<Record> for ZoneLineRelationship {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(ZoneLineRelationship {
            zone_id: record.opt_scalar_string(&["id_ref_zda", "zone_id"])?,
            line_id: record.string(&["idrefliga", "line_id"])?,
            line_name: record.string(&["res_com", "line_name"])?,
            line_icon_url: record.opt_string(&["picto.url", "line_icon_url"])?,
            line_icon_filename: record.opt_string(&["picto.filename", "line_icon_filename"])?,
            mode: record.string(&["mode"])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn raw_access() {
        let access: Access = serde_json::from_value(json!({
            "accid": "474151",
            "accname": "Sortie 1",
            "accshortname": null,
            "accxespg2154": 651234,
            "accyespg2154": 6862345,
            "accgeopoint": {"lon": 2.35, "lat": 48.85}
        }))
        .unwrap();
        assert_eq!("474151", access.id);
        assert_eq!(None, access.short_name);
        assert_eq!(651234, access.x_lambert_93);
        assert_eq!(GeoPoint { lon: 2.35, lat: 48.85 }, access.geo_point);
    }

    #[test]
    fn access_without_short_name() {
        let access: Access = serde_json::from_value(json!({
            "id": "1",
            "name": "Sortie 1",
            "x_lambert_93": 1,
            "y_lambert_93": 2,
            "geo_point": {"lon": 2.35, "lat": 48.85}
        }))
        .unwrap();
        assert_eq!(None, access.short_name);
    }

    #[test]
    fn access_without_geo_point() {
        let result: Result<Access, _> = serde_json::from_value(json!({
            "accid": "1",
            "accname": "Sortie 1",
            "accxepsg2154": 1,
            "accyepsg2154": 2
        }));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("missing field 'geo_point'"));
    }

    #[test]
    fn raw_zone() {
        let zone: Zone = serde_json::from_value(json!({
            "zdaid": "71264",
            "zdaname": "Châtelet",
            "zdatype": "metroStation",
            "zdatown": "Paris",
            "zdapostalregion": "75101",
            "zdaxepsg2154": 651800,
            "zdayepsg2154": 6862000
        }))
        .unwrap();
        assert_eq!(Some("metroStation".to_string()), zone.zone_type);
        assert!(zone.accesses.is_empty());
        assert!(zone.lines.is_empty());
    }

    #[test]
    fn zone_type_is_serialized_as_type() {
        let zone: Zone = serde_json::from_value(json!({
            "id": "1",
            "name": "Châtelet",
            "type": null,
            "town": "Paris",
            "postal_region": "75101",
            "x_lambert_93": 1,
            "y_lambert_93": 2
        }))
        .unwrap();
        let value = serde_json::to_value(&zone).unwrap();
        assert_eq!(Some(&serde_json::Value::Null), value.get("type"));
        assert_eq!(Some(&json!([])), value.get("accesses"));
    }

    #[test]
    fn raw_zone_line_relationship_with_numeric_zone() {
        let relationship: ZoneLineRelationship = serde_json::from_value(json!({
            "id_ref_zda": 71264,
            "idrefliga": "C01371",
            "res_com": "1",
            "picto": {"url": "https://example.org/m1/download/", "filename": "IDFM_M1.svg"},
            "mode": "METRO"
        }))
        .unwrap();
        assert_eq!(Some("71264".to_string()), relationship.zone_id);
        assert_eq!(
            Some("https://example.org/m1/download/".to_string()),
            relationship.line_icon_url
        );
        assert_eq!(
            Some("IDFM_M1.svg".to_string()),
            relationship.line_icon_filename
        );
    }

    #[test]
    fn raw_zone_line_relationship_without_zone_nor_picto() {
        let relationship: ZoneLineRelationship = serde_json::from_value(json!({
            "id_ref_zda": null,
            "idrefliga": "C01742",
            "res_com": "RER A",
            "picto": null,
            "mode": "RER"
        }))
        .unwrap();
        assert_eq!(None, relationship.zone_id);
        assert_eq!(None, relationship.line_icon_url);
    }

    #[test]
    fn line_color_is_skipped_when_absent() {
        let line = Line {
            id: "C01371".to_string(),
            name: "1".to_string(),
            icon_url: None,
            icon_filename: None,
            color: None,
        };
        assert_eq!(
            r#"{"id":"C01371","name":"1","icon_url":null,"icon_filename":null}"#,
            serde_json::to_string(&line).unwrap()
        );
    }
}
