// Copyright (C) 2017 Hove and/or its affiliates.
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

//! Reading of the JSON files, raw exports or generated files alike.

use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use typed_index_collection::{CollectionWithId, Id};

/// Read a JSON array of objects, keeping the order of the file.
/// The first invalid object fails the whole file.
pub fn read_objects<O, P>(path: P) -> Result<Vec<O>>
where
    O: for<'de> serde::Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Reading {:?}", path);
    let file = File::open(path).with_context(|| format!("Error reading {:?}", path))?;
    let objects: Vec<O> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Error reading {:?}", path))?;
    info!("{} objects read from {:?}", objects.len(), path);
    Ok(objects)
}

/// Read a JSON array of objects with identifiers.
/// Fails if an identifier is found twice.
pub fn read_collection_with_id<O, P>(path: P) -> Result<CollectionWithId<O>>
where
    O: for<'de> serde::Deserialize<'de> + Id<O> + Send + Sync + 'static,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let objects = read_objects(path)?;
    let collection =
        CollectionWithId::new(objects).with_context(|| format!("Error reading {:?}", path))?;
    Ok(collection)
}
