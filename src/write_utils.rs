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

//! Writing of the generated JSON files.

use crate::Result;
use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Serialize `objects` as an indented JSON array and replace `path` with it.
///
/// The content is first written in a temporary file of the same directory,
/// so `path` is never left half written.
pub fn write_objects<O, P>(path: P, objects: &[O]) -> Result<()>
where
    O: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Writing {} objects to {:?}", objects.len(), path);
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory).with_context(|| format!("Error creating {:?}", directory))?;

    let file = NamedTempFile::new_in(directory)
        .with_context(|| format!("Error creating a temporary file in {:?}", directory))?;
    {
        let mut writer = BufWriter::new(file.as_file());
        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        objects
            .serialize(&mut serializer)
            .with_context(|| format!("Error writing {:?}", path))?;
        writer
            .flush()
            .with_context(|| format!("Error writing {:?}", path))?;
    }
    file.persist(path)
        .map_err(|e| anyhow!(e.error))
        .with_context(|| format!("Error writing {:?}", path))?;
    Ok(())
}
