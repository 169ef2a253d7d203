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

//! Removal of everything generated by a previous run.

use crate::{configuration::Configuration, Error, Result};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

fn remove_files(directory: &Path) -> Result<usize> {
    if !directory.exists() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in WalkDir::new(directory).min_depth(1) {
        let entry = entry.with_context(|| format!("Error reading {:?}", directory))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        debug!("removing {:?}", path);
        match fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Error removing {:?}", path));
            }
        }
    }
    Ok(removed)
}

// Paths are compared once resolved, a missing directory has nothing to
// lose or nothing to remove.
fn contains(directory: &Path, other: &Path) -> bool {
    match (directory.canonicalize(), other.canonicalize()) {
        (Ok(directory), Ok(other)) => other.starts_with(directory),
        _ => false,
    }
}

fn check_sources_are_kept(config: &Configuration) -> Result<()> {
    for directory in &[&config.generated_dir, &config.icons_dir] {
        if contains(directory, &config.source_dir) {
            return Err(Error::SourceInCleanedDir {
                directory: directory.to_path_buf(),
                source_dir: config.source_dir.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Remove the generated JSON files and the downloaded icons, then make sure
/// the generated and icons directories exist.
///
/// Fails without removing anything when the source directory lies inside
/// the generated or icons directory.
pub fn clean(config: &Configuration) -> Result<()> {
    check_sources_are_kept(config)?;
    let mut removed = remove_files(&config.generated_dir)?;
    if !config.icons_dir.starts_with(&config.generated_dir) {
        removed += remove_files(&config.icons_dir)?;
    }
    info!("{} generated files removed", removed);
    for directory in &[&config.generated_dir, &config.icons_dir] {
        fs::create_dir_all(directory)
            .with_context(|| format!("Error creating {:?}", directory))?;
    }
    Ok(())
}
