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
//! Where the pipeline reads its sources and writes what it generates.

use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default directory of the open data exports
pub const SOURCE_DIR: &str = "source_data_files";
/// Default directory of the generated files
pub const GENERATED_DIR: &str = "generated_data_files";
/// Name of the icons directory, inside the generated directory by default
pub const ICONS_DIR: &str = "icons";

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source_dir: Option<PathBuf>,
    generated_dir: Option<PathBuf>,
    icons_dir: Option<PathBuf>,
}

/// Directories used by a run
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Directory containing the open data exports
    pub source_dir: PathBuf,
    /// Directory receiving every generated JSON file
    pub generated_dir: PathBuf,
    /// Directory receiving the downloaded icons
    pub icons_dir: PathBuf,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(SOURCE_DIR, GENERATED_DIR)
    }
}

impl Configuration {
    /// Configuration with the icons stored inside the generated directory
    pub fn new<S: Into<PathBuf>, G: Into<PathBuf>>(source_dir: S, generated_dir: G) -> Self {
        let generated_dir = generated_dir.into();
        Configuration {
            source_dir: source_dir.into(),
            icons_dir: generated_dir.join(ICONS_DIR),
            generated_dir,
        }
    }

    /// Path of an export in the source directory
    pub fn source_file(&self, name: &str) -> PathBuf {
        self.source_dir.join(name)
    }

    /// Path of a file in the generated directory
    pub fn generated_file(&self, name: &str) -> PathBuf {
        self.generated_dir.join(name)
    }
}

/// Read a JSON configuration file, every field is optional.
/// Without a file, the default configuration is used.
///
/// Below is an example of this file
/// ```text
/// {
///     "source_dir": "/data/idfm",
///     "generated_dir": "/srv/metro/data",
///     "icons_dir": "/srv/metro/icons"
/// }
/// ```
pub fn read_config<P: AsRef<Path>>(config_path: Option<P>) -> Result<Configuration> {
    let config_path = match config_path {
        Some(config_path) => config_path,
        None => return Ok(Configuration::default()),
    };
    let config_path = config_path.as_ref();
    info!("Reading configuration from {:?}", config_path);
    let json_config_file =
        File::open(config_path).with_context(|| format!("Error reading {:?}", config_path))?;
    let config: ConfigFile = serde_json::from_reader(json_config_file)
        .with_context(|| format!("Error reading {:?}", config_path))?;

    let mut configuration = Configuration::new(
        config.source_dir.unwrap_or_else(|| PathBuf::from(SOURCE_DIR)),
        config
            .generated_dir
            .unwrap_or_else(|| PathBuf::from(GENERATED_DIR)),
    );
    if let Some(icons_dir) = config.icons_dir {
        configuration.icons_dir = icons_dir;
    }
    Ok(configuration)
}
