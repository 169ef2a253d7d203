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

use std::path::PathBuf;
use thiserror::Error;

/// Failures specific to the joins and the icon enrichment.
///
/// They travel inside an [anyhow::Error] and can be recovered with
/// `downcast_ref::<idfm_metro::Error>()`.
#[derive(Debug, Error)]
pub enum Error {
    /// A relationship points to an object missing from its collection
    #[error("{relation}: {object_type} '{id}' not found")]
    Lookup {
        /// Name of the relationship file
        relation: &'static str,
        /// Kind of the missing object
        object_type: &'static str,
        /// Identifier of the missing object
        id: String,
    },
    /// Icon file name that would not land directly in the icons directory
    #[error("line {line}: invalid icon file name '{filename}'")]
    InvalidIconFilename {
        /// Identifier of the line
        line: String,
        /// File name found in the export
        filename: String,
    },
    /// Cleaning this directory would remove the open data exports
    #[error("{directory:?} contains the source directory {source_dir:?}, refusing to clean it")]
    SourceInCleanedDir {
        /// Generated or icons directory
        directory: PathBuf,
        /// Directory of the open data exports
        source_dir: PathBuf,
    },
    /// No usable `fill` color in an icon
    #[error("no fill color found in icon {icon:?}")]
    MissingColor {
        /// Path of the downloaded icon
        icon: PathBuf,
    },
}
