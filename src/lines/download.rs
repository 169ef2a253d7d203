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

use crate::Result;
use anyhow::{bail, Context};
use tracing::debug;

/// Trait defining how the icon of a line is fetched
pub trait IconDownloader {
    /// Downloads the content found at `url`
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Downloads icons with unauthenticated HTTP GET requests
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    /// Creates a downloader with a default HTTP client
    pub fn new() -> Self {
        HttpDownloader::default()
    }
}

impl IconDownloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("downloading {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Error downloading {}", url))?;
        if !response.status().is_success() {
            bail!("Failed to download {}: {}", url, response.status());
        }
        let bytes = response
            .bytes()
            .with_context(|| format!("Error downloading {}", url))?;
        Ok(bytes.to_vec())
    }
}
