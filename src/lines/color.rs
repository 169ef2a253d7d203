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

use crate::{minidom_utils::Fill, Error, Result};
use anyhow::{anyhow, Context};
use minidom::Element;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// White is the background of the icons, the others are not colors.
const IGNORED_FILLS: &[&str] = &[
    "#fff",
    "#ffffff",
    "white",
    "none",
    "transparent",
    "inherit",
    "currentcolor",
];

fn is_color(fill: &str) -> bool {
    let fill = fill.to_ascii_lowercase();
    !IGNORED_FILLS.contains(&fill.as_str()) && !fill.starts_with("url(")
}

/// Most frequent color among the `fill` values of the document.
/// On a tie, the color found first wins.
pub fn dominant_color(root: &Element) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for fill in root.deep_fill_values().into_iter().filter(|f| is_color(f)) {
        let count = counts.entry(fill).or_insert(0);
        if *count == 0 {
            order.push(fill);
        }
        *count += 1;
    }
    let mut dominant: Option<(&str, usize)> = None;
    for fill in order {
        let count = counts[fill];
        match dominant {
            Some((_, max)) if max >= count => {}
            _ => dominant = Some((fill, count)),
        }
    }
    dominant.map(|(fill, _)| fill.to_string())
}

/// Parse an SVG icon and extract its dominant color
pub fn extract_color(icon: &Path) -> Result<String> {
    let content =
        fs::read_to_string(icon).with_context(|| format!("Error reading {:?}", icon))?;
    let root: Element = content
        .parse()
        .map_err(|e| anyhow!("Failed to parse {:?} as XML: {:?}", icon, e))?;
    dominant_color(&root).ok_or_else(|| {
        Error::MissingColor {
            icon: icon.to_path_buf(),
        }
        .into()
    })
}
