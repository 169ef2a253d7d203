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

//! Extraction of the lines from the links between stop areas and lines, and
//! enrichment of each line with its icon and the dominant color of it.
//!
//! Lines of every mode are extracted here, even if only the metro lines are
//! attached to the stations afterwards.

mod color;
mod download;

pub use color::{dominant_color, extract_color};
pub use download::{HttpDownloader, IconDownloader};

use crate::{
    configuration::Configuration,
    files,
    objects::{Line, ZoneLineRelationship},
    read_utils::read_objects,
    write_utils::write_objects,
    Error, Result,
};
use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Distinct lines referenced by the relationships, in order of appearance.
///
/// Two lines are the same if they share their identifier, name, icon url and
/// icon file name.
pub fn distinct_lines(relationships: &[ZoneLineRelationship]) -> Vec<Line> {
    let mut seen = HashSet::new();
    relationships
        .iter()
        .filter(|r| {
            seen.insert((
                r.line_id.as_str(),
                r.line_name.as_str(),
                r.line_icon_url.as_deref(),
                r.line_icon_filename.as_deref(),
            ))
        })
        .map(Line::from)
        .collect()
}

/// Path of the icon in the icons directory. The file name must be a single
/// plain component, so that `..` or an absolute path can't escape it.
fn icon_path(config: &Configuration, line: &Line, filename: &str) -> Result<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(config.icons_dir.join(filename)),
        _ => Err(Error::InvalidIconFilename {
            line: line.id.clone(),
            filename: filename.to_string(),
        }
        .into()),
    }
}

/// Download the icon of the line and set its color.
/// Lines without icon url or without icon file name are left untouched.
pub fn enrich_line<D: IconDownloader>(
    line: &mut Line,
    config: &Configuration,
    downloader: &D,
) -> Result<()> {
    let (url, filename) = match (&line.icon_url, &line.icon_filename) {
        (Some(url), Some(filename)) => (url, filename),
        _ => {
            debug!("no icon for line {}", line.id);
            return Ok(());
        }
    };
    let icon = icon_path(config, line, filename)?;
    let content = downloader
        .download(url)
        .with_context(|| format!("Error downloading icon of line {}", line.id))?;
    fs::write(&icon, content).with_context(|| format!("Error writing {:?}", icon))?;
    let color = extract_color(&icon)
        .with_context(|| format!("Error extracting color of line {}", line.id))?;
    debug!("line {} has color {}", line.id, color);
    line.color = Some(color);
    Ok(())
}

/// Build the catalog of the lines, sorted by name, with their icons and
/// colors.
pub fn extract_lines<D: IconDownloader>(config: &Configuration, downloader: &D) -> Result<()> {
    info!("Extracting lines");
    let relationships: Vec<ZoneLineRelationship> =
        read_objects(config.generated_file(files::ZONES_LINES))?;
    let mut lines = distinct_lines(&relationships);
    lines.sort_by(|a, b| a.name.cmp(&b.name));
    info!(
        "{} distinct lines found in {} relationships",
        lines.len(),
        relationships.len()
    );

    fs::create_dir_all(&config.icons_dir)
        .with_context(|| format!("Error creating {:?}", config.icons_dir))?;
    for line in &mut lines {
        enrich_line(line, config, downloader)?;
    }
    write_objects(config.generated_file(files::LINES), &lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_file_with_content, get_file_content, test_in_tmp_dir};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeDownloader {
        icons: HashMap<&'static str, &'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeDownloader {
        fn new(icons: &[(&'static str, &'static str)]) -> Self {
            FakeDownloader {
                icons: icons.iter().cloned().collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl IconDownloader for FakeDownloader {
        fn download(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(url.to_string());
            self.icons
                .get(url)
                .map(|svg| svg.as_bytes().to_vec())
                .ok_or_else(|| anyhow::anyhow!("{} unreachable", url))
        }
    }

    fn relationship(
        zone_id: &str,
        line_id: &str,
        line_name: &str,
        icon: Option<(&str, &str)>,
        mode: &str,
    ) -> ZoneLineRelationship {
        ZoneLineRelationship {
            zone_id: Some(zone_id.to_string()),
            line_id: line_id.to_string(),
            line_name: line_name.to_string(),
            line_icon_url: icon.map(|(url, _)| url.to_string()),
            line_icon_filename: icon.map(|(_, filename)| filename.to_string()),
            mode: mode.to_string(),
        }
    }

    #[test]
    fn dedup_keeps_first_appearance() {
        let m1 = Some(("http://m1", "M1.svg"));
        let relationships = vec![
            relationship("1", "C01371", "1", m1, "METRO"),
            relationship("2", "C01742", "A", None, "RER"),
            relationship("3", "C01371", "1", m1, "METRO"),
            relationship("4", "C01742", "A", None, "RER"),
            relationship("5", "C01371", "1", m1, "METRO"),
        ];
        let lines = distinct_lines(&relationships);
        let ids: Vec<_> = lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(vec!["C01371", "C01742"], ids);
    }

    #[test]
    fn dedup_on_every_field() {
        let relationships = vec![
            relationship("1", "C01371", "1", Some(("http://m1", "M1.svg")), "METRO"),
            relationship("2", "C01371", "1", None, "METRO"),
        ];
        assert_eq!(2, distinct_lines(&relationships).len());
        assert!(distinct_lines(&[]).is_empty());
    }

    fn write_relationships(config: &Configuration, relationships: &[ZoneLineRelationship]) {
        write_objects(config.generated_file(files::ZONES_LINES), relationships).unwrap();
    }

    #[test]
    fn lines_are_sorted_enriched_and_downloaded_once() {
        test_in_tmp_dir(|path| {
            let config = Configuration::new(path.join("source"), path.join("generated"));
            let m1 = Some(("http://m1", "IDFM_M1.svg"));
            let m14 = Some(("http://m14", "IDFM_M14.svg"));
            write_relationships(
                &config,
                &[
                    relationship("1", "C01384", "14", m14, "METRO"),
                    relationship("1", "C01371", "1", m1, "METRO"),
                    relationship("2", "C01371", "1", m1, "METRO"),
                    relationship("3", "C01742", "A", None, "RER"),
                ],
            );
            let downloader = FakeDownloader::new(&[
                ("http://m1", r##"<svg><rect fill="#FFCD00"/></svg>"##),
                ("http://m14", r##"<svg><rect style="fill:#62259D"/></svg>"##),
            ]);
            extract_lines(&config, &downloader).unwrap();

            assert_eq!(
                vec!["http://m1".to_string(), "http://m14".to_string()],
                *downloader.calls.borrow()
            );
            assert!(config.icons_dir.join("IDFM_M1.svg").is_file());
            let lines: Vec<Line> = read_objects(config.generated_file(files::LINES)).unwrap();
            let lines: Vec<_> = lines
                .iter()
                .map(|l| (l.name.as_str(), l.color.as_deref()))
                .collect();
            assert_eq!(
                vec![("1", Some("#FFCD00")), ("14", Some("#62259D")), ("A", None)],
                lines
            );
        });
    }

    #[test]
    fn identical_output_on_rerun() {
        test_in_tmp_dir(|path| {
            let config = Configuration::new(path.join("source"), path.join("generated"));
            write_relationships(
                &config,
                &[
                    relationship("1", "C01742", "A", None, "RER"),
                    relationship("1", "C01371", "1", None, "METRO"),
                ],
            );
            let downloader = FakeDownloader::new(&[]);
            extract_lines(&config, &downloader).unwrap();
            let first = get_file_content(config.generated_file(files::LINES));
            extract_lines(&config, &downloader).unwrap();
            assert_eq!(first, get_file_content(config.generated_file(files::LINES)));
        });
    }

    #[test]
    fn icon_without_color_aborts() {
        test_in_tmp_dir(|path| {
            let config = Configuration::new(path.join("source"), path.join("generated"));
            write_relationships(
                &config,
                &[relationship("1", "C01371", "1", Some(("http://m1", "M1.svg")), "METRO")],
            );
            let downloader = FakeDownloader::new(&[("http://m1", r##"<svg fill="#FFFFFF"/>"##)]);
            let err = extract_lines(&config, &downloader).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<Error>(),
                Some(Error::MissingColor { .. })
            ));
            assert!(!config.generated_file(files::LINES).exists());
        });
    }

    #[test]
    fn icon_filename_escaping_icons_dir() {
        test_in_tmp_dir(|path| {
            let config = Configuration::new(path.join("source"), path.join("generated"));
            let downloader = FakeDownloader::new(&[("http://m1", r##"<svg fill="#FFCD00"/>"##)]);
            for filename in &["../../source/acces.json", "/tmp/M1.svg", "icons/M1.svg", ".."] {
                let mut line = Line::from(&relationship(
                    "1",
                    "C01371",
                    "1",
                    Some(("http://m1", *filename)),
                    "METRO",
                ));
                let err = enrich_line(&mut line, &config, &downloader).unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<Error>(),
                    Some(Error::InvalidIconFilename { .. })
                ));
                assert_eq!(None, line.color);
            }
            assert!(downloader.calls.borrow().is_empty());
            assert!(!path.join("source/acces.json").exists());
        });
    }

    #[test]
    fn unreachable_icon_aborts() {
        test_in_tmp_dir(|path| {
            let config = Configuration::new(path.join("source"), path.join("generated"));
            create_file_with_content(
                &config.generated_dir,
                files::ZONES_LINES,
                r#"[{"zone_id": "1", "line_id": "C01371", "line_name": "1", "line_icon_url": "http://m1", "line_icon_filename": "M1.svg", "mode": "METRO"}]"#,
            );
            let downloader = FakeDownloader::new(&[]);
            assert!(extract_lines(&config, &downloader).is_err());
            assert!(!config.generated_file(files::LINES).exists());
        });
    }
}
