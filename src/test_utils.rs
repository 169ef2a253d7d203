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

//! Helpers shared by the unit and integration tests.

use std::fs::{self, File};
use std::io::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Read a whole file, panics with its path if it can't be read
pub fn get_file_content<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    fs::read_to_string(path).unwrap_or_else(|_| panic!("file {:?} not found", path))
}

/// Write `content` in `path/file_name`, creating missing directories
pub fn create_file_with_content(path: &Path, file_name: &str, content: &str) -> File {
    let file_path = path.join(file_name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&file_path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    File::open(file_path).unwrap()
}

/// Copy every file of `fixtures_dir` into `destination`
pub fn copy_fixtures<P: AsRef<Path>, Q: AsRef<Path>>(fixtures_dir: P, destination: Q) {
    let destination = destination.as_ref();
    fs::create_dir_all(destination).unwrap();
    for entry in fs::read_dir(fixtures_dir.as_ref()).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            fs::copy(&path, destination.join(path.file_name().unwrap())).unwrap();
        }
    }
}

/// Run `func` in a temporary directory, removed afterwards
pub fn test_in_tmp_dir<F>(func: F)
where
    F: FnOnce(&Path),
{
    let tmp_dir = TempDir::new().expect("create temp dir");
    {
        let path = tmp_dir.path();
        func(path);
    }
    tmp_dir.close().expect("delete temp dir");
}
