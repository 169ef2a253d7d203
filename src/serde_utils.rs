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
//! Some utilities to deserialize objects whose fields may come under several
//! names.
//!
//! Open data exports and the normalized files written by this crate do not
//! use the same field names. A [Record] holds one JSON object and resolves
//! each field from an ordered list of candidate keys: the first key that is
//! present with a non-null value wins. A candidate may be a dotted path
//! (`picto.url`) to reach into a nested object.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error raised when a [Record] can't be turned into an object.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RecordError(String);

// `i64::MAX as f64` rounds up to 2^63, hence the exclusive upper bound.
fn is_integral(f: f64) -> bool {
    f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&f)
}

/// One JSON object, before its fields are resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

impl Record {
    fn lookup(&self, candidate: &str) -> Option<&Value> {
        let mut keys = candidate.split('.');
        let first = keys.next()?;
        let mut value = self.0.get(first)?;
        for key in keys {
            value = value.as_object()?.get(key)?;
        }
        Some(value)
    }

    /// First non-null value among the candidates, with the matching key.
    fn find<'a>(&'a self, candidates: &[&'a str]) -> Option<(&'a str, &'a Value)> {
        candidates.iter().find_map(|candidate| {
            self.lookup(candidate)
                .filter(|value| !value.is_null())
                .map(|value| (*candidate, value))
        })
    }

    fn missing(candidates: &[&str]) -> RecordError {
        RecordError(format!(
            "missing field '{}'",
            candidates.last().copied().unwrap_or_default()
        ))
    }

    fn invalid(key: &str, value: &Value, expected: &str) -> RecordError {
        RecordError(format!(
            "invalid value {} for field '{}', expected {}",
            value, key, expected
        ))
    }

    /// Required string.
    pub fn string(&self, candidates: &[&str]) -> Result<String, RecordError> {
        self.opt_string(candidates)?
            .ok_or_else(|| Self::missing(candidates))
    }

    /// Required non-empty string, used for identifiers.
    pub fn identifier(&self, candidates: &[&str]) -> Result<String, RecordError> {
        let id = self.string(candidates)?;
        if id.trim().is_empty() {
            return Err(RecordError(format!(
                "empty identifier for field '{}'",
                candidates.last().copied().unwrap_or_default()
            )));
        }
        Ok(id)
    }

    /// Optional string, absent or `null` gives `None`.
    pub fn opt_string(&self, candidates: &[&str]) -> Result<Option<String>, RecordError> {
        match self.find(candidates) {
            None => Ok(None),
            Some((_, Value::String(s))) => Ok(Some(s.clone())),
            Some((key, value)) => Err(Self::invalid(key, value, "a string")),
        }
    }

    /// Optional scalar (string, number or boolean) turned into its string
    /// form, `1234` and `"1234"` both give `"1234"`.
    pub fn opt_scalar_string(&self, candidates: &[&str]) -> Result<Option<String>, RecordError> {
        match self.find(candidates) {
            None => Ok(None),
            Some((_, Value::String(s))) => Ok(Some(s.clone())),
            Some((_, Value::Number(n))) => Ok(Some(n.to_string())),
            Some((_, Value::Bool(b))) => Ok(Some(b.to_string())),
            Some((key, value)) => Err(Self::invalid(key, value, "a scalar")),
        }
    }

    /// Required integer.
    pub fn integer(&self, candidates: &[&str]) -> Result<i64, RecordError> {
        self.opt_integer(candidates)?
            .ok_or_else(|| Self::missing(candidates))
    }

    /// Optional integer, accepts integral floats (`42.0`) and numeric
    /// strings (`"42"`).
    pub fn opt_integer(&self, candidates: &[&str]) -> Result<Option<i64>, RecordError> {
        let (key, value) = match self.find(candidates) {
            None => return Ok(None),
            Some(found) => found,
        };
        let integer = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| is_integral(*f)).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        integer
            .map(Some)
            .ok_or_else(|| Self::invalid(key, value, "an integer"))
    }

    /// Required value of any deserializable type.
    pub fn value<T>(&self, candidates: &[&str]) -> Result<T, RecordError>
    where
        T: DeserializeOwned,
    {
        self.opt_value(candidates)?
            .ok_or_else(|| Self::missing(candidates))
    }

    /// Optional value of any deserializable type.
    pub fn opt_value<T>(&self, candidates: &[&str]) -> Result<Option<T>, RecordError>
    where
        T: DeserializeOwned,
    {
        match self.find(candidates) {
            None => Ok(None),
            Some((key, value)) => T::deserialize(value)
                .map(Some)
                .map_err(|e| RecordError(format!("invalid field '{}': {}", key, e))),
        }
    }

    /// Value of any deserializable type or its default when absent.
    pub fn value_or_default<T>(&self, candidates: &[&str]) -> Result<T, RecordError>
    where
        T: DeserializeOwned + Default,
    {
        self.opt_value(candidates).map(Option::unwrap_or_default)
    }
}
