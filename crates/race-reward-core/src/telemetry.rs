//! Telemetry snapshot supplied by the simulator each step

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, RewardError};
use crate::geometry::Point;

/// Immutable key/value snapshot of the car and track state.
///
/// Keys are consumed by name. Nothing is validated up front: a term that
/// needs a key looks it up when it runs, and a missing or malformed value
/// fails that call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Telemetry {
    values: HashMap<String, Value>,
}

impl Telemetry {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert, mainly for tests and harnesses
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn require(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| RewardError::MissingKey(key.to_string()))
    }

    /// Numeric value; integers are widened to `f64`
    pub fn f64(&self, key: &str) -> Result<f64> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| invalid(key, "number"))
    }

    /// Boolean flag
    pub fn bool(&self, key: &str) -> Result<bool> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| invalid(key, "boolean"))
    }

    /// Pair of non-negative indices, e.g. `closest_waypoints`
    pub fn index_pair(&self, key: &str) -> Result<[usize; 2]> {
        let items = self
            .require(key)?
            .as_array()
            .filter(|items| items.len() == 2)
            .ok_or_else(|| invalid(key, "array of two indices"))?;

        let mut pair = [0usize; 2];
        for (slot, item) in pair.iter_mut().zip(items) {
            *slot = item
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| invalid(key, "array of two indices"))?;
        }
        Ok(pair)
    }

    /// Polyline of `[x, y]` points, e.g. `waypoints`
    pub fn points(&self, key: &str) -> Result<Vec<Point>> {
        let items = self
            .require(key)?
            .as_array()
            .ok_or_else(|| invalid(key, "array of [x, y] points"))?;

        items
            .iter()
            .map(|item| match item.as_array().map(Vec::as_slice) {
                Some([x, y]) => match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => Ok(Point::new(x, y)),
                    _ => Err(invalid(key, "array of [x, y] points")),
                },
                _ => Err(invalid(key, "array of [x, y] points")),
            })
            .collect()
    }
}

impl From<HashMap<String, Value>> for Telemetry {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

fn invalid(key: &str, expected: &'static str) -> RewardError {
    RewardError::InvalidType {
        key: key.to_string(),
        expected,
    }
}
