use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("Spring constant must be non-negative, got {0}")]
    NegativeSpringConstant(f64),
    #[error("Barrier parameter '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBarrierParams {
    k: f64,
    #[serde(default)]
    offset: f64,
}

/// Spring constant and boundary offset for one particle type.
///
/// Construction rejects negative or non-finite values, so a `BarrierParams` in hand is
/// always safe to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawBarrierParams")]
pub struct BarrierParams {
    k: f64,
    offset: f64,
}

impl BarrierParams {
    pub fn new(k: f64, offset: f64) -> Result<Self, ParamError> {
        if !k.is_finite() {
            return Err(ParamError::NonFinite { name: "k", value: k });
        }
        if !offset.is_finite() {
            return Err(ParamError::NonFinite {
                name: "offset",
                value: offset,
            });
        }
        if k < 0.0 {
            return Err(ParamError::NegativeSpringConstant(k));
        }
        Ok(Self { k, offset })
    }

    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// A zero spring constant keeps the type registered but switches its interaction off.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.k == 0.0
    }
}

impl TryFrom<RawBarrierParams> for BarrierParams {
    type Error = ParamError;

    fn try_from(raw: RawBarrierParams) -> Result<Self, Self::Error> {
        Self::new(raw.k, raw.offset)
    }
}

/// Versioned, copy-on-write table of per-type barrier parameters.
///
/// Every successful mutation bumps the version. Snapshots share storage with the table
/// until the next mutation, which clones the map if a snapshot is still alive.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    entries: Arc<HashMap<String, BarrierParams>>,
    version: u64,
}

/// Immutable view of a [`ParameterTable`] taken for one evaluation pass.
#[derive(Debug, Clone)]
pub struct ParameterSnapshot {
    entries: Arc<HashMap<String, BarrierParams>>,
    version: u64,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        type_name: impl Into<String>,
        k: f64,
        offset: f64,
    ) -> Result<(), ParamError> {
        let params = BarrierParams::new(k, offset)?;
        self.insert(type_name, params);
        Ok(())
    }

    pub fn insert(&mut self, type_name: impl Into<String>, params: BarrierParams) {
        Arc::make_mut(&mut self.entries).insert(type_name.into(), params);
        self.version += 1;
    }

    pub fn remove(&mut self, type_name: &str) -> Option<BarrierParams> {
        if !self.entries.contains_key(type_name) {
            return None;
        }
        let removed = Arc::make_mut(&mut self.entries).remove(type_name);
        self.version += 1;
        removed
    }

    pub fn get(&self, type_name: &str) -> Option<&BarrierParams> {
        self.entries.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BarrierParams)> {
        self.entries.iter().map(|(name, params)| (name.as_str(), params))
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            entries: Arc::clone(&self.entries),
            version: self.version,
        }
    }
}

impl FromIterator<(String, BarrierParams)> for ParameterTable {
    fn from_iter<I: IntoIterator<Item = (String, BarrierParams)>>(iter: I) -> Self {
        let entries: HashMap<_, _> = iter.into_iter().collect();
        let version = u64::from(!entries.is_empty());
        Self {
            entries: Arc::new(entries),
            version,
        }
    }
}

impl ParameterSnapshot {
    pub fn get(&self, type_name: &str) -> Option<&BarrierParams> {
        self.entries.get(type_name)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BarrierParams)> {
        self.entries.iter().map(|(name, params)| (name.as_str(), params))
    }
}
