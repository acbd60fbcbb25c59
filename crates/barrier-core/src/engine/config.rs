use crate::core::forcefield::params::BarrierParams;
use crate::core::geometry::barrier::BarrierGeometry;
use crate::core::interface::schedules::Schedule;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Complete description of a barrier: its shape, how the interface moves, and the
/// per-type parameters.
///
/// ```toml
/// [geometry]
/// type = "planar"
/// axis = "z"
///
/// [interface]
/// type = "ramp"
/// a = 5.0
/// b = 4.0
/// t-start = 0
/// t-ramp = 1000
///
/// [params.A]
/// k = 50.0
/// offset = 0.1
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarrierConfig {
    pub geometry: BarrierGeometry,
    pub interface: Schedule,
    #[serde(default)]
    pub params: HashMap<String, BarrierParams>,
}

impl BarrierConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: source_name.to_string(),
            source: e,
        })
    }
}

#[derive(Default)]
pub struct BarrierConfigBuilder {
    geometry: Option<BarrierGeometry>,
    interface: Option<Schedule>,
    params: HashMap<String, BarrierParams>,
}

impl BarrierConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(mut self, geometry: BarrierGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
    pub fn interface(mut self, schedule: Schedule) -> Self {
        self.interface = Some(schedule);
        self
    }
    pub fn param(mut self, type_name: impl Into<String>, params: BarrierParams) -> Self {
        self.params.insert(type_name.into(), params);
        self
    }

    pub fn build(self) -> Result<BarrierConfig, ConfigError> {
        Ok(BarrierConfig {
            geometry: self
                .geometry
                .ok_or(ConfigError::MissingParameter("geometry"))?,
            interface: self
                .interface
                .ok_or(ConfigError::MissingParameter("interface"))?,
            params: self.params,
        })
    }
}
