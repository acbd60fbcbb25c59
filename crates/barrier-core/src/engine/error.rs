use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::ParamError;
use crate::core::interface::schedules::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The barrier or its inputs are set up inconsistently.
    Configuration,
    /// A value was rejected at the point of assignment.
    Validation,
}

#[derive(Debug, Error)]
pub enum BarrierError {
    #[error("No barrier parameters for particle type '{type_name}' (first seen at particle {index})")]
    MissingTypeParameters { type_name: String, index: usize },

    #[error("Invalid barrier parameters for type '{type_name}': {source}")]
    InvalidParameters {
        type_name: String,
        #[source]
        source: ParamError,
    },

    #[error("Invalid interface schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Interface declares invalid bounds: lower {lower}, upper {upper}")]
    InvalidInterfaceBounds { lower: f64, upper: f64 },

    #[error("Contribution buffer holds {buffer} entries for {particles} particles")]
    LengthMismatch { particles: usize, buffer: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BarrierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BarrierError::InvalidParameters { .. } => ErrorKind::Validation,
            _ => ErrorKind::Configuration,
        }
    }
}
