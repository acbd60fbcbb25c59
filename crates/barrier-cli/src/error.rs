use harmonic_barrier::core::io::particles::ParticleIoError;
use harmonic_barrier::engine::config::ConfigError;
use harmonic_barrier::engine::error::BarrierError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Barrier(#[from] BarrierError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Particles(#[from] ParticleIoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
