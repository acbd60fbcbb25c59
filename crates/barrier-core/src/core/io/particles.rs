use crate::core::forcefield::term::ForceContribution;
use crate::core::models::particle::Particle;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParticleIoError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Cannot report {contributions} contributions for {particles} particles")]
    LengthMismatch {
        particles: usize,
        contributions: usize,
    },
}

#[derive(Debug, Deserialize)]
struct ParticleRecord {
    #[serde(rename = "type")]
    type_name: String,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Serialize)]
struct ContributionRecord<'a> {
    index: usize,
    #[serde(rename = "type")]
    type_name: &'a str,
    fx: f64,
    fy: f64,
    fz: f64,
    energy: f64,
    virial: f64,
}

pub fn read_particles(path: &Path) -> Result<Vec<Particle>, ParticleIoError> {
    let file = std::fs::File::open(path).map_err(|e| ParticleIoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_particles_from(file, &path.to_string_lossy())
}

pub fn read_particles_from<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<Particle>, ParticleIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    reader
        .deserialize::<ParticleRecord>()
        .map(|result| {
            result
                .map(|r| Particle::new(r.type_name, Point3::new(r.x, r.y, r.z)))
                .map_err(|e| ParticleIoError::Csv {
                    path: source_name.to_string(),
                    source: e,
                })
        })
        .collect()
}

pub fn write_contributions<W: Write>(
    writer: W,
    particles: &[Particle],
    contributions: &[ForceContribution],
) -> Result<(), ParticleIoError> {
    if particles.len() != contributions.len() {
        return Err(ParticleIoError::LengthMismatch {
            particles: particles.len(),
            contributions: contributions.len(),
        });
    }

    let to_csv_error = |e: csv::Error| ParticleIoError::Csv {
        path: "<output>".to_string(),
        source: e,
    };
    let mut writer = csv::Writer::from_writer(writer);
    for (index, (particle, c)) in particles.iter().zip(contributions).enumerate() {
        writer
            .serialize(ContributionRecord {
                index,
                type_name: &particle.type_name,
                fx: c.force.x,
                fy: c.force.y,
                fz: c.force.z,
                energy: c.energy,
                virial: c.virial_trace(),
            })
            .map_err(to_csv_error)?;
    }
    writer.flush().map_err(|e| ParticleIoError::Io {
        path: "<output>".to_string(),
        source: e,
    })
}
