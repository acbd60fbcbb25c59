use super::config::BarrierConfig;
use super::error::BarrierError;
use crate::core::forcefield::params::{BarrierParams, ParameterSnapshot, ParameterTable};
use crate::core::forcefield::potentials;
use crate::core::forcefield::term::{EvaluationSummary, ForceContribution};
use crate::core::geometry::barrier::BarrierGeometry;
use crate::core::interface::InterfaceVariant;
use crate::core::models::particle::Particle;
use nalgebra::Point3;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One-sided harmonic barrier driven by a moving interface.
///
/// A particle of type `t` whose geometric coordinate `d` exceeds the effective boundary
/// `R(step) + offset_t` is pushed back with force `-k_t (d - boundary) n`, where `n` is the
/// outward normal of the geometry. Particles at or inside the boundary feel nothing.
pub struct HarmonicBarrierField {
    geometry: BarrierGeometry,
    interface: Arc<dyn InterfaceVariant>,
    params: ParameterTable,
}

impl fmt::Debug for HarmonicBarrierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarmonicBarrierField")
            .field("geometry", &self.geometry)
            .field("interface_lower", &self.interface.lower_bound())
            .field("interface_upper", &self.interface.upper_bound())
            .field("params", &self.params)
            .finish()
    }
}

impl HarmonicBarrierField {
    pub fn new<I>(geometry: BarrierGeometry, interface: I) -> Result<Self, BarrierError>
    where
        I: InterfaceVariant + 'static,
    {
        Self::with_shared_interface(geometry, Arc::new(interface))
    }

    pub fn with_shared_interface(
        geometry: BarrierGeometry,
        interface: Arc<dyn InterfaceVariant>,
    ) -> Result<Self, BarrierError> {
        let (lower, upper) = (interface.lower_bound(), interface.upper_bound());
        if !(lower <= upper) {
            return Err(BarrierError::InvalidInterfaceBounds { lower, upper });
        }
        Ok(Self {
            geometry,
            interface,
            params: ParameterTable::new(),
        })
    }

    pub fn from_config(config: BarrierConfig) -> Result<Self, BarrierError> {
        let interface = config.interface.build()?;
        let mut field = Self::with_shared_interface(config.geometry, interface)?;
        field.params = config.params.into_iter().collect();
        Ok(field)
    }

    /// Reads a TOML barrier definition and builds the field it describes.
    pub fn load(path: &Path) -> Result<Self, BarrierError> {
        Self::from_config(BarrierConfig::load(path)?)
    }

    pub fn geometry(&self) -> BarrierGeometry {
        self.geometry
    }

    pub fn interface(&self) -> &dyn InterfaceVariant {
        &*self.interface
    }

    pub fn params(&self) -> &ParameterTable {
        &self.params
    }

    /// Assigns `{k, offset}` to a type. Negative or non-finite values are rejected here and
    /// leave the previous parameters in place.
    pub fn set_params(
        &mut self,
        type_name: impl Into<String>,
        k: f64,
        offset: f64,
    ) -> Result<(), BarrierError> {
        let type_name = type_name.into();
        self.params
            .set(type_name.clone(), k, offset)
            .map_err(|source| BarrierError::InvalidParameters { type_name, source })
    }

    pub fn insert_params(&mut self, type_name: impl Into<String>, params: BarrierParams) {
        self.params.insert(type_name, params);
    }

    pub fn remove_params(&mut self, type_name: &str) -> Option<BarrierParams> {
        self.params.remove(type_name)
    }

    /// Interface position at `step`. Values outside the declared bounds are reported but
    /// still used.
    pub fn interface_value(&self, step: u64) -> f64 {
        let value = self.interface.value(step);
        let (lower, upper) = (self.interface.lower_bound(), self.interface.upper_bound());
        if !(lower <= value && value <= upper) {
            warn!(
                "Interface value {} at step {} lies outside its declared bounds [{}, {}].",
                value, step, lower, upper
            );
        }
        value
    }

    /// Range the effective boundary of `type_name` can sweep over the simulation.
    pub fn boundary_range(&self, type_name: &str) -> Option<(f64, f64)> {
        self.params.get(type_name).map(|p| {
            (
                self.interface.lower_bound() + p.offset(),
                self.interface.upper_bound() + p.offset(),
            )
        })
    }

    /// Largest absolute boundary coordinate any registered type can reach.
    pub fn max_boundary_extent(&self) -> Option<f64> {
        self.params
            .iter()
            .filter_map(|(name, _)| self.boundary_range(name))
            .map(|(lower, upper)| lower.abs().max(upper.abs()))
            .reduce(f64::max)
    }

    pub fn evaluate(
        &self,
        step: u64,
        particles: &[Particle],
    ) -> Result<Vec<ForceContribution>, BarrierError> {
        self.evaluate_with(step, particles, &self.params.snapshot())
    }

    #[instrument(skip_all, name = "barrier_pass", fields(step = step, particles = particles.len()))]
    pub fn evaluate_with(
        &self,
        step: u64,
        particles: &[Particle],
        params: &ParameterSnapshot,
    ) -> Result<Vec<ForceContribution>, BarrierError> {
        let resolved = resolve_params(particles, params)?;
        let interface_value = self.interface_value(step);
        let geometry = self.geometry;

        #[cfg(not(feature = "parallel"))]
        let iterator = particles.iter().zip(&resolved);

        #[cfg(feature = "parallel")]
        let iterator = particles.par_iter().zip(&resolved);

        let contributions: Vec<ForceContribution> = iterator
            .map(|(particle, p)| {
                barrier_contribution(&geometry, interface_value, p, &particle.position)
            })
            .collect();

        debug!(
            "Evaluated {} particles against interface {} (parameter table v{}).",
            contributions.len(),
            interface_value,
            params.version()
        );
        Ok(contributions)
    }

    /// Adds one pass into the host's per-particle accumulators.
    pub fn accumulate(
        &self,
        step: u64,
        particles: &[Particle],
        net: &mut [ForceContribution],
    ) -> Result<EvaluationSummary, BarrierError> {
        if net.len() != particles.len() {
            return Err(BarrierError::LengthMismatch {
                particles: particles.len(),
                buffer: net.len(),
            });
        }
        let contributions = self.evaluate(step, particles)?;
        for (total, c) in net.iter_mut().zip(&contributions) {
            *total += *c;
        }
        Ok(EvaluationSummary::from_contributions(&contributions))
    }
}

fn resolve_params(
    particles: &[Particle],
    params: &ParameterSnapshot,
) -> Result<Vec<BarrierParams>, BarrierError> {
    particles
        .iter()
        .enumerate()
        .map(|(index, particle)| {
            params.get(&particle.type_name).copied().ok_or_else(|| {
                BarrierError::MissingTypeParameters {
                    type_name: particle.type_name.clone(),
                    index,
                }
            })
        })
        .collect()
}

#[inline]
fn barrier_contribution(
    geometry: &BarrierGeometry,
    interface_value: f64,
    params: &BarrierParams,
    position: &Point3<f64>,
) -> ForceContribution {
    if params.is_disabled() {
        return ForceContribution::zero();
    }
    let boundary = interface_value + params.offset();
    let depth = potentials::penetration(geometry.coordinate(position), boundary);
    let (energy, magnitude) = potentials::one_sided_harmonic(depth, params.k());
    if energy == 0.0 && magnitude == 0.0 {
        return ForceContribution::zero();
    }
    match geometry.direction(position) {
        Some(normal) => ForceContribution::new(position, -normal.into_inner() * magnitude, energy),
        None => ForceContribution::zero(),
    }
}
