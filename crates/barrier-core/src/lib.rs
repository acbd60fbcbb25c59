//! # Harmonic Barrier Core Library
//!
//! One-sided, time-varying harmonic confinement for molecular-dynamics particles. A virtual
//! interface (sphere, plane or cylinder) moves according to a step-indexed schedule, and
//! particles found beyond it, offset per particle type, are pulled back with a harmonic
//! restoring force. Particles on the permitted side feel nothing.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless pieces: particle models, barrier geometries,
//!   interface schedules, the one-sided harmonic law, the per-type parameter table and
//!   the file formats used to feed them.
//!
//! - **[`engine`]: The Evaluation Layer.** The [`engine::field::HarmonicBarrierField`] that
//!   queries the interface once per pass and turns a particle snapshot into per-particle
//!   `(force, energy, virial)` contributions, together with its configuration and errors.

pub mod core;
pub mod engine;
