//! # Force Law Module
//!
//! The one-sided harmonic barrier law and everything it is parameterized by.
//!
//! - [`potentials`] - The scalar harmonic law on a penetration depth
//! - [`params`] - Per-type `{k, offset}` parameters and the versioned table holding them
//! - [`term`] - Per-particle `(force, energy, virial)` contributions and their reductions

pub mod params;
pub mod potentials;
pub mod term;
