//! # Core Module
//!
//! Building blocks of the barrier kernel. Nothing in here owns simulation state; every
//! function is a pure transformation of its inputs.
//!
//! - **Particles** ([`models`]) - Read-only particle snapshot entries
//! - **Geometry** ([`geometry`]) - Projection of positions onto the barrier's natural axis
//! - **Interface** ([`interface`]) - The step-indexed interface position capability
//! - **Force Law** ([`forcefield`]) - Harmonic law, per-type parameters and contributions
//! - **File I/O** ([`io`]) - CSV particle snapshots and contribution reports

pub mod forcefield;
pub mod geometry;
pub mod interface;
pub mod io;
pub mod models;
