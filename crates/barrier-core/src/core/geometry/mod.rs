//! # Barrier Geometry
//!
//! A barrier geometry reduces a 3-D position to the scalar coordinate `d` that is compared
//! against the effective boundary, and supplies the outward unit normal along which the
//! restoring force acts. The harmonic law itself never looks at positions directly, so a
//! new variant only has to provide these two projections.

pub mod axis;
pub mod barrier;
