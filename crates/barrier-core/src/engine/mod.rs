//! # Engine Module
//!
//! The evaluation layer that ties geometry, interface and parameters together.
//!
//! - **Field** ([`field`]) - [`field::HarmonicBarrierField`], the per-pass force evaluator
//! - **Configuration** ([`config`]) - TOML-backed barrier definitions and their builder
//! - **Error Handling** ([`error`]) - Configuration and validation failures raised before
//!   any contribution is produced
//!
//! A pass queries the interface exactly once, resolves every particle's parameters from an
//! immutable snapshot of the table, and only then computes contributions. Either every
//! particle gets a contribution or the caller gets an error; there are no partial results.

pub mod config;
pub mod error;
pub mod field;
