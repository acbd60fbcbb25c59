//! # File I/O
//!
//! Plain CSV formats for feeding particle snapshots to the barrier outside of a host
//! simulation and for reporting the resulting contributions.
//!
//! Particle files carry one particle per row under a `type,x,y,z` header; lines starting
//! with `#` are ignored. Reports are written as `index,type,fx,fy,fz,energy,virial`, where
//! `virial` is the scalar `r · F`.

pub mod particles;
