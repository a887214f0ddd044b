//! # Core Module
//!
//! Fundamental building blocks of the preprocessing pipeline.
//!
//! - **Data Models** ([`models`]) - Atom records, atomic spheres and triangulated surfaces
//! - **Force Field** ([`forcefield`]) - Parameter tables and the atom parameter resolver
//! - **File I/O** ([`io`]) - Readers and writers for PQR, GAFF, prmtop, xyzr, MSMS and OFF files

pub mod forcefield;
pub mod io;
pub mod models;
