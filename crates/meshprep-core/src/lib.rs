//! # meshprep Core Library
//!
//! Preprocessing toolkit for a molecular-electrostatics meshing pipeline: resolving
//! van der Waals parameters for the atoms of a structure, preparing radii files for
//! the surface mesher, and converting the mesher's output to a polyhedron format.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`, `AtomSphere`,
//!   `SurfaceMesh`), the force-field table and the parameter resolver, and the readers
//!   and writers for every file format in the pipeline.
//!
//! - **[`engine`]: The Orchestration Layer.** Configuration builders, the error
//!   taxonomy, progress reporting, cancellation and the per-molecule batch runner that
//!   isolates failures between molecules.
//!
//! - **[`workflows`]: The Public API.** Complete procedures (`vdw`, `radii`, `mesh`) that
//!   tie the readers, the resolver and the writers together for one molecule or a batch.

pub mod core;
pub mod engine;
pub mod workflows;
