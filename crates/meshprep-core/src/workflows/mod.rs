//! # Workflows Module
//!
//! End-to-end procedures of the meshing preprocessing pipeline. Each workflow runs
//! for a single molecule with explicit paths, or for a list of molecules located
//! under a batch root through a [`NamingConvention`](crate::engine::config::NamingConvention).
//!
//! - **Parameter resolution** ([`vdw`]) - Assigns force-field types and van der Waals
//!   parameters to structure atoms and writes the tab-separated parameter report.
//! - **Radii preparation** ([`radii`]) - Scales atom radii and writes the sphere file
//!   and its Stern-layer counterpart consumed by the surface mesher.
//! - **Mesh conversion** ([`mesh`]) - Converts the mesher's vertex and face lists to OFF.
//!
//! Batch variants never stop on a failed molecule; see [`crate::engine::batch`].

pub mod mesh;
pub mod radii;
pub mod vdw;
