//! # Force Field Module
//!
//! Van der Waals parameter tables and the resolver that assigns table entries to the
//! atoms of a structure.
//!
//! ## Key Components
//!
//! - [`params`] - Ordered force-field tables (`type_code -> radius, epsilon`)
//! - [`resolver`] - Atom parameter resolution with name/radius fallback tiers or
//!   topology-index lookup
//!
//! ## Usage
//!
//! ```ignore
//! use meshprep::core::forcefield::resolver::ParameterResolver;
//!
//! let resolver = ParameterResolver::new(&table);
//! let parameters = resolver.resolve_all(&atoms, topology.as_deref())?;
//! ```

pub mod params;
pub mod resolver;
