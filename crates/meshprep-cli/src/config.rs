//! Configuration merging for the command line.
//!
//! Every value is taken from the command-line flag if given, otherwise from the
//! TOML configuration file, otherwise from [`defaults::DefaultsConfig`].

pub mod builder;
pub mod defaults;
pub mod file;

pub use builder::{build_naming, build_radii_config, build_resolve_config, load_file_config};
