use crate::core::forcefield::resolver::DEFAULT_RADIUS_TOLERANCE;
use crate::core::io::gaff::{DEFAULT_END_MARKER, DEFAULT_START_MARKER, GaffReader};
use crate::core::io::pqr::{DEFAULT_RECORD_KEYWORDS, PqrReader};
use crate::core::io::prmtop::{DEFAULT_TYPE_SENTINEL, PrmtopReader};
use crate::core::io::report::{ReportWriter, UnresolvedPolicy};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder replaced by the molecule name in naming patterns.
pub const MOLECULE_PLACEHOLDER: &str = "{mol}";

pub const DEFAULT_RADIUS_SCALE: f64 = 1.0;
pub const DEFAULT_STERN_OFFSET: f64 = 1.4;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Format options for the readers and the report writer used during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    pub start_marker: String,
    pub end_marker: String,
    pub radius_tolerance: f64,
    pub record_keywords: Vec<String>,
    pub type_sentinel: String,
    pub unresolved: UnresolvedPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            radius_tolerance: DEFAULT_RADIUS_TOLERANCE,
            record_keywords: default_record_keywords(),
            type_sentinel: DEFAULT_TYPE_SENTINEL.to_string(),
            unresolved: UnresolvedPolicy::default(),
        }
    }
}

impl ResolveOptions {
    pub fn table_reader(&self) -> GaffReader {
        GaffReader::new(self.start_marker.clone(), self.end_marker.clone())
    }

    pub fn structure_reader(&self) -> PqrReader {
        PqrReader::new(self.record_keywords.clone())
    }

    pub fn topology_reader(&self) -> PrmtopReader {
        PrmtopReader::new(self.type_sentinel.clone())
    }

    pub fn report_writer(&self) -> ReportWriter {
        ReportWriter::new(self.unresolved)
    }
}

fn default_record_keywords() -> Vec<String> {
    DEFAULT_RECORD_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Everything needed to resolve van der Waals parameters against one force-field table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveConfig {
    pub forcefield_path: PathBuf,
    pub options: ResolveOptions,
}

#[derive(Default)]
pub struct ResolveConfigBuilder {
    forcefield_path: Option<PathBuf>,
    start_marker: Option<String>,
    end_marker: Option<String>,
    radius_tolerance: Option<f64>,
    record_keywords: Option<Vec<String>>,
    type_sentinel: Option<String>,
    unresolved: Option<UnresolvedPolicy>,
}

impl ResolveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forcefield_path(mut self, path: PathBuf) -> Self {
        self.forcefield_path = Some(path);
        self
    }
    pub fn start_marker(mut self, marker: String) -> Self {
        self.start_marker = Some(marker);
        self
    }
    pub fn end_marker(mut self, marker: String) -> Self {
        self.end_marker = Some(marker);
        self
    }
    pub fn radius_tolerance(mut self, tolerance: f64) -> Self {
        self.radius_tolerance = Some(tolerance);
        self
    }
    pub fn record_keywords(mut self, keywords: Vec<String>) -> Self {
        self.record_keywords = Some(keywords);
        self
    }
    pub fn type_sentinel(mut self, sentinel: String) -> Self {
        self.type_sentinel = Some(sentinel);
        self
    }
    pub fn unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = Some(policy);
        self
    }

    /// Builds the configuration; every option except the table path has a default.
    pub fn build(self) -> Result<ResolveConfig, ConfigError> {
        let defaults = ResolveOptions::default();
        let radius_tolerance = self.radius_tolerance.unwrap_or(defaults.radius_tolerance);
        if !radius_tolerance.is_finite() || radius_tolerance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "radius_tolerance",
                value: radius_tolerance,
                reason: "must be a positive finite number",
            });
        }
        let record_keywords = self.record_keywords.unwrap_or(defaults.record_keywords);
        if record_keywords.is_empty() {
            return Err(ConfigError::MissingParameter("record_keywords"));
        }

        Ok(ResolveConfig {
            forcefield_path: self
                .forcefield_path
                .ok_or(ConfigError::MissingParameter("forcefield_path"))?,
            options: ResolveOptions {
                start_marker: self.start_marker.unwrap_or(defaults.start_marker),
                end_marker: self.end_marker.unwrap_or(defaults.end_marker),
                radius_tolerance,
                record_keywords,
                type_sentinel: self.type_sentinel.unwrap_or(defaults.type_sentinel),
                unresolved: self.unresolved.unwrap_or(defaults.unresolved),
            },
        })
    }
}

/// Settings for turning atom radii into mesher input.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiiConfig {
    /// Factor applied to every radius.
    ///
    /// Defaults to 1.0. Radii from structures written with 0.92-scaled radii are
    /// restored by `1.0 / 0.92` (about 1.0870), as the legacy meshing pipeline did.
    pub scale: f64,
    /// Added to every scaled radius for the Stern-layer file.
    pub stern_offset: f64,
    /// Record keywords used when the input is a structure file.
    pub record_keywords: Vec<String>,
}

impl Default for RadiiConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_RADIUS_SCALE,
            stern_offset: DEFAULT_STERN_OFFSET,
            record_keywords: default_record_keywords(),
        }
    }
}

impl RadiiConfig {
    pub fn new(scale: f64, stern_offset: f64) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "scale",
                value: scale,
                reason: "must be a positive finite number",
            });
        }
        if !stern_offset.is_finite() || stern_offset < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "stern_offset",
                value: stern_offset,
                reason: "must be a non-negative finite number",
            });
        }
        Ok(Self {
            scale,
            stern_offset,
            ..Self::default()
        })
    }

    pub fn with_record_keywords(mut self, keywords: Vec<String>) -> Self {
        self.record_keywords = keywords;
        self
    }
}

/// Where each molecule's files live under a batch root.
///
/// Every pattern is a path relative to the root in which [`MOLECULE_PLACEHOLDER`] is
/// replaced by the molecule name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    pub structure: String,
    pub topology: Option<String>,
    pub parameters: String,
    pub radii_input: String,
    pub radii_output: String,
    pub stern_output: String,
    pub surface: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            structure: "{mol}/{mol}.pqr".to_string(),
            topology: None,
            parameters: "{mol}/{mol}.vdw".to_string(),
            radii_input: "{mol}/test.xyzr".to_string(),
            radii_output: "{mol}/radii.xyzr".to_string(),
            stern_output: "{mol}/radii_stern.xyzr".to_string(),
            surface: "{mol}/surf_d02".to_string(),
        }
    }
}

/// A batch root together with the naming convention applied beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLayout {
    pub root: PathBuf,
    pub naming: NamingConvention,
}

impl BatchLayout {
    pub fn new(root: impl Into<PathBuf>, naming: NamingConvention) -> Self {
        Self {
            root: root.into(),
            naming,
        }
    }

    /// Expands `pattern` for `molecule` under the root.
    pub fn path_for(&self, pattern: &str, molecule: &str) -> PathBuf {
        expand_pattern(&self.root, pattern, molecule)
    }

    pub fn structure(&self, molecule: &str) -> PathBuf {
        self.path_for(&self.naming.structure, molecule)
    }

    pub fn topology(&self, molecule: &str) -> Option<PathBuf> {
        self.naming
            .topology
            .as_deref()
            .map(|pattern| self.path_for(pattern, molecule))
    }

    pub fn parameters(&self, molecule: &str) -> PathBuf {
        self.path_for(&self.naming.parameters, molecule)
    }

    pub fn radii_input(&self, molecule: &str) -> PathBuf {
        self.path_for(&self.naming.radii_input, molecule)
    }

    pub fn radii_output(&self, molecule: &str) -> PathBuf {
        self.path_for(&self.naming.radii_output, molecule)
    }

    pub fn stern_output(&self, molecule: &str) -> PathBuf {
        self.path_for(&self.naming.stern_output, molecule)
    }

    pub fn surface(&self, molecule: &str) -> PathBuf {
        self.path_for(&self.naming.surface, molecule)
    }
}

fn expand_pattern(root: &Path, pattern: &str, molecule: &str) -> PathBuf {
    root.join(pattern.replace(MOLECULE_PLACEHOLDER, molecule))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_forcefield_path() {
        let result = ResolveConfigBuilder::new().build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("forcefield_path"))
        );
    }

    #[test]
    fn builder_fills_defaults() {
        let config = ResolveConfigBuilder::new()
            .forcefield_path(PathBuf::from("gaff.dat"))
            .build()
            .unwrap();
        assert_eq!(config.options, ResolveOptions::default());
        assert_eq!(config.options.start_marker, "MOD4");
        assert_eq!(config.options.end_marker, "END");
        assert_eq!(config.options.radius_tolerance, 1e-8);
        assert_eq!(config.options.record_keywords, vec!["ATOM", "HETATM"]);
        assert_eq!(config.options.type_sentinel, "AMBER_ATOM_TYPE");
        assert_eq!(config.options.unresolved, UnresolvedPolicy::Omit);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ResolveConfigBuilder::new()
            .forcefield_path(PathBuf::from("gaff.dat"))
            .start_marker("NONBON".to_string())
            .radius_tolerance(1e-4)
            .record_keywords(vec!["ATOM".to_string()])
            .unresolved(UnresolvedPolicy::Flag)
            .build()
            .unwrap();
        assert_eq!(config.options.start_marker, "NONBON");
        assert_eq!(config.options.end_marker, "END");
        assert_eq!(config.options.radius_tolerance, 1e-4);
        assert_eq!(config.options.record_keywords, vec!["ATOM"]);
        assert_eq!(config.options.unresolved, UnresolvedPolicy::Flag);
    }

    #[test]
    fn builder_rejects_non_positive_tolerance() {
        let result = ResolveConfigBuilder::new()
            .forcefield_path(PathBuf::from("gaff.dat"))
            .radius_tolerance(0.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "radius_tolerance",
                ..
            })
        ));
    }

    #[test]
    fn radii_config_validates_values() {
        assert!(RadiiConfig::new(0.5, 1.4).is_ok());
        assert!(RadiiConfig::new(0.0, 1.4).is_err());
        assert!(RadiiConfig::new(1.0, -0.1).is_err());
        assert!(RadiiConfig::new(f64::NAN, 1.4).is_err());
    }

    #[test]
    fn layout_expands_molecule_placeholder() {
        let layout = BatchLayout::new("/data/set", NamingConvention::default());
        assert_eq!(
            layout.structure("benzene"),
            PathBuf::from("/data/set/benzene/benzene.pqr")
        );
        assert_eq!(
            layout.parameters("benzene"),
            PathBuf::from("/data/set/benzene/benzene.vdw")
        );
        assert_eq!(
            layout.surface("benzene"),
            PathBuf::from("/data/set/benzene/surf_d02")
        );
        assert_eq!(layout.topology("benzene"), None);
    }

    #[test]
    fn layout_expands_optional_topology_pattern() {
        let naming = NamingConvention {
            topology: Some("{mol}/{mol}.prmtop".to_string()),
            ..NamingConvention::default()
        };
        let layout = BatchLayout::new("root", naming);
        assert_eq!(
            layout.topology("ethanol"),
            Some(PathBuf::from("root/ethanol/ethanol.prmtop"))
        );
    }
}
