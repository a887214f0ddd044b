use crate::error::{CliError, Result};
use meshprep::core::io::report::UnresolvedPolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileForcefieldConfig {
    pub start_marker: Option<String>,
    pub end_marker: Option<String>,
    pub radius_tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileStructureConfig {
    pub record_keywords: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileTopologyConfig {
    pub type_sentinel: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub unresolved: Option<UnresolvedPolicy>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileNamingConfig {
    pub structure: Option<String>,
    pub topology: Option<String>,
    pub parameters: Option<String>,
    pub radii_input: Option<String>,
    pub radii_output: Option<String>,
    pub stern_output: Option<String>,
    pub surface: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRadiiConfig {
    pub scale: Option<f64>,
    pub stern_offset: Option<f64>,
}

/// The optional TOML configuration file; every table and key may be omitted.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub forcefield: Option<FileForcefieldConfig>,
    pub structure: Option<FileStructureConfig>,
    pub topology: Option<FileTopologyConfig>,
    pub output: Option<FileOutputConfig>,
    pub naming: Option<FileNamingConfig>,
    pub radii: Option<FileRadiiConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CliError::FileParsing {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
