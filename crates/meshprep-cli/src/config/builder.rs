use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{VdwArgs, XyzrArgs};
use crate::error::{CliError, Result};
use meshprep::core::io::report::UnresolvedPolicy;
use meshprep::engine::config::{
    NamingConvention, RadiiConfig, ResolveConfig, ResolveConfigBuilder,
};
use std::path::Path;
use std::str::FromStr;

/// Reads the config file, if any, and applies `--set KEY=VALUE` overrides on top.
pub fn load_file_config(path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

pub fn build_resolve_config(args: &VdwArgs, file_config: &FileConfig) -> Result<ResolveConfig> {
    let defaults = DefaultsConfig::default().resolve;
    let ff_file = file_config.forcefield.clone().unwrap_or_default();

    let record_keywords = file_config
        .structure
        .as_ref()
        .and_then(|s| s.record_keywords.clone())
        .unwrap_or(defaults.record_keywords);
    let type_sentinel = file_config
        .topology
        .as_ref()
        .and_then(|t| t.type_sentinel.clone())
        .unwrap_or(defaults.type_sentinel);
    let unresolved = if args.flag_unresolved {
        UnresolvedPolicy::Flag
    } else {
        file_config
            .output
            .as_ref()
            .and_then(|o| o.unresolved)
            .unwrap_or(defaults.unresolved)
    };

    ResolveConfigBuilder::new()
        .forcefield_path(args.forcefield.clone())
        .start_marker(ff_file.start_marker.unwrap_or(defaults.start_marker))
        .end_marker(ff_file.end_marker.unwrap_or(defaults.end_marker))
        .radius_tolerance(
            args.tolerance
                .or(ff_file.radius_tolerance)
                .unwrap_or(defaults.radius_tolerance),
        )
        .record_keywords(record_keywords)
        .type_sentinel(type_sentinel)
        .unresolved(unresolved)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_radii_config(args: &XyzrArgs, file_config: &FileConfig) -> Result<RadiiConfig> {
    let defaults = DefaultsConfig::default().radii;
    let radii_file = file_config.radii.clone().unwrap_or_default();

    let scale = args.scale.or(radii_file.scale).unwrap_or(defaults.scale);
    let stern_offset = args
        .stern_offset
        .or(radii_file.stern_offset)
        .unwrap_or(defaults.stern_offset);
    let record_keywords = file_config
        .structure
        .as_ref()
        .and_then(|s| s.record_keywords.clone())
        .unwrap_or(defaults.record_keywords);

    RadiiConfig::new(scale, stern_offset)
        .map(|config| config.with_record_keywords(record_keywords))
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_naming(file_config: &FileConfig) -> NamingConvention {
    let defaults = DefaultsConfig::default().naming;
    let Some(naming) = file_config.naming.clone() else {
        return defaults;
    };
    NamingConvention {
        structure: naming.structure.unwrap_or(defaults.structure),
        topology: naming.topology.or(defaults.topology),
        parameters: naming.parameters.unwrap_or(defaults.parameters),
        radii_input: naming.radii_input.unwrap_or(defaults.radii_input),
        radii_output: naming.radii_output.unwrap_or(defaults.radii_output),
        stern_output: naming.stern_output.unwrap_or(defaults.stern_output),
        surface: naming.surface.unwrap_or(defaults.surface),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "forcefield.start-marker" => {
                config
                    .forcefield
                    .get_or_insert_with(Default::default)
                    .start_marker = Some(value.to_string());
            }
            "forcefield.end-marker" => {
                config
                    .forcefield
                    .get_or_insert_with(Default::default)
                    .end_marker = Some(value.to_string());
            }
            "forcefield.radius-tolerance" => {
                config
                    .forcefield
                    .get_or_insert_with(Default::default)
                    .radius_tolerance = Some(parse_value(key, value, "float")?);
            }
            "structure.record-keywords" => {
                config
                    .structure
                    .get_or_insert_with(Default::default)
                    .record_keywords = Some(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            "topology.type-sentinel" => {
                config
                    .topology
                    .get_or_insert_with(Default::default)
                    .type_sentinel = Some(value.to_string());
            }
            "output.unresolved" => {
                let policy = match value {
                    "omit" => UnresolvedPolicy::Omit,
                    "flag" => UnresolvedPolicy::Flag,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'omit' or 'flag'.",
                            key, value
                        )));
                    }
                };
                config.output.get_or_insert_with(Default::default).unresolved = Some(policy);
            }
            "radii.scale" => {
                config.radii.get_or_insert_with(Default::default).scale =
                    Some(parse_value(key, value, "float")?);
            }
            "radii.stern-offset" => {
                config.radii.get_or_insert_with(Default::default).stern_offset =
                    Some(parse_value(key, value, "float")?);
            }
            _ => {
                let naming = config.naming.get_or_insert_with(Default::default);
                let slot = match key {
                    "naming.structure" => &mut naming.structure,
                    "naming.topology" => &mut naming.topology,
                    "naming.parameters" => &mut naming.parameters,
                    "naming.radii-input" => &mut naming.radii_input,
                    "naming.radii-output" => &mut naming.radii_output,
                    "naming.stern-output" => &mut naming.stern_output,
                    "naming.surface" => &mut naming.surface,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    }
                };
                *slot = Some(value.to_string());
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::BatchArgs;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn vdw_args() -> VdwArgs {
        VdwArgs {
            forcefield: PathBuf::from("gaff.dat"),
            pqr: Some(PathBuf::from("lig.pqr")),
            topology: None,
            output: Some(PathBuf::from("lig.vdw")),
            batch: BatchArgs::default(),
            flag_unresolved: false,
            tolerance: None,
        }
    }

    fn xyzr_args() -> XyzrArgs {
        XyzrArgs {
            input: Some(PathBuf::from("test.xyzr")),
            output: Some(PathBuf::from("radii.xyzr")),
            stern_output: None,
            batch: BatchArgs::default(),
            scale: None,
            stern_offset: None,
        }
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let config = build_resolve_config(&vdw_args(), &FileConfig::default()).unwrap();
        assert_eq!(config.forcefield_path, PathBuf::from("gaff.dat"));
        assert_eq!(config.options.start_marker, "MOD4");
        assert_eq!(config.options.end_marker, "END");
        assert_eq!(config.options.radius_tolerance, 1e-8);
        assert_eq!(config.options.unresolved, UnresolvedPolicy::Omit);

        let radii = build_radii_config(&xyzr_args(), &FileConfig::default()).unwrap();
        assert_eq!(radii.scale, 1.0);
        assert_eq!(radii.stern_offset, 1.4);

        assert_eq!(
            build_naming(&FileConfig::default()),
            NamingConvention::default()
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("meshprep.toml");
        fs::write(
            &cfg_path,
            r#"
            [forcefield]
            start-marker = "NONBON"
            radius-tolerance = 1e-4

            [output]
            unresolved = "flag"

            [naming]
            topology = "{mol}/{mol}.prmtop"

            [radii]
            scale = 0.5
            "#,
        )
        .unwrap();

        let file_config = load_file_config(Some(cfg_path.as_path()), &[]).unwrap();
        let config = build_resolve_config(&vdw_args(), &file_config).unwrap();
        assert_eq!(config.options.start_marker, "NONBON");
        assert_eq!(config.options.end_marker, "END");
        assert_eq!(config.options.radius_tolerance, 1e-4);
        assert_eq!(config.options.unresolved, UnresolvedPolicy::Flag);

        let radii = build_radii_config(&xyzr_args(), &file_config).unwrap();
        assert_eq!(radii.scale, 0.5);
        assert_eq!(radii.stern_offset, 1.4);

        let naming = build_naming(&file_config);
        assert_eq!(naming.topology.as_deref(), Some("{mol}/{mol}.prmtop"));
        assert_eq!(naming.structure, "{mol}/{mol}.pqr");
    }

    #[test]
    fn cli_overrides_file_values() {
        let file_config = load_file_config(
            None,
            &[
                "forcefield.radius-tolerance=1e-4".to_string(),
                "radii.stern-offset=2.0".to_string(),
            ],
        )
        .unwrap();

        let mut args = vdw_args();
        args.tolerance = Some(1e-3);
        args.flag_unresolved = true;
        let config = build_resolve_config(&args, &file_config).unwrap();
        assert_eq!(config.options.radius_tolerance, 1e-3);
        assert_eq!(config.options.unresolved, UnresolvedPolicy::Flag);

        let mut args = xyzr_args();
        args.stern_offset = Some(0.0);
        let radii = build_radii_config(&args, &file_config).unwrap();
        assert_eq!(radii.stern_offset, 0.0);
    }

    #[test]
    fn set_values_override_file() {
        let file_config = load_file_config(
            None,
            &[
                "forcefield.end-marker=STOP".to_string(),
                "structure.record-keywords=ATOM, HETATM ,".to_string(),
                "topology.type-sentinel=TYPES".to_string(),
                "output.unresolved=flag".to_string(),
                "naming.surface={mol}/surf_d05".to_string(),
                "radii.scale=0.9".to_string(),
            ],
        )
        .unwrap();

        let config = build_resolve_config(&vdw_args(), &file_config).unwrap();
        assert_eq!(config.options.end_marker, "STOP");
        assert_eq!(config.options.record_keywords, vec!["ATOM", "HETATM"]);
        assert_eq!(config.options.type_sentinel, "TYPES");
        assert_eq!(config.options.unresolved, UnresolvedPolicy::Flag);
        assert_eq!(build_naming(&file_config).surface, "{mol}/surf_d05");
        assert_eq!(
            build_radii_config(&xyzr_args(), &file_config).unwrap().scale,
            0.9
        );
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["radii.scale", "radii.scale=abc", "output.unresolved=drop", "mesh.probe=1.4"] {
            let result = load_file_config(None, &[bad.to_string()]);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let mut args = xyzr_args();
        args.scale = Some(-1.0);
        let result = build_radii_config(&args, &FileConfig::default());
        assert!(matches!(result, Err(CliError::Config(_))));

        let mut args = vdw_args();
        args.tolerance = Some(0.0);
        let result = build_resolve_config(&args, &FileConfig::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
