use crate::error::{CliError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from a TOML configuration file. Every field is optional so
/// that command-line flags and built-in defaults can fill the gaps.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialConfig {
    pub parameters_path: Option<PathBuf>,
    pub format: Option<String>,
    pub include_nonbonded: Option<bool>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let mut config: PartialConfig = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        // Relative parameter paths are taken relative to the config file.
        if let (Some(params), Some(base)) = (config.parameters_path.as_mut(), path.parent()) {
            if params.is_relative() {
                *params = base.join(&*params);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_all_fields() {
        let file = write_config(
            r#"
parameters-path = "/opt/mmff/MMFF94.prm"
format = "mmff"
include-nonbonded = false
"#,
        );

        let config = PartialConfig::from_file(file.path()).unwrap();
        assert_eq!(config.parameters_path, Some(PathBuf::from("/opt/mmff/MMFF94.prm")));
        assert_eq!(config.format.as_deref(), Some("mmff"));
        assert_eq!(config.include_nonbonded, Some(false));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        assert_eq!(PartialConfig::from_file(file.path()).unwrap(), PartialConfig::default());
    }

    #[test]
    fn relative_parameter_path_is_anchored_at_config_dir() {
        let file = write_config("parameters-path = \"data/MMFF94.prm\"\n");
        let config = PartialConfig::from_file(file.path()).unwrap();

        let expected = file.path().parent().unwrap().join("data/MMFF94.prm");
        assert_eq!(config.parameters_path, Some(expected));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let file = write_config("forcefield = \"uff\"\n");
        let result = PartialConfig::from_file(file.path());
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match PartialConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
