use mmffkit::engine::config::DEFAULT_FORMAT;
use std::path::PathBuf;

/// Environment variable naming a parameter file used when neither the command
/// line nor the config file provides one.
pub const PARAMETERS_ENV_VAR: &str = "MMFF_PARAMETERS";

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub parameters_path: Option<PathBuf>,
    pub format: String,
    pub include_nonbonded: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            parameters_path: std::env::var_os(PARAMETERS_ENV_VAR).map(PathBuf::from),
            format: DEFAULT_FORMAT.to_string(),
            include_nonbonded: true,
        }
    }
}
