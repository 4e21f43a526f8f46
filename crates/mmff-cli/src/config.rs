mod defaults;
mod file;

pub use defaults::{DefaultsConfig, PARAMETERS_ENV_VAR};
pub use file::PartialConfig;

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};
use mmffkit::engine::config::{ParameterizationConfig, ParameterizationConfigBuilder};
use std::path::Path;
use tracing::debug;

/// Reads the config file if one was given, otherwise starts from an empty one.
pub fn load_file_config(path: Option<&Path>) -> Result<PartialConfig> {
    match path {
        Some(path) => {
            debug!("Reading configuration from '{}'.", path.display());
            PartialConfig::from_file(path)
        }
        None => Ok(PartialConfig::default()),
    }
}

/// Merges command-line overrides, the config file and the defaults, in that
/// order of precedence.
pub fn resolve_config(
    source: &SourceArgs,
    file: &PartialConfig,
    defaults: DefaultsConfig,
) -> Result<ParameterizationConfig> {
    let mut builder = ParameterizationConfigBuilder::new()
        .format(
            source
                .format
                .clone()
                .or_else(|| file.format.clone())
                .unwrap_or(defaults.format),
        )
        .include_nonbonded(file.include_nonbonded.unwrap_or(defaults.include_nonbonded));

    if let Some(path) = source
        .params
        .clone()
        .or_else(|| file.parameters_path.clone())
        .or(defaults.parameters_path)
    {
        builder = builder.parameters_path(path);
    }

    builder.build().map_err(|e| {
        CliError::Config(format!(
            "{e}. Pass --params, set `parameters-path` in the config file, or export {PARAMETERS_ENV_VAR}."
        ))
    })
}
