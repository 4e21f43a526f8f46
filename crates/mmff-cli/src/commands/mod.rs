pub mod dump;
pub mod inspect;
pub mod query;

use crate::cli::SourceArgs;
use crate::config::{self, DefaultsConfig, PartialConfig};
use crate::error::Result;
use mmffkit::engine::cache::ParametersCache;
use mmffkit::engine::config::ParameterizationConfig;
use mmffkit::engine::error::EngineError;
use mmffkit::engine::forcefield::MmffParameters;
use mmffkit::engine::registry::FormatRegistry;
use tracing::info;

/// Resolves the effective configuration and reads the parameter source it names.
fn load_parameters(
    source: &SourceArgs,
    file_config: &PartialConfig,
) -> Result<(ParameterizationConfig, MmffParameters)> {
    let config = config::resolve_config(source, file_config, DefaultsConfig::default())?;
    let parameters = read_parameters(&config, ParametersCache::global())?;
    Ok((config, parameters))
}

fn read_parameters(config: &ParameterizationConfig, cache: &ParametersCache) -> Result<MmffParameters> {
    let loader = FormatRegistry::with_defaults()
        .create(&config.format)
        .map_err(EngineError::from)?;

    info!(
        "Reading {} parameters from '{}'.",
        config.format,
        config.parameters_path.display()
    );
    let mut parameters = MmffParameters::new();
    parameters.read_with(&config.parameters_path, cache, loader)?;
    Ok(parameters)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// A small MMFF94 source covering every section once or twice.
    pub const SOURCE: &str = "\
0 1 1 4.258 1.508
0 1 5 4.766 1.093
1 2 2 5.573 1.458
$
$
0 1 1 5 0.636 110.549
0 5 1 5 0.516 108.836
$
0 1 1 5 0.206 0.136
$
0 1 0 0.150 0.150
$
0 2 0 0 0.040
$
0 5 1 1 5 0.000 0.000 0.280
$
1 1.050 2.490 3.890 1.282 -
5 0.250 0.800 4.200 1.209 -
$
0 1 5 0.0000
$
0 1 0.000 0.000
$
";

    pub fn source_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SOURCE.as_bytes()).unwrap();
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use mmffkit::engine::config::ParameterizationConfigBuilder;
    use std::path::PathBuf;

    #[test]
    fn reads_parameters_through_registry() {
        let file = test_support::source_file();
        let config = ParameterizationConfigBuilder::new()
            .parameters_path(file.path().to_path_buf())
            .build()
            .unwrap();

        let cache = ParametersCache::new();
        let parameters = read_parameters(&config, &cache).unwrap();
        assert_eq!(parameters.table().stats().bond_stretch, 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unknown_format_is_reported() {
        let config = ParameterizationConfigBuilder::new()
            .parameters_path(PathBuf::from("MMFF94.prm"))
            .format("uff")
            .build()
            .unwrap();

        let result = read_parameters(&config, &ParametersCache::new());
        assert!(matches!(result, Err(CliError::MmffCore(EngineError::Registry { .. }))));
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = ParameterizationConfigBuilder::new()
            .parameters_path(dir.path().join("absent.prm"))
            .build()
            .unwrap();

        let result = read_parameters(&config, &ParametersCache::new());
        assert!(matches!(result, Err(CliError::ParamLoad(_))));
    }
}
