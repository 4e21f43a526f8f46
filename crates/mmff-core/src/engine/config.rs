use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_FORMAT: &str = "mmff94";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterizationConfig {
    pub parameters_path: PathBuf,
    /// Name of the parameter format, resolved through the format registry.
    pub format: String,
    /// Whether van der Waals and partial-charge terms are resolved per atom.
    pub include_nonbonded: bool,
}

#[derive(Default)]
pub struct ParameterizationConfigBuilder {
    parameters_path: Option<PathBuf>,
    format: Option<String>,
    include_nonbonded: Option<bool>,
}

impl ParameterizationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameters_path(mut self, path: PathBuf) -> Self {
        self.parameters_path = Some(path);
        self
    }
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format = Some(name.into());
        self
    }
    pub fn include_nonbonded(mut self, include: bool) -> Self {
        self.include_nonbonded = Some(include);
        self
    }

    pub fn build(self) -> Result<ParameterizationConfig, ConfigError> {
        Ok(ParameterizationConfig {
            parameters_path: self
                .parameters_path
                .ok_or(ConfigError::MissingParameter("parameters_path"))?,
            format: self.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            include_nonbonded: self.include_nonbonded.unwrap_or(true),
        })
    }
}
