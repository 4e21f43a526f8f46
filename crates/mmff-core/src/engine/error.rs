use thiserror::Error;

use super::config::ConfigError;
use super::registry::RegistryError;
use crate::core::io::traits::ParamLoadError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load parameters: {source}")]
    ParamLoad {
        #[from]
        source: ParamLoadError,
    },

    #[error("Parameter format error: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
