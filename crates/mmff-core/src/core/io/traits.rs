use crate::core::forcefield::params::ParameterTable;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("Cannot open source '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Read error while parsing '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

impl ParamLoadError {
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. } | Self::Read { path, .. } => path,
        }
    }
}

/// Defines the interface for reading force-field parameter sources.
///
/// Implementors handle one textual format and turn it into a [`ParameterTable`].
/// Row-level problems are tolerated by the implementor; only failures of the
/// underlying stream are reported.
pub trait ParameterFormat {
    /// Reads a parameter table from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the stream fails.
    fn read_from(reader: &mut impl BufRead) -> io::Result<ParameterTable>;

    /// Reads a parameter table from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`ParamLoadError::Io`] if the file cannot be opened and
    /// [`ParamLoadError::Read`] if reading fails midway.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ParameterTable, ParamLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader).map_err(|source| ParamLoadError::Read {
            path: path.to_string_lossy().to_string(),
            source,
        })
    }
}
