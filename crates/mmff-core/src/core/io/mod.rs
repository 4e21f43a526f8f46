//! Provides input functionality for force-field parameter sources.
//!
//! This module contains the reader for the sectioned MMFF94 parameter text format
//! and the trait shared by parameter readers.

pub mod mmff;
pub mod traits;
