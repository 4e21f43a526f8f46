//! # Engine Module
//!
//! Stateful side of the parameter engine: sharing parsed tables, choosing a reader
//! by format name, and answering per-term parameter queries for a molecule.
//!
//! ## Overview
//!
//! A [`forcefield::MmffParameters`] instance holds a shared reference to one parsed
//! parameter table. Instances created from the same source share the same table
//! through a [`cache::ParametersCache`], which is passed in explicitly; a process-wide
//! cache is available through [`cache::ParametersCache::global`].
//!
//! ## Architecture
//!
//! - **Table Sharing** ([`cache`]) - Source-keyed cache of reference-counted tables
//! - **Format Selection** ([`registry`]) - Name to reader mapping
//! - **Parameter Queries** ([`forcefield`]) - Classification plus lookup for a molecular graph
//! - **Configuration** ([`config`]) - Settings for whole-molecule parameterization
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod cache;
pub mod config;
pub mod error;
pub mod forcefield;
pub mod progress;
pub mod registry;
