//! # MMFF Kit Core Library
//!
//! Parameter resolution for the MMFF94 force field: loading tabulated parameter
//! sources, classifying interaction terms by topology, and looking up their
//! parameters with the force field's generalized-type fallback rules.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Static atom-type data, the topology classifier, canonical key
//!   encoding, the immutable `ParameterTable` and the parameter file reader.
//!
//! - **[`engine`]: The Logic Core.** Stateful pieces: the shared `ParametersCache`, the format
//!   registry, configuration, progress reporting and `MmffParameters`, the force-field facing
//!   object that answers per-term parameter queries for a molecular graph.
//!
//! - **[`workflows`]: The Public API.** Whole-molecule parameterization: enumerate every term
//!   of a molecule, resolve them in parallel and report what is missing.

pub mod core;
pub mod engine;
pub mod workflows;
