//! # Force Field Module
//!
//! MMFF94 parameter resolution: static per-type data, the topological classifier,
//! canonical key encoding, the in-memory parameter table and the equivalence-based
//! fallback for out-of-plane and torsion terms.
//!
//! ## Overview
//!
//! Resolving the parameters of one interaction term is a short pipeline:
//!
//! 1. [`classify`] derives the class code of the term (bond, angle, stretch-bend or
//!    torsion type) from bond orders, aromaticity and ring membership.
//! 2. [`index`] puts the endpoint atom types into canonical order and packs them,
//!    together with the class code, into a single integer key.
//! 3. [`params::ParameterTable`] maps the key to the parameter record.
//! 4. On a miss, [`equivalence`] retries out-of-plane and torsion lookups with
//!    progressively more generic atom types.
//!
//! ## Key Components
//!
//! - [`atom_types`] - Static MMFF atom-type property records (types 1..=99)
//! - [`classify`] - Bond, angle, stretch-bend and torsion type classification
//! - [`equivalence`] - Generalized-type table and fallback sequences
//! - [`index`] - Canonical lookup keys
//! - [`params`] - Parameter records and the parameter table
//! - [`term`] - Term kinds
//!
//! ```ignore
//! use mmffkit::core::forcefield::equivalence::resolve_torsion;
//!
//! let parameters = resolve_torsion(&table, 1, 37, 2, 2, 39);
//! ```

pub mod atom_types;
pub mod classify;
pub mod equivalence;
pub mod index;
pub mod params;
pub mod term;
