//! # Core Models Module
//!
//! Minimal molecular-graph representation consumed by the parameter resolution engine.
//!
//! ## Overview
//!
//! The parameter engine never owns a molecule. It only asks a handful of topological
//! questions about one, expressed by the [`graph::MolecularGraph`] trait:
//!
//! - **Atom facts** - MMFF atom type number and periodic-table row
//! - **Pair facts** - bond existence, bond order and bond aromaticity
//! - **Ring facts** - the rings an atom belongs to, with size and aromaticity
//!
//! [`system::MolecularSystem`] is a small slot-map backed implementation of that trait,
//! suitable for tests, the command-line tools and callers without their own graph type.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom record with MMFF type and element
//! - [`graph`] - The capability trait used by the classifier
//! - [`system`] - Reference implementation of the capability trait
//! - [`topology`] - Bonds, bond orders and rings
//! - [`ids`] - Stable atom identifiers
//!
//! ```ignore
//! use mmffkit::core::models::{atom::Atom, system::MolecularSystem, topology::BondOrder};
//!
//! let mut system = MolecularSystem::new();
//! let c = system.add_atom(Atom::new("C1", 1, 6));
//! let h = system.add_atom(Atom::new("H1", 5, 1));
//! system.add_bond(c, h, BondOrder::Single)?;
//! ```

pub mod atom;
pub mod graph;
pub mod ids;
pub mod system;
pub mod topology;
