//! # Core Module
//!
//! Stateless building blocks of the MMFF parameter engine.
//!
//! ## Overview
//!
//! Everything here is free of shared state: static MMFF data, pure classification
//! functions, key encoding, the parameter table type and the reader that fills it.
//! Caching, format selection and the caller-facing force-field object live in
//! [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - The molecular-graph capability trait and a
//!   reference implementation
//! - **Parameter Resolution** ([`forcefield`]) - Atom-type data, classification, keys, tables and
//!   the equivalence fallback
//! - **File I/O** ([`io`]) - Reading the sectioned MMFF94 parameter format

pub mod forcefield;
pub mod io;
pub mod models;
