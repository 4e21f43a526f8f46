//! # Workflows Module
//!
//! High-level entry points that tie the engine and the core together.
//!
//! - [`parameterize`] - Resolve the parameters of every interaction term of a molecule

pub mod parameterize;
