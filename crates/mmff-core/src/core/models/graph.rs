use super::topology::{BondOrder, Ring};
use std::fmt::Debug;
use std::hash::Hash;

/// The topological questions the MMFF parameter engine asks about a molecule.
///
/// Implementors own the molecule; the classifier and the parameter front end only
/// borrow it through this trait. Atom typing, ring perception and MMFF aromaticity
/// perception are expected to have been done by the implementor beforehand.
pub trait MolecularGraph {
    /// Handle used to refer to atoms of this graph.
    type AtomId: Copy + Eq + Ord + Hash + Debug;

    /// Iterates over every atom of the graph.
    fn atoms(&self) -> impl Iterator<Item = Self::AtomId> + '_;

    /// MMFF atom type number assigned to `atom`. Zero marks an untyped atom.
    fn type_number(&self, atom: Self::AtomId) -> u8;

    /// Periodic-table row of the element of `atom` (1 for hydrogen).
    fn period(&self, atom: Self::AtomId) -> u8;

    /// Iterates over the atoms directly bonded to `atom`.
    fn neighbors(&self, atom: Self::AtomId) -> impl Iterator<Item = Self::AtomId> + '_;

    /// Order of the bond between `a` and `b`, or `None` if they are not bonded.
    fn bond_order(&self, a: Self::AtomId, b: Self::AtomId) -> Option<BondOrder>;

    /// Whether the bond between `a` and `b` is aromatic in the MMFF sense.
    fn is_aromatic_bond(&self, a: Self::AtomId, b: Self::AtomId) -> bool;

    /// Iterates over the rings that contain `atom`.
    fn rings(&self, atom: Self::AtomId) -> impl Iterator<Item = &Ring<Self::AtomId>> + '_;

    fn is_bonded(&self, a: Self::AtomId, b: Self::AtomId) -> bool {
        self.bond_order(a, b).is_some()
    }

    fn neighbor_count(&self, atom: Self::AtomId) -> usize {
        self.neighbors(atom).count()
    }
}
