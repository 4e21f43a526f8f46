use super::atom::Atom;
use super::graph::MolecularGraph;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder, Ring};
use slotmap::{SecondaryMap, SlotMap};

/// A small molecular graph with typed atoms, ordered bonds and explicit rings.
///
/// This is the reference implementation of [`MolecularGraph`]. Rings are not
/// perceived here; they are registered by the caller together with their
/// aromaticity, which keeps the MMFF aromaticity rules out of this type.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// List of all bonds in the system.
    bonds: Vec<Bond>,
    /// Registered rings.
    rings: Vec<Ring<AtomId>>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
    /// Indices into `rings` for every atom that belongs to at least one ring.
    ring_membership: SecondaryMap<AtomId, Vec<usize>>,
}

impl MolecularSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn ring_list(&self) -> &[Ring<AtomId>] {
        &self.rings
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());
        atom_id
    }

    /// Adds a bond between two existing atoms.
    ///
    /// Returns `None` if either atom does not exist. Adding an already existing
    /// bond is a no-op and keeps the original order.
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        if !self.atoms.contains_key(atom1_id) || !self.atoms.contains_key(atom2_id) {
            return None;
        }
        if atom1_id == atom2_id {
            return None;
        }

        if let Some(neighbors) = self.bond_adjacency.get(atom1_id) {
            if neighbors.contains(&atom2_id) {
                return Some(());
            }
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency.get_mut(atom1_id)?.push(atom2_id);
        self.bond_adjacency.get_mut(atom2_id)?.push(atom1_id);

        Some(())
    }

    /// Registers a ring made of existing atoms and returns its index.
    ///
    /// Returns `None` if the ring is empty or references a missing atom.
    pub fn add_ring(&mut self, atoms: &[AtomId], aromatic: bool) -> Option<usize> {
        if atoms.is_empty() || atoms.iter().any(|&id| !self.atoms.contains_key(id)) {
            return None;
        }

        let index = self.rings.len();
        self.rings.push(Ring::new(atoms.to_vec(), aromatic));
        for &atom_id in atoms {
            match self.ring_membership.get_mut(atom_id) {
                Some(indices) => indices.push(index),
                None => {
                    self.ring_membership.insert(atom_id, vec![index]);
                }
            }
        }
        Some(index)
    }

    fn find_bond(&self, a: AtomId, b: AtomId) -> Option<&Bond> {
        self.bonds.iter().find(|bond| bond.connects(a, b))
    }
}

impl MolecularGraph for MolecularSystem {
    type AtomId = AtomId;

    fn atoms(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms.keys()
    }

    fn type_number(&self, atom: AtomId) -> u8 {
        self.atoms.get(atom).map_or(0, |a| a.type_number)
    }

    fn period(&self, atom: AtomId) -> u8 {
        self.atoms.get(atom).map_or(0, Atom::period)
    }

    fn neighbors(&self, atom: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.bond_adjacency
            .get(atom)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    fn bond_order(&self, a: AtomId, b: AtomId) -> Option<BondOrder> {
        self.find_bond(a, b).map(|bond| bond.order)
    }

    fn is_aromatic_bond(&self, a: AtomId, b: AtomId) -> bool {
        match self.find_bond(a, b) {
            None => false,
            Some(bond) if bond.order == BondOrder::Aromatic => true,
            Some(_) => self
                .rings(a)
                .any(|ring| ring.aromatic && ring.contains(&b)),
        }
    }

    fn rings(&self, atom: AtomId) -> impl Iterator<Item = &Ring<AtomId>> + '_ {
        self.ring_membership
            .get(atom)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&index| self.rings.get(index))
    }

    fn neighbor_count(&self, atom: AtomId) -> usize {
        self.bond_adjacency.get(atom).map_or(0, Vec::len)
    }
}
