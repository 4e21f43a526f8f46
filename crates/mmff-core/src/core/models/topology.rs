use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    pub fn connects(&self, a: AtomId, b: AtomId) -> bool {
        (self.atom1_id == a && self.atom2_id == b) || (self.atom1_id == b && self.atom2_id == a)
    }
}

/// A ring of the molecular graph, as perceived by the graph provider.
///
/// Ring perception and aromaticity assignment are the provider's business; the
/// classifier only asks for the size, the membership and the aromatic flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring<A> {
    pub atoms: Vec<A>,
    pub aromatic: bool,
}

impl<A: PartialEq> Ring<A> {
    pub fn new(atoms: Vec<A>, aromatic: bool) -> Self {
        Self { atoms, aromatic }
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn contains(&self, atom: &A) -> bool {
        self.atoms.contains(atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_order_from_str_parses_valid_strings() {
        assert_eq!("1".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("S".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("double".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("T".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("ar".parse::<BondOrder>().unwrap(), BondOrder::Aromatic);
    }

    #[test]
    fn bond_order_from_str_rejects_invalid_strings() {
        assert!("".parse::<BondOrder>().is_err());
        assert!("quadruple".parse::<BondOrder>().is_err());
        assert!("0".parse::<BondOrder>().is_err());
    }

    #[test]
    fn bond_order_default_is_single() {
        assert_eq!(BondOrder::default(), BondOrder::Single);
    }

    #[test]
    fn bond_connects_is_direction_independent() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        let a3 = dummy_atom_id(3);
        let bond = Bond::new(a1, a2, BondOrder::Double);
        assert!(bond.connects(a1, a2));
        assert!(bond.connects(a2, a1));
        assert!(!bond.connects(a1, a3));
        assert!(bond.contains(a2));
        assert!(!bond.contains(a3));
    }

    #[test]
    fn ring_reports_size_and_membership() {
        let ring = Ring::new(vec![1, 2, 3, 4, 5], false);
        assert_eq!(ring.size(), 5);
        assert!(ring.contains(&3));
        assert!(!ring.contains(&6));
        assert!(!ring.aromatic);
    }
}
