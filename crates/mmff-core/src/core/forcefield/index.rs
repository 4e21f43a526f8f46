//! Canonical ordering and integer encoding of interaction terms.
//!
//! Every bonded term kind has a key type whose constructor applies the kind's
//! canonical ordering to the endpoint atom types, so that a term traversed in
//! either direction maps to the same key. [`index`](BondStretchKey::index) packs
//! the key into a single integer with radix [`INDEX_RADIX`]; `from_index` unpacks
//! a stored integer without reordering it again.
//!
//! Keys are injective only while every atom type is below [`INDEX_RADIX`] and
//! the class code is below the kind's class count. The `try_new` constructors
//! enforce both and are the way to build keys from caller-supplied values.

use serde::Serialize;

/// Radix used to pack atom type numbers. Exceeds the largest valid type number.
pub const INDEX_RADIX: i64 = 136;

const R: i64 = INDEX_RADIX;
const R2: i64 = INDEX_RADIX * INDEX_RADIX;
const R3: i64 = INDEX_RADIX * INDEX_RADIX * INDEX_RADIX;

pub const BOND_CLASSES: i64 = 2;
pub const ANGLE_CLASSES: i64 = 9;
pub const STRETCH_BEND_CLASSES: i64 = 12;
pub const TORSION_CLASSES: i64 = 6;

fn fits(class: u8, classes: i64, types: &[u8]) -> bool {
    i64::from(class) < classes && types.iter().all(|&t| i64::from(t) < INDEX_RADIX)
}

#[inline]
fn digit(value: i64) -> u8 {
    // Every packed digit is below INDEX_RADIX, which fits in a u8.
    value as u8
}

/// Bond-stretch key: bond class plus the two atom types in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BondStretchKey {
    pub bond_type: u8,
    pub type_a: u8,
    pub type_b: u8,
}

impl BondStretchKey {
    /// Canonical key, or `None` when a field would not fit its digit.
    pub fn try_new(bond_type: u8, type_a: u8, type_b: u8) -> Option<Self> {
        fits(bond_type, BOND_CLASSES, &[type_a, type_b]).then(|| Self::new(bond_type, type_a, type_b))
    }

    pub(crate) fn new(bond_type: u8, type_a: u8, type_b: u8) -> Self {
        Self {
            bond_type,
            type_a: type_a.min(type_b),
            type_b: type_a.max(type_b),
        }
    }

    pub fn index(&self) -> i64 {
        BOND_CLASSES * (i64::from(self.type_a) * R + i64::from(self.type_b))
            + i64::from(self.bond_type)
    }

    pub fn from_index(index: i64) -> Self {
        let rest = index / BOND_CLASSES;
        Self {
            bond_type: digit(index % BOND_CLASSES),
            type_a: digit(rest / R),
            type_b: digit(rest % R),
        }
    }
}

/// Angle-bend key: outer types ascending, center type unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AngleBendKey {
    pub angle_type: u8,
    pub type_a: u8,
    pub type_b: u8,
    pub type_c: u8,
}

impl AngleBendKey {
    pub fn try_new(angle_type: u8, type_a: u8, type_b: u8, type_c: u8) -> Option<Self> {
        fits(angle_type, ANGLE_CLASSES, &[type_a, type_b, type_c])
            .then(|| Self::new(angle_type, type_a, type_b, type_c))
    }

    pub(crate) fn new(angle_type: u8, type_a: u8, type_b: u8, type_c: u8) -> Self {
        Self {
            angle_type,
            type_a: type_a.min(type_c),
            type_b,
            type_c: type_a.max(type_c),
        }
    }

    pub fn index(&self) -> i64 {
        ANGLE_CLASSES
            * (i64::from(self.type_b) * R2 + i64::from(self.type_a) * R + i64::from(self.type_c))
            + i64::from(self.angle_type)
    }

    pub fn from_index(index: i64) -> Self {
        let rest = index / ANGLE_CLASSES;
        Self {
            angle_type: digit(index % ANGLE_CLASSES),
            type_a: digit((rest / R) % R),
            type_b: digit(rest / R2),
            type_c: digit(rest % R),
        }
    }
}

/// Stretch-bend key. Not reordered: the two coupling constants are tied to the
/// direction of the angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StretchBendKey {
    pub stretch_bend_type: u8,
    pub type_a: u8,
    pub type_b: u8,
    pub type_c: u8,
}

impl StretchBendKey {
    pub fn try_new(stretch_bend_type: u8, type_a: u8, type_b: u8, type_c: u8) -> Option<Self> {
        fits(stretch_bend_type, STRETCH_BEND_CLASSES, &[type_a, type_b, type_c])
            .then(|| Self::new(stretch_bend_type, type_a, type_b, type_c))
    }

    pub(crate) fn new(stretch_bend_type: u8, type_a: u8, type_b: u8, type_c: u8) -> Self {
        Self {
            stretch_bend_type,
            type_a,
            type_b,
            type_c,
        }
    }

    pub fn index(&self) -> i64 {
        STRETCH_BEND_CLASSES
            * (i64::from(self.type_b) * R2 + i64::from(self.type_a) * R + i64::from(self.type_c))
            + i64::from(self.stretch_bend_type)
    }

    pub fn from_index(index: i64) -> Self {
        let rest = index / STRETCH_BEND_CLASSES;
        Self {
            stretch_bend_type: digit(index % STRETCH_BEND_CLASSES),
            type_a: digit((rest / R) % R),
            type_b: digit(rest / R2),
            type_c: digit(rest % R),
        }
    }
}

/// Out-of-plane key for the central atom `type_b` and its three neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OutOfPlaneKey {
    pub type_a: u8,
    pub type_b: u8,
    pub type_c: u8,
    pub type_d: u8,
}

impl OutOfPlaneKey {
    pub fn try_new(type_a: u8, type_b: u8, type_c: u8, type_d: u8) -> Option<Self> {
        fits(0, 1, &[type_a, type_b, type_c, type_d]).then(|| Self::new(type_a, type_b, type_c, type_d))
    }

    /// Applies the MMFF wing ordering: when the first wing sorts after the
    /// second, the first wing trades places with the out-of-plane end; the
    /// second wing and the end are then put in ascending order.
    pub(crate) fn new(type_a: u8, type_b: u8, type_c: u8, type_d: u8) -> Self {
        let (mut a, mut c, mut d) = (type_a, type_c, type_d);
        if a > c {
            std::mem::swap(&mut a, &mut d);
        }
        if c > d {
            std::mem::swap(&mut c, &mut d);
        }
        Self {
            type_a: a,
            type_b,
            type_c: c,
            type_d: d,
        }
    }

    pub fn index(&self) -> i64 {
        i64::from(self.type_b) * R3
            + i64::from(self.type_a) * R2
            + i64::from(self.type_c) * R
            + i64::from(self.type_d)
    }

    pub fn from_index(index: i64) -> Self {
        Self {
            type_a: digit((index / R2) % R),
            type_b: digit(index / R3),
            type_c: digit((index / R) % R),
            type_d: digit(index % R),
        }
    }
}

/// Torsion key: the central pair ascending, with the outer pair following it;
/// equal centers order the outer pair instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TorsionKey {
    pub torsion_type: u8,
    pub type_a: u8,
    pub type_b: u8,
    pub type_c: u8,
    pub type_d: u8,
}

impl TorsionKey {
    pub fn try_new(torsion_type: u8, type_a: u8, type_b: u8, type_c: u8, type_d: u8) -> Option<Self> {
        fits(torsion_type, TORSION_CLASSES, &[type_a, type_b, type_c, type_d])
            .then(|| Self::new(torsion_type, type_a, type_b, type_c, type_d))
    }

    pub(crate) fn new(torsion_type: u8, type_a: u8, type_b: u8, type_c: u8, type_d: u8) -> Self {
        let (mut a, mut b, mut c, mut d) = (type_a, type_b, type_c, type_d);
        if b > c {
            std::mem::swap(&mut b, &mut c);
            std::mem::swap(&mut a, &mut d);
        } else if b == c && a > d {
            std::mem::swap(&mut a, &mut d);
        }
        Self {
            torsion_type,
            type_a: a,
            type_b: b,
            type_c: c,
            type_d: d,
        }
    }

    pub fn index(&self) -> i64 {
        TORSION_CLASSES
            * (i64::from(self.type_b) * R3
                + i64::from(self.type_c) * R2
                + i64::from(self.type_a) * R
                + i64::from(self.type_d))
            + i64::from(self.torsion_type)
    }

    pub fn from_index(index: i64) -> Self {
        let rest = index / TORSION_CLASSES;
        Self {
            torsion_type: digit(index % TORSION_CLASSES),
            type_a: digit((rest / R) % R),
            type_b: digit(rest / R3),
            type_c: digit((rest / R2) % R),
            type_d: digit(rest % R),
        }
    }
}
