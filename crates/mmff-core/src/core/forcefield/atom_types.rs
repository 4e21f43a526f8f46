use serde::Serialize;

/// Highest valid MMFF atom type number.
pub const MAX_ATOM_TYPE: u8 = 99;

/// Static properties of an MMFF symbolic atom type.
///
/// Rows mirror the MMFFPROP table: element, connectivity and the bonding flags
/// consulted by the bond, angle and torsion classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtomTypeRecord {
    /// Atomic number of the element carrying this type.
    pub atomic_number: u8,
    /// Number of explicitly connected neighbors.
    pub crd: u8,
    /// Total bond order at the atom counting multiplicity.
    pub val: u8,
    /// Lone pair available for pi-conjugation.
    pub pilp: bool,
    /// Multiple-bond class (0 none, 1 partial, 2 double, 3 triple).
    pub mltb: u8,
    /// Aromatic atom type.
    pub arom: bool,
    /// Linear bending geometry.
    pub lin: bool,
    /// Single bond between multiple-bonded atoms can be formed.
    pub sbmb: bool,
}

impl AtomTypeRecord {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        atomic_number: u8,
        crd: u8,
        val: u8,
        pilp: u8,
        mltb: u8,
        arom: u8,
        lin: u8,
        sbmb: u8,
    ) -> Self {
        Self {
            atomic_number,
            crd,
            val,
            pilp: pilp != 0,
            mltb,
            arom: arom != 0,
            lin: lin != 0,
            sbmb: sbmb != 0,
        }
    }
}

/// Looks up the static record of an atom type. Types outside `1..=99` yield `None`.
pub fn atom_type_record(type_number: u8) -> Option<&'static AtomTypeRecord> {
    if type_number == 0 || type_number > MAX_ATOM_TYPE {
        return None;
    }
    ATOM_TYPE_RECORDS.get(usize::from(type_number) - 1)
}

// Types 83..=86 are unassigned in MMFF94 and carry an all-zero row.
#[rustfmt::skip]
static ATOM_TYPE_RECORDS: [AtomTypeRecord; MAX_ATOM_TYPE as usize] = [
    AtomTypeRecord::new(6, 4, 4, 0, 0, 0, 0, 0), // 1
    AtomTypeRecord::new(6, 3, 4, 0, 2, 0, 0, 1), // 2
    AtomTypeRecord::new(6, 3, 4, 0, 2, 0, 0, 1), // 3
    AtomTypeRecord::new(6, 2, 4, 0, 3, 0, 1, 1), // 4
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 5
    AtomTypeRecord::new(8, 2, 2, 1, 0, 0, 0, 0), // 6
    AtomTypeRecord::new(8, 1, 2, 0, 2, 0, 0, 0), // 7
    AtomTypeRecord::new(7, 3, 3, 1, 0, 0, 0, 0), // 8
    AtomTypeRecord::new(7, 2, 3, 0, 2, 0, 0, 1), // 9
    AtomTypeRecord::new(7, 3, 3, 1, 1, 0, 0, 0), // 10
    AtomTypeRecord::new(9, 1, 1, 1, 0, 0, 0, 0), // 11
    AtomTypeRecord::new(17, 1, 1, 1, 0, 0, 0, 0), // 12
    AtomTypeRecord::new(35, 1, 1, 1, 0, 0, 0, 0), // 13
    AtomTypeRecord::new(53, 1, 1, 1, 0, 0, 0, 0), // 14
    AtomTypeRecord::new(16, 2, 2, 1, 0, 0, 0, 0), // 15
    AtomTypeRecord::new(16, 1, 2, 0, 2, 0, 0, 0), // 16
    AtomTypeRecord::new(16, 3, 4, 0, 2, 0, 0, 0), // 17
    AtomTypeRecord::new(16, 4, 4, 0, 0, 0, 0, 0), // 18
    AtomTypeRecord::new(14, 4, 4, 0, 0, 0, 0, 0), // 19
    AtomTypeRecord::new(6, 4, 4, 0, 0, 0, 0, 0), // 20
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 21
    AtomTypeRecord::new(6, 4, 4, 0, 0, 0, 0, 0), // 22
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 23
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 24
    AtomTypeRecord::new(15, 4, 4, 0, 0, 0, 0, 0), // 25
    AtomTypeRecord::new(15, 3, 3, 1, 0, 0, 0, 0), // 26
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 27
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 28
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 29
    AtomTypeRecord::new(6, 3, 4, 0, 2, 0, 0, 1), // 30
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 31
    AtomTypeRecord::new(8, 1, 12, 1, 1, 0, 0, 0), // 32
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 33
    AtomTypeRecord::new(7, 4, 4, 0, 0, 0, 0, 0), // 34
    AtomTypeRecord::new(8, 1, 1, 1, 1, 0, 0, 0), // 35
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 36
    AtomTypeRecord::new(6, 3, 4, 0, 2, 1, 0, 1), // 37
    AtomTypeRecord::new(7, 2, 3, 0, 2, 1, 0, 0), // 38
    AtomTypeRecord::new(7, 3, 3, 1, 1, 1, 0, 1), // 39
    AtomTypeRecord::new(7, 3, 3, 1, 0, 0, 0, 0), // 40
    AtomTypeRecord::new(6, 3, 4, 0, 1, 0, 0, 0), // 41
    AtomTypeRecord::new(7, 1, 3, 0, 3, 0, 0, 0), // 42
    AtomTypeRecord::new(7, 3, 3, 1, 0, 0, 0, 0), // 43
    AtomTypeRecord::new(16, 2, 2, 1, 1, 1, 0, 0), // 44
    AtomTypeRecord::new(7, 3, 4, 0, 2, 0, 0, 0), // 45
    AtomTypeRecord::new(7, 2, 3, 0, 2, 0, 0, 0), // 46
    AtomTypeRecord::new(7, 1, 2, 0, 2, 0, 0, 0), // 47
    AtomTypeRecord::new(7, 2, 2, 0, 0, 0, 0, 0), // 48
    AtomTypeRecord::new(8, 3, 3, 0, 0, 0, 0, 0), // 49
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 50
    AtomTypeRecord::new(8, 2, 3, 0, 2, 0, 0, 0), // 51
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 52
    AtomTypeRecord::new(7, 2, 4, 0, 2, 0, 1, 0), // 53
    AtomTypeRecord::new(7, 3, 4, 0, 2, 0, 0, 1), // 54
    AtomTypeRecord::new(7, 3, 34, 0, 1, 0, 0, 0), // 55
    AtomTypeRecord::new(7, 3, 34, 0, 1, 0, 0, 0), // 56
    AtomTypeRecord::new(6, 3, 4, 0, 2, 0, 0, 1), // 57
    AtomTypeRecord::new(7, 3, 4, 0, 1, 1, 0, 1), // 58
    AtomTypeRecord::new(8, 2, 2, 1, 1, 1, 0, 0), // 59
    AtomTypeRecord::new(6, 1, 3, 0, 3, 0, 0, 0), // 60
    AtomTypeRecord::new(7, 2, 4, 0, 3, 0, 1, 0), // 61
    AtomTypeRecord::new(7, 2, 2, 1, 0, 0, 0, 0), // 62
    AtomTypeRecord::new(6, 3, 4, 0, 2, 1, 0, 1), // 63
    AtomTypeRecord::new(6, 3, 4, 0, 2, 1, 0, 1), // 64
    AtomTypeRecord::new(7, 2, 3, 0, 2, 1, 0, 0), // 65
    AtomTypeRecord::new(7, 2, 3, 0, 2, 1, 0, 0), // 66
    AtomTypeRecord::new(7, 3, 4, 0, 2, 0, 0, 1), // 67
    AtomTypeRecord::new(7, 4, 4, 0, 0, 0, 0, 0), // 68
    AtomTypeRecord::new(7, 3, 4, 0, 1, 1, 0, 0), // 69
    AtomTypeRecord::new(8, 2, 2, 1, 0, 0, 0, 0), // 70
    AtomTypeRecord::new(1, 1, 1, 0, 0, 0, 0, 0), // 71
    AtomTypeRecord::new(16, 1, 1, 1, 1, 0, 0, 0), // 72
    AtomTypeRecord::new(16, 3, 3, 0, 0, 0, 0, 0), // 73
    AtomTypeRecord::new(16, 2, 4, 0, 2, 0, 0, 0), // 74
    AtomTypeRecord::new(15, 2, 3, 0, 2, 0, 0, 1), // 75
    AtomTypeRecord::new(7, 2, 2, 1, 0, 0, 0, 0), // 76
    AtomTypeRecord::new(17, 4, 4, 0, 0, 0, 0, 0), // 77
    AtomTypeRecord::new(6, 3, 4, 0, 2, 1, 0, 1), // 78
    AtomTypeRecord::new(7, 2, 3, 0, 2, 1, 0, 0), // 79
    AtomTypeRecord::new(6, 3, 4, 0, 2, 0, 0, 1), // 80
    AtomTypeRecord::new(7, 3, 4, 0, 1, 1, 0, 1), // 81
    AtomTypeRecord::new(7, 3, 4, 0, 1, 1, 0, 0), // 82
    AtomTypeRecord::new(0, 0, 0, 0, 0, 0, 0, 0), // 83
    AtomTypeRecord::new(0, 0, 0, 0, 0, 0, 0, 0), // 84
    AtomTypeRecord::new(0, 0, 0, 0, 0, 0, 0, 0), // 85
    AtomTypeRecord::new(0, 0, 0, 0, 0, 0, 0, 0), // 86
    AtomTypeRecord::new(26, 0, 0, 0, 0, 0, 0, 0), // 87
    AtomTypeRecord::new(26, 0, 0, 0, 0, 0, 0, 0), // 88
    AtomTypeRecord::new(9, 0, 0, 0, 0, 0, 0, 0), // 89
    AtomTypeRecord::new(17, 0, 0, 0, 0, 0, 0, 0), // 90
    AtomTypeRecord::new(35, 0, 0, 0, 0, 0, 0, 0), // 91
    AtomTypeRecord::new(3, 0, 0, 0, 0, 0, 0, 0), // 92
    AtomTypeRecord::new(11, 0, 0, 0, 0, 0, 0, 0), // 93
    AtomTypeRecord::new(19, 0, 0, 0, 0, 0, 0, 0), // 94
    AtomTypeRecord::new(30, 0, 0, 0, 0, 0, 0, 0), // 95
    AtomTypeRecord::new(20, 0, 0, 0, 0, 0, 0, 0), // 96
    AtomTypeRecord::new(29, 0, 0, 0, 0, 0, 0, 0), // 97
    AtomTypeRecord::new(29, 0, 0, 0, 0, 0, 0, 0), // 98
    AtomTypeRecord::new(12, 0, 0, 0, 0, 0, 0, 0), // 99
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_rejects_out_of_range_types() {
        assert!(atom_type_record(0).is_none());
        assert!(atom_type_record(100).is_none());
        assert!(atom_type_record(u8::MAX).is_none());
    }

    #[test]
    fn every_valid_type_has_a_record() {
        for type_number in 1..=MAX_ATOM_TYPE {
            assert!(atom_type_record(type_number).is_some(), "type {type_number}");
        }
    }

    #[test]
    fn alkyl_carbon_has_no_bonding_flags() {
        let record = atom_type_record(1).unwrap();
        assert_eq!(record.atomic_number, 6);
        assert_eq!(record.crd, 4);
        assert_eq!(record.val, 4);
        assert!(!record.arom);
        assert!(!record.sbmb);
    }

    #[test]
    fn aromatic_carbon_is_aromatic_and_sbmb() {
        let record = atom_type_record(37).unwrap();
        assert_eq!(record.atomic_number, 6);
        assert!(record.arom);
        assert!(record.sbmb);
        assert_eq!(record.mltb, 2);
    }

    #[test]
    fn sp_carbon_is_linear() {
        let record = atom_type_record(4).unwrap();
        assert!(record.lin);
        assert_eq!(record.mltb, 3);
    }

    #[test]
    fn last_type_is_magnesium() {
        assert_eq!(atom_type_record(99).unwrap().atomic_number, 12);
    }
}
