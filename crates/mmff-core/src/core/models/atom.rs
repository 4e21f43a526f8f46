/// An atom of a molecule as seen by the MMFF parameter engine.
///
/// Only the facts needed for parameter resolution are kept: a display name,
/// the MMFF symbolic-type number assigned by an upstream atom typer, and the
/// element, from which the periodic-table row is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// The name of the atom (e.g., "C1", "HO").
    pub name: String,
    /// MMFF atom type number, 1..=99. Zero marks an untyped atom.
    pub type_number: u8,
    /// Atomic number of the element.
    pub atomic_number: u8,
}

impl Atom {
    pub fn new(name: &str, type_number: u8, atomic_number: u8) -> Self {
        Self {
            name: name.to_string(),
            type_number,
            atomic_number,
        }
    }

    /// Returns the periodic-table row (period) of the atom's element, or 0 for
    /// an unknown element.
    pub fn period(&self) -> u8 {
        period_of(self.atomic_number)
    }
}

pub fn period_of(atomic_number: u8) -> u8 {
    match atomic_number {
        0 => 0,
        1..=2 => 1,
        3..=10 => 2,
        11..=18 => 3,
        19..=36 => 4,
        37..=54 => 5,
        55..=86 => 6,
        _ => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_initializes_fields() {
        let atom = Atom::new("C1", 37, 6);
        assert_eq!(atom.name, "C1");
        assert_eq!(atom.type_number, 37);
        assert_eq!(atom.atomic_number, 6);
    }

    #[test]
    fn period_follows_row_boundaries() {
        assert_eq!(period_of(1), 1);
        assert_eq!(period_of(2), 1);
        assert_eq!(period_of(3), 2);
        assert_eq!(period_of(6), 2);
        assert_eq!(period_of(10), 2);
        assert_eq!(period_of(11), 3);
        assert_eq!(period_of(17), 3);
        assert_eq!(period_of(35), 4);
        assert_eq!(period_of(53), 5);
        assert_eq!(period_of(0), 0);
    }

    #[test]
    fn atom_period_uses_element() {
        assert_eq!(Atom::new("S", 15, 16).period(), 3);
        assert_eq!(Atom::new("H", 5, 1).period(), 1);
    }
}
