use super::atom_types::MAX_ATOM_TYPE;
use super::index::{AngleBendKey, BondStretchKey, OutOfPlaneKey, StretchBendKey, TorsionKey};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondStretchParameters {
    /// Force constant in md/A.
    pub kb: f64,
    /// Reference bond length in A.
    pub r0: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleBendParameters {
    /// Force constant in md*A/rad^2.
    pub ka: f64,
    /// Reference angle in degrees.
    pub theta0: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StretchBendParameters {
    /// Coupling of the i-j stretch with the i-j-k bend.
    pub kba_ijk: f64,
    /// Coupling of the k-j stretch with the i-j-k bend.
    pub kba_kji: f64,
}

/// Stretch-bend constants indexed by the periodic-table rows of the three atoms,
/// used when no explicit stretch-bend entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DefaultStretchBendParameters {
    pub row_a: u8,
    pub row_b: u8,
    pub row_c: u8,
    pub parameters: StretchBendParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutOfPlaneBendingParameters {
    pub koop: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TorsionParameters {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DonorAcceptor {
    Donor,
    Acceptor,
    #[default]
    None,
}

impl DonorAcceptor {
    pub fn from_flag(flag: &str) -> Self {
        match flag.chars().next() {
            Some('D') => Self::Donor,
            Some('A') => Self::Acceptor,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VanDerWaalsParameters {
    /// Atomic polarizability in A^3.
    pub alpha: f64,
    /// Slater-Kirkwood effective number of valence electrons.
    pub n: f64,
    /// Scale factor A.
    pub a: f64,
    /// Scale factor G.
    pub g: f64,
    pub da: DonorAcceptor,
}

/// Bond charge increment for an ordered pair of atom types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeParameters {
    pub bond_type: u8,
    pub type_a: u8,
    pub type_b: u8,
    pub bci: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartialChargeParameters {
    /// Partial bond charge increment.
    pub pbci: f64,
    /// Formal charge adjustment factor.
    pub fcadj: f64,
}

/// Number of entries held per record kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub bond_stretch: usize,
    pub angle_bend: usize,
    pub stretch_bend: usize,
    pub default_stretch_bend: usize,
    pub out_of_plane_bending: usize,
    pub torsion: usize,
    pub van_der_waals: usize,
    pub charge: usize,
    pub partial_charge: usize,
}

impl TableStats {
    pub fn total(&self) -> usize {
        self.bond_stretch
            + self.angle_bend
            + self.stretch_bend
            + self.default_stretch_bend
            + self.out_of_plane_bending
            + self.torsion
            + self.van_der_waals
            + self.charge
            + self.partial_charge
    }
}

/// The parsed content of one MMFF parameter source.
///
/// Lookups here are exact: the caller's atom types are put in canonical order and
/// encoded, and the resulting key is looked up once. Types or class codes that do
/// not fit the key are a miss. Generalized-type fallback
/// lives in [`equivalence`](super::equivalence). Mutation is reserved to the loader,
/// so a table is read-only once it leaves the crate.
#[derive(Debug, Default, Clone)]
pub struct ParameterTable {
    bond_stretch: HashMap<i64, BondStretchParameters>,
    angle_bend: HashMap<i64, AngleBendParameters>,
    stretch_bend: HashMap<i64, StretchBendParameters>,
    default_stretch_bend: Vec<DefaultStretchBendParameters>,
    out_of_plane_bending: HashMap<i64, OutOfPlaneBendingParameters>,
    torsion: HashMap<i64, TorsionParameters>,
    van_der_waals: HashMap<u8, VanDerWaalsParameters>,
    charge: Vec<ChargeParameters>,
    partial_charge: HashMap<u8, PartialChargeParameters>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            bond_stretch: self.bond_stretch.len(),
            angle_bend: self.angle_bend.len(),
            stretch_bend: self.stretch_bend.len(),
            default_stretch_bend: self.default_stretch_bend.len(),
            out_of_plane_bending: self.out_of_plane_bending.len(),
            torsion: self.torsion.len(),
            van_der_waals: self.van_der_waals.len(),
            charge: self.charge.len(),
            partial_charge: self.partial_charge.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats().total() == 0
    }

    // --- Lookups --------------------------------------------------------- //

    pub fn bond_stretch(&self, bond_type: u8, type_a: u8, type_b: u8) -> Option<&BondStretchParameters> {
        let key = BondStretchKey::try_new(bond_type, type_a, type_b)?;
        self.bond_stretch.get(&key.index())
    }

    /// Empirical bond-stretch rules are not tabulated; the section is skipped
    /// by the loader and this lookup never succeeds.
    pub fn empirical_bond_stretch(
        &self,
        _atomic_number_a: u8,
        _atomic_number_b: u8,
    ) -> Option<&BondStretchParameters> {
        None
    }

    pub fn angle_bend(
        &self,
        angle_type: u8,
        type_a: u8,
        type_b: u8,
        type_c: u8,
    ) -> Option<&AngleBendParameters> {
        let key = AngleBendKey::try_new(angle_type, type_a, type_b, type_c)?;
        self.angle_bend.get(&key.index())
    }

    pub fn stretch_bend(
        &self,
        stretch_bend_type: u8,
        type_a: u8,
        type_b: u8,
        type_c: u8,
    ) -> Option<&StretchBendParameters> {
        let key = StretchBendKey::try_new(stretch_bend_type, type_a, type_b, type_c)?;
        self.stretch_bend.get(&key.index())
    }

    pub fn default_stretch_bend(&self, row_a: u8, row_b: u8, row_c: u8) -> Option<&StretchBendParameters> {
        self.default_stretch_bend
            .iter()
            .find(|p| p.row_a == row_a && p.row_b == row_b && p.row_c == row_c)
            .map(|p| &p.parameters)
    }

    pub fn out_of_plane_bending(
        &self,
        type_a: u8,
        type_b: u8,
        type_c: u8,
        type_d: u8,
    ) -> Option<&OutOfPlaneBendingParameters> {
        let key = OutOfPlaneKey::try_new(type_a, type_b, type_c, type_d)?;
        self.out_of_plane_bending.get(&key.index())
    }

    pub fn torsion(
        &self,
        torsion_type: u8,
        type_a: u8,
        type_b: u8,
        type_c: u8,
        type_d: u8,
    ) -> Option<&TorsionParameters> {
        let key = TorsionKey::try_new(torsion_type, type_a, type_b, type_c, type_d)?;
        self.torsion.get(&key.index())
    }

    pub fn van_der_waals(&self, type_number: u8) -> Option<&VanDerWaalsParameters> {
        self.van_der_waals.get(&type_number)
    }

    /// Bond charge increments are matched on the exact `(bond_type, a, b)` order.
    pub fn charge(&self, bond_type: u8, type_a: u8, type_b: u8) -> Option<&ChargeParameters> {
        self.charge
            .iter()
            .find(|p| p.bond_type == bond_type && p.type_a == type_a && p.type_b == type_b)
    }

    pub fn partial_charge(&self, type_number: u8) -> Option<&PartialChargeParameters> {
        self.partial_charge.get(&type_number)
    }

    // --- Iteration ------------------------------------------------------- //

    pub fn bond_stretch_entries(&self) -> impl Iterator<Item = (BondStretchKey, &BondStretchParameters)> {
        self.bond_stretch
            .iter()
            .map(|(&index, p)| (BondStretchKey::from_index(index), p))
    }

    pub fn angle_bend_entries(&self) -> impl Iterator<Item = (AngleBendKey, &AngleBendParameters)> {
        self.angle_bend
            .iter()
            .map(|(&index, p)| (AngleBendKey::from_index(index), p))
    }

    pub fn stretch_bend_entries(&self) -> impl Iterator<Item = (StretchBendKey, &StretchBendParameters)> {
        self.stretch_bend
            .iter()
            .map(|(&index, p)| (StretchBendKey::from_index(index), p))
    }

    pub fn default_stretch_bend_entries(&self) -> &[DefaultStretchBendParameters] {
        &self.default_stretch_bend
    }

    pub fn out_of_plane_bending_entries(
        &self,
    ) -> impl Iterator<Item = (OutOfPlaneKey, &OutOfPlaneBendingParameters)> {
        self.out_of_plane_bending
            .iter()
            .map(|(&index, p)| (OutOfPlaneKey::from_index(index), p))
    }

    pub fn torsion_entries(&self) -> impl Iterator<Item = (TorsionKey, &TorsionParameters)> {
        self.torsion
            .iter()
            .map(|(&index, p)| (TorsionKey::from_index(index), p))
    }

    pub fn van_der_waals_entries(&self) -> impl Iterator<Item = (u8, &VanDerWaalsParameters)> {
        self.van_der_waals.iter().map(|(&t, p)| (t, p))
    }

    pub fn charge_entries(&self) -> &[ChargeParameters] {
        &self.charge
    }

    pub fn partial_charge_entries(&self) -> impl Iterator<Item = (u8, &PartialChargeParameters)> {
        self.partial_charge.iter().map(|(&t, p)| (t, p))
    }

    // --- Loader-side insertion (last write wins) ------------------------- //

    pub(crate) fn insert_bond_stretch(&mut self, key: BondStretchKey, parameters: BondStretchParameters) {
        self.bond_stretch.insert(key.index(), parameters);
    }

    pub(crate) fn insert_angle_bend(&mut self, key: AngleBendKey, parameters: AngleBendParameters) {
        self.angle_bend.insert(key.index(), parameters);
    }

    pub(crate) fn insert_stretch_bend(&mut self, key: StretchBendKey, parameters: StretchBendParameters) {
        self.stretch_bend.insert(key.index(), parameters);
    }

    pub(crate) fn push_default_stretch_bend(&mut self, parameters: DefaultStretchBendParameters) {
        self.default_stretch_bend.push(parameters);
    }

    pub(crate) fn insert_out_of_plane_bending(
        &mut self,
        key: OutOfPlaneKey,
        parameters: OutOfPlaneBendingParameters,
    ) {
        self.out_of_plane_bending.insert(key.index(), parameters);
    }

    pub(crate) fn insert_torsion(&mut self, key: TorsionKey, parameters: TorsionParameters) {
        self.torsion.insert(key.index(), parameters);
    }

    /// Returns `false` and stores nothing when the type is out of range.
    pub(crate) fn insert_van_der_waals(&mut self, type_number: u8, parameters: VanDerWaalsParameters) -> bool {
        if type_number > MAX_ATOM_TYPE {
            return false;
        }
        self.van_der_waals.insert(type_number, parameters);
        true
    }

    pub(crate) fn push_charge(&mut self, parameters: ChargeParameters) {
        self.charge.push(parameters);
    }

    /// Returns `false` and stores nothing when the type is out of range.
    pub(crate) fn insert_partial_charge(
        &mut self,
        type_number: u8,
        parameters: PartialChargeParameters,
    ) -> bool {
        if type_number > MAX_ATOM_TYPE {
            return false;
        }
        self.partial_charge.insert(type_number, parameters);
        true
    }
}

impl fmt::Display for BondStretchParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kb = {:.3} md/A, r0 = {:.3} A", self.kb, self.r0)
    }
}

impl fmt::Display for AngleBendParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ka = {:.3}, theta0 = {:.3} deg", self.ka, self.theta0)
    }
}

impl fmt::Display for StretchBendParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kba_ijk = {:.3}, kba_kji = {:.3}", self.kba_ijk, self.kba_kji)
    }
}

impl fmt::Display for OutOfPlaneBendingParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "koop = {:.3}", self.koop)
    }
}

impl fmt::Display for TorsionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V1 = {:.3}, V2 = {:.3}, V3 = {:.3}", self.v1, self.v2, self.v3)
    }
}

impl fmt::Display for VanDerWaalsParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha = {:.3}, N = {:.3}, A = {:.3}, G = {:.3}, DA = {:?}",
            self.alpha, self.n, self.a, self.g, self.da
        )
    }
}

impl fmt::Display for ChargeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bci({}; {}-{}) = {:.4}",
            self.bond_type, self.type_a, self.type_b, self.bci
        )
    }
}

impl fmt::Display for PartialChargeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pbci = {:.4}, fcadj = {:.4}", self.pbci, self.fcadj)
    }
}
