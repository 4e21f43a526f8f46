use super::cache::{ParametersCache, SharedTable};
use crate::core::forcefield::atom_types::{AtomTypeRecord, atom_type_record};
use crate::core::forcefield::classify::{angle_type, bond_type, stretch_bend_type, torsion_type};
use crate::core::forcefield::equivalence::{resolve_out_of_plane, resolve_torsion};
use crate::core::forcefield::params::{
    AngleBendParameters, BondStretchParameters, ChargeParameters, OutOfPlaneBendingParameters,
    ParameterTable, PartialChargeParameters, StretchBendParameters, TorsionParameters,
    VanDerWaalsParameters,
};
use crate::core::io::mmff::MmffParameterFile;
use crate::core::io::traits::{ParamLoadError, ParameterFormat};
use crate::core::models::graph::MolecularGraph;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// MMFF94 parameters as seen by a force-field setup.
///
/// Holds a shared reference to one [`ParameterTable`] and answers parameter
/// queries for the terms of a molecule. Each query classifies the term from
/// the molecule's topology, puts the atom types in canonical order and looks
/// the key up; out-of-plane and torsion queries additionally fall back through
/// generalized atom types. Every query returns `None` when no parameters apply.
///
/// Tables are shared through a [`ParametersCache`]: reading a source that is
/// already cached reuses the cached table instead of parsing it again.
#[derive(Debug, Clone)]
pub struct MmffParameters {
    table: SharedTable,
    file_name: Option<String>,
    error_string: Option<String>,
}

impl Default for MmffParameters {
    fn default() -> Self {
        Self::from_table(Arc::new(ParameterTable::new()))
    }
}

impl MmffParameters {
    /// Creates an instance with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: SharedTable) -> Self {
        Self {
            table,
            file_name: None,
            error_string: None,
        }
    }

    /// Reads the MMFF94 parameter source at `path`, sharing it through `cache`.
    pub fn load(path: impl AsRef<Path>, cache: &ParametersCache) -> Result<Self, ParamLoadError> {
        let mut parameters = Self::new();
        parameters.read(path, cache)?;
        Ok(parameters)
    }

    /// Reads the MMFF94 parameter source at `path` into this instance.
    ///
    /// On failure the previous table is kept, nothing is cached, and the error
    /// message is retained in [`error_string`](Self::error_string).
    pub fn read(&mut self, path: impl AsRef<Path>, cache: &ParametersCache) -> Result<(), ParamLoadError> {
        self.read_with(path, cache, |path| MmffParameterFile::read_from_path(path))
    }

    /// Like [`read`](Self::read), with the table built by `loader`, typically
    /// obtained from a [`FormatRegistry`](super::registry::FormatRegistry).
    pub fn read_with(
        &mut self,
        path: impl AsRef<Path>,
        cache: &ParametersCache,
        loader: impl FnOnce(&Path) -> Result<ParameterTable, ParamLoadError>,
    ) -> Result<(), ParamLoadError> {
        let path = path.as_ref();
        let source_id = path.to_string_lossy().to_string();

        match cache.get_or_load(&source_id, || loader(path)) {
            Ok((table, cached)) => {
                if cached {
                    info!("Reusing cached parameters for '{}'.", source_id);
                } else {
                    info!("Loaded parameters from '{}'.", source_id);
                }
                self.table = table;
                self.file_name = Some(source_id);
                self.error_string = None;
                Ok(())
            }
            Err(e) => {
                self.error_string = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn table(&self) -> &SharedTable {
        &self.table
    }

    /// Source identifier of the last successful read.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Message of the most recent failed read, cleared by a successful one.
    pub fn error_string(&self) -> Option<&str> {
        self.error_string.as_deref()
    }

    // --- Per-term queries ------------------------------------------------ //

    /// Static MMFF properties of the atom's type, or `None` for types outside 1..=99.
    pub fn atom_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        atom: G::AtomId,
    ) -> Option<&'static AtomTypeRecord> {
        let record = atom_type_record(graph.type_number(atom));
        if record.is_none() {
            warn!("Atom {:?} has no MMFF type record.", atom);
        }
        record
    }

    pub fn bond_stretch_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
    ) -> Option<&BondStretchParameters> {
        self.table.bond_stretch(
            bond_type(graph, a, b),
            graph.type_number(a),
            graph.type_number(b),
        )
    }

    pub fn angle_bend_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
        c: G::AtomId,
    ) -> Option<&AngleBendParameters> {
        self.table.angle_bend(
            angle_type(graph, a, b, c),
            graph.type_number(a),
            graph.type_number(b),
            graph.type_number(c),
        )
    }

    /// Explicit stretch-bend parameters of `a-b-c`. Does not consult the
    /// row-based defaults; see [`default_stretch_bend_parameters`](Self::default_stretch_bend_parameters).
    pub fn stretch_bend_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
        c: G::AtomId,
    ) -> Option<&StretchBendParameters> {
        self.table.stretch_bend(
            stretch_bend_type(graph, a, b, c),
            graph.type_number(a),
            graph.type_number(b),
            graph.type_number(c),
        )
    }

    /// Row-based stretch-bend parameters of `a-b-c`, keyed by the zero-based
    /// periodic-table rows of the three elements.
    pub fn default_stretch_bend_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
        c: G::AtomId,
    ) -> Option<&StretchBendParameters> {
        let row = |atom| graph.period(atom).checked_sub(1);
        self.table.default_stretch_bend(row(a)?, row(b)?, row(c)?)
    }

    /// Out-of-plane parameters for the bend of `d` out of the `a-b-c` plane,
    /// where `b` is the central atom.
    pub fn out_of_plane_bending_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
        c: G::AtomId,
        d: G::AtomId,
    ) -> Option<&OutOfPlaneBendingParameters> {
        self.out_of_plane_bending_parameters_by_types(
            graph.type_number(a),
            graph.type_number(b),
            graph.type_number(c),
            graph.type_number(d),
        )
    }

    pub fn torsion_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
        c: G::AtomId,
        d: G::AtomId,
    ) -> Option<&TorsionParameters> {
        self.torsion_parameters_by_types(
            torsion_type(graph, a, b, c, d),
            graph.type_number(a),
            graph.type_number(b),
            graph.type_number(c),
            graph.type_number(d),
        )
    }

    pub fn van_der_waals_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        atom: G::AtomId,
    ) -> Option<&VanDerWaalsParameters> {
        self.table.van_der_waals(graph.type_number(atom))
    }

    /// Bond charge increment for `a-b`, matched on the given atom order.
    pub fn charge_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        a: G::AtomId,
        b: G::AtomId,
    ) -> Option<&ChargeParameters> {
        self.table.charge(
            bond_type(graph, a, b),
            graph.type_number(a),
            graph.type_number(b),
        )
    }

    pub fn partial_charge_parameters<G: MolecularGraph>(
        &self,
        graph: &G,
        atom: G::AtomId,
    ) -> Option<&PartialChargeParameters> {
        self.table.partial_charge(graph.type_number(atom))
    }

    // --- Type-level queries ---------------------------------------------- //

    pub fn bond_stretch_parameters_by_types(
        &self,
        bond_type: u8,
        type_a: u8,
        type_b: u8,
    ) -> Option<&BondStretchParameters> {
        self.table.bond_stretch(bond_type, type_a, type_b)
    }

    pub fn angle_bend_parameters_by_types(
        &self,
        angle_type: u8,
        type_a: u8,
        type_b: u8,
        type_c: u8,
    ) -> Option<&AngleBendParameters> {
        self.table.angle_bend(angle_type, type_a, type_b, type_c)
    }

    pub fn stretch_bend_parameters_by_types(
        &self,
        stretch_bend_type: u8,
        type_a: u8,
        type_b: u8,
        type_c: u8,
    ) -> Option<&StretchBendParameters> {
        self.table.stretch_bend(stretch_bend_type, type_a, type_b, type_c)
    }

    pub fn default_stretch_bend_parameters_by_rows(
        &self,
        row_a: u8,
        row_b: u8,
        row_c: u8,
    ) -> Option<&StretchBendParameters> {
        self.table.default_stretch_bend(row_a, row_b, row_c)
    }

    /// Out-of-plane lookup with the generalized-type fallback.
    pub fn out_of_plane_bending_parameters_by_types(
        &self,
        type_a: u8,
        type_b: u8,
        type_c: u8,
        type_d: u8,
    ) -> Option<&OutOfPlaneBendingParameters> {
        resolve_out_of_plane(&self.table, type_a, type_b, type_c, type_d)
    }

    /// Torsion lookup with the generalized-type fallback.
    pub fn torsion_parameters_by_types(
        &self,
        torsion_type: u8,
        type_a: u8,
        type_b: u8,
        type_c: u8,
        type_d: u8,
    ) -> Option<&TorsionParameters> {
        resolve_torsion(&self.table, torsion_type, type_a, type_b, type_c, type_d)
    }

    pub fn van_der_waals_parameters_by_type(&self, type_number: u8) -> Option<&VanDerWaalsParameters> {
        self.table.van_der_waals(type_number)
    }

    pub fn charge_parameters_by_types(
        &self,
        bond_type: u8,
        type_a: u8,
        type_b: u8,
    ) -> Option<&ChargeParameters> {
        self.table.charge(bond_type, type_a, type_b)
    }

    pub fn partial_charge_parameters_by_type(&self, type_number: u8) -> Option<&PartialChargeParameters> {
        self.table.partial_charge(type_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::index::{BondStretchKey, OutOfPlaneKey};
    use crate::core::models::atom::Atom;
    use crate::core::models::ids::AtomId;
    use crate::core::models::system::MolecularSystem;
    use crate::core::models::topology::BondOrder;
    use std::fs;
    use tempfile::tempdir;

    const SOURCE: &str = "\
# bond stretch
0 1 1 4.258 1.508
0 1 5 4.766 1.093
$
$
0 1 1 1 0.851 109.608
0 1 1 5 0.636 110.549
0 5 1 5 0.516 108.836
$
0 1 1 5 0.206 0.136
$
0 1 0 0.150 0.150
1 1 0 0.250 0.250
$
0 2 0 0 0.040
$
0 0 1 1 0 0.000 0.000 0.300
0 5 1 1 5 0.000 0.000 0.280
$
1 1.050 2.490 3.890 1.282 -
5 0.250 0.800 4.200 1.209 -
$
0 1 5 0.0000
$
0 1 0.000 0.000
0 5 0.000 0.000
$
";

    fn ethane() -> (MolecularSystem, Vec<AtomId>) {
        let mut system = MolecularSystem::new();
        let c1 = system.add_atom(Atom::new("C1", 1, 6));
        let c2 = system.add_atom(Atom::new("C2", 1, 6));
        let mut ids = vec![c1, c2];
        for (carbon, name) in [(c1, "H1"), (c1, "H2"), (c1, "H3"), (c2, "H4"), (c2, "H5"), (c2, "H6")] {
            let h = system.add_atom(Atom::new(name, 5, 1));
            system.add_bond(carbon, h, BondOrder::Single).unwrap();
            ids.push(h);
        }
        system.add_bond(c1, c2, BondOrder::Single).unwrap();
        (system, ids)
    }

    fn write_source(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("MMFF94.prm");
        fs::write(&path, SOURCE).unwrap();
        path
    }

    #[test]
    fn read_resolves_every_term_of_ethane() {
        let dir = tempdir().unwrap();
        let cache = ParametersCache::new();
        let params = MmffParameters::load(write_source(dir.path()), &cache).unwrap();
        let (system, ids) = ethane();
        let (c1, c2, h1, h2, h4) = (ids[0], ids[1], ids[2], ids[3], ids[5]);

        assert_eq!(params.bond_stretch_parameters(&system, c1, c2).unwrap().r0, 1.508);
        assert_eq!(params.bond_stretch_parameters(&system, h1, c1).unwrap().r0, 1.093);
        assert_eq!(params.angle_bend_parameters(&system, h1, c1, h2).unwrap().theta0, 108.836);
        assert_eq!(params.angle_bend_parameters(&system, h1, c1, c2).unwrap().theta0, 110.549);
        assert_eq!(params.stretch_bend_parameters(&system, c2, c1, h1).unwrap().kba_ijk, 0.206);
        assert!(params.stretch_bend_parameters(&system, h1, c1, c2).is_none());
        assert_eq!(
            params.default_stretch_bend_parameters(&system, h1, c1, h2).unwrap().kba_ijk,
            0.150
        );
        assert_eq!(params.torsion_parameters(&system, h1, c1, c2, h4).unwrap().v3, 0.280);
        assert_eq!(params.van_der_waals_parameters(&system, h1).unwrap().alpha, 0.250);
        assert_eq!(params.charge_parameters(&system, c1, h1).unwrap().bci, 0.0);
        assert!(params.charge_parameters(&system, h1, c1).is_none());
        assert!(params.partial_charge_parameters(&system, c2).is_some());
    }

    #[test]
    fn bond_and_angle_lookups_are_symmetric() {
        let dir = tempdir().unwrap();
        let cache = ParametersCache::new();
        let params = MmffParameters::load(write_source(dir.path()), &cache).unwrap();
        let (system, ids) = ethane();
        let (c1, c2, h1) = (ids[0], ids[1], ids[2]);

        for a in 1..=99u8 {
            for b in 1..=99u8 {
                assert_eq!(
                    params.bond_stretch_parameters_by_types(0, a, b),
                    params.bond_stretch_parameters_by_types(0, b, a)
                );
            }
        }
        assert_eq!(
            params.angle_bend_parameters(&system, h1, c1, c2),
            params.angle_bend_parameters(&system, c2, c1, h1)
        );
        assert_eq!(
            params.bond_stretch_parameters(&system, c1, h1),
            params.bond_stretch_parameters(&system, h1, c1)
        );
    }

    #[test]
    fn atom_parameters_respect_type_bounds() {
        let params = MmffParameters::new();
        let mut system = MolecularSystem::new();
        let untyped = system.add_atom(Atom::new("X0", 0, 6));
        let beyond = system.add_atom(Atom::new("X100", 100, 6));

        assert!(params.atom_parameters(&system, untyped).is_none());
        assert!(params.atom_parameters(&system, beyond).is_none());
        for type_number in 1..=99u8 {
            let atom = system.add_atom(Atom::new("T", type_number, 6));
            assert!(params.atom_parameters(&system, atom).is_some());
        }
    }

    #[test]
    fn atoms_with_types_beyond_key_range_get_no_parameters() {
        let mut table = ParameterTable::new();
        table.insert_bond_stretch(
            BondStretchKey::new(0, 2, 4),
            BondStretchParameters { kb: 7.0, r0: 1.0 },
        );
        let params = MmffParameters::from_table(Arc::new(table));

        let mut system = MolecularSystem::new();
        let c = system.add_atom(Atom::new("C", 1, 6));
        let x = system.add_atom(Atom::new("X", 140, 6));
        system.add_bond(c, x, BondOrder::Single).unwrap();

        assert_eq!(params.bond_stretch_parameters(&system, c, x), None);
        assert_eq!(params.bond_stretch_parameters_by_types(0, 1, 140), None);
        assert_eq!(params.torsion_parameters_by_types(6, 2, 3, 3, 3), None);
        assert!(params.bond_stretch_parameters_by_types(0, 2, 4).is_some());
    }

    #[test]
    fn second_read_of_same_source_reuses_cached_table() {
        let dir = tempdir().unwrap();
        let path = write_source(dir.path());
        let cache = ParametersCache::new();

        let first = MmffParameters::load(&path, &cache).unwrap();

        // Replace the cached table with a sentinel and remove the file: a second
        // read must still succeed and observe the sentinel.
        let mut sentinel = ParameterTable::new();
        sentinel.insert_bond_stretch(
            BondStretchKey::new(1, 98, 99),
            BondStretchParameters { kb: 42.0, r0: 4.2 },
        );
        let source_id = path.to_string_lossy().to_string();
        let replaced = cache.store(source_id, Arc::new(sentinel)).unwrap();
        assert!(Arc::ptr_eq(&replaced, first.table()));
        fs::remove_file(&path).unwrap();

        let second = MmffParameters::load(&path, &cache).unwrap();
        assert_eq!(
            second.bond_stretch_parameters_by_types(1, 99, 98),
            Some(&BondStretchParameters { kb: 42.0, r0: 4.2 })
        );

        let third = MmffParameters::load(&path, &cache).unwrap();
        assert!(Arc::ptr_eq(second.table(), third.table()));
        assert_eq!(third.file_name(), Some(path.to_string_lossy().as_ref()));
    }

    #[test]
    fn failed_read_keeps_previous_table_and_records_error() {
        let dir = tempdir().unwrap();
        let cache = ParametersCache::new();
        let mut params = MmffParameters::load(write_source(dir.path()), &cache).unwrap();
        let before = Arc::clone(params.table());

        let missing = dir.path().join("missing.prm");
        let result = params.read(&missing, &cache);

        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
        assert!(Arc::ptr_eq(&before, params.table()));
        assert!(params.error_string().unwrap().contains("Cannot open source"));
        assert!(cache.get(&missing.to_string_lossy()).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn out_of_plane_query_uses_generalized_types() {
        let mut table = ParameterTable::new();
        table.insert_out_of_plane_bending(
            OutOfPlaneKey::new(0, 37, 0, 0),
            OutOfPlaneBendingParameters { koop: 0.04 },
        );
        let params = MmffParameters::from_table(Arc::new(table));

        assert_eq!(
            params.out_of_plane_bending_parameters_by_types(37, 37, 37, 5),
            Some(&OutOfPlaneBendingParameters { koop: 0.04 })
        );
        assert!(params.out_of_plane_bending_parameters_by_types(84, 37, 37, 5).is_none());
    }

    #[test]
    fn torsion_query_falls_back_to_wildcard_types() {
        let dir = tempdir().unwrap();
        let cache = ParametersCache::new();
        let params = MmffParameters::load(write_source(dir.path()), &cache).unwrap();

        // 1-1-1-1 has no explicit entry; the wildcard 0-1-1-0 row applies.
        assert_eq!(params.torsion_parameters_by_types(0, 1, 1, 1, 1).unwrap().v3, 0.300);
    }

    #[test]
    fn read_with_uses_supplied_loader() {
        let cache = ParametersCache::new();
        let mut params = MmffParameters::new();
        params
            .read_with("in-memory", &cache, |_| Ok(ParameterTable::new()))
            .unwrap();

        assert_eq!(params.file_name(), Some("in-memory"));
        assert!(params.table().is_empty());
        assert!(cache.get("in-memory").is_some());
    }
}
