use crate::core::forcefield::classify::{self, bond_type, torsion_type};
use crate::core::forcefield::params::{
    AngleBendParameters, BondStretchParameters, ChargeParameters, OutOfPlaneBendingParameters,
    PartialChargeParameters, StretchBendParameters, TorsionParameters, VanDerWaalsParameters,
};
use crate::core::forcefield::term::TermKind;
use crate::core::models::graph::MolecularGraph;
use crate::engine::cache::ParametersCache;
use crate::engine::config::ParameterizationConfig;
use crate::engine::error::EngineError;
use crate::engine::forcefield::MmffParameters;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::registry::FormatRegistry;
use itertools::Itertools;
use rayon::iter::Either;
use rayon::prelude::*;
use tracing::{info, instrument, warn};

/// One resolved interaction term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term<A, const N: usize, P> {
    pub atoms: [A; N],
    /// Topological class code of the term (bond, angle, stretch-bend or torsion
    /// type; bond type for charges; 0 for kinds without classes).
    pub class: u8,
    pub parameters: P,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchBendTerm {
    pub parameters: StretchBendParameters,
    /// Whether the constants come from the periodic-row defaults.
    pub from_defaults: bool,
}

/// A term for which no parameters could be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTerm<A> {
    pub kind: TermKind,
    pub atoms: Vec<A>,
}

#[derive(Debug, Clone)]
pub struct ParameterizationReport<A> {
    pub bond_stretches: Vec<Term<A, 2, BondStretchParameters>>,
    pub angle_bends: Vec<Term<A, 3, AngleBendParameters>>,
    pub stretch_bends: Vec<Term<A, 3, StretchBendTerm>>,
    pub out_of_plane_bendings: Vec<Term<A, 4, OutOfPlaneBendingParameters>>,
    pub torsions: Vec<Term<A, 4, TorsionParameters>>,
    pub van_der_waals: Vec<Term<A, 1, VanDerWaalsParameters>>,
    pub charges: Vec<Term<A, 2, ChargeParameters>>,
    pub partial_charges: Vec<Term<A, 1, PartialChargeParameters>>,
    pub missing: Vec<MissingTerm<A>>,
}

impl<A> ParameterizationReport<A> {
    pub fn resolved_count(&self) -> usize {
        self.bond_stretches.len()
            + self.angle_bends.len()
            + self.stretch_bends.len()
            + self.out_of_plane_bendings.len()
            + self.torsions.len()
            + self.van_der_waals.len()
            + self.charges.len()
            + self.partial_charges.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_of(&self, kind: TermKind) -> impl Iterator<Item = &MissingTerm<A>> {
        self.missing.iter().filter(move |m| m.kind == kind)
    }
}

/// Loads the configured parameter source and resolves every term of `graph`.
///
/// # Errors
///
/// Fails if the configured format is unknown or the source cannot be read.
/// Terms without parameters are not an error; they are listed in
/// [`ParameterizationReport::missing`].
#[instrument(skip_all, name = "parameterization_workflow")]
pub fn run<G>(
    graph: &G,
    config: &ParameterizationConfig,
    cache: &ParametersCache,
    registry: &FormatRegistry,
    reporter: &ProgressReporter,
) -> Result<ParameterizationReport<G::AtomId>, EngineError>
where
    G: MolecularGraph + Sync,
    G::AtomId: Send + Sync,
{
    let loader = registry.create(&config.format)?;
    let source = config.parameters_path.to_string_lossy().to_string();
    let cached = cache.get(&source).is_some();

    let mut parameters = MmffParameters::new();
    parameters.read_with(&config.parameters_path, cache, loader)?;
    reporter.report(Progress::ParametersLoaded { source, cached });

    let report = parameterize(graph, &parameters, config.include_nonbonded, reporter);
    info!(
        "Parameterization complete: {} term(s) resolved, {} missing.",
        report.resolved_count(),
        report.missing.len()
    );
    Ok(report)
}

/// Resolves every term of `graph` against already loaded `parameters`.
pub fn parameterize<G>(
    graph: &G,
    parameters: &MmffParameters,
    include_nonbonded: bool,
    reporter: &ProgressReporter,
) -> ParameterizationReport<G::AtomId>
where
    G: MolecularGraph + Sync,
    G::AtomId: Send + Sync,
{
    let mut missing = Vec::new();
    let bonds = enumerate_bonds(graph);
    let angles = enumerate_angles(graph);

    let bond_stretches = resolve_all(TermKind::BondStretch, &bonds, reporter, &mut missing, |&[a, b]| {
        let class = bond_type(graph, a, b);
        parameters
            .bond_stretch_parameters_by_types(class, graph.type_number(a), graph.type_number(b))
            .map(|&p| term([a, b], class, p))
    });

    let angle_bends = resolve_all(TermKind::AngleBend, &angles, reporter, &mut missing, |&[a, b, c]| {
        let class = classify::angle_type(graph, a, b, c);
        let [ta, tb, tc] = [a, b, c].map(|atom| graph.type_number(atom));
        parameters
            .angle_bend_parameters_by_types(class, ta, tb, tc)
            .map(|&p| term([a, b, c], class, p))
    });

    let stretch_bends = resolve_all(TermKind::StretchBend, &angles, reporter, &mut missing, |&atoms| {
        resolve_stretch_bend(graph, parameters, atoms)
    });

    let quartets = enumerate_out_of_plane(graph);
    let out_of_plane_bendings =
        resolve_all(TermKind::OutOfPlaneBending, &quartets, reporter, &mut missing, |&atoms| {
            let [ta, tb, tc, td] = atoms.map(|atom| graph.type_number(atom));
            parameters
                .out_of_plane_bending_parameters_by_types(ta, tb, tc, td)
                .map(|&p| term(atoms, 0, p))
        });

    let dihedrals = enumerate_torsions(graph);
    let torsions = resolve_all(TermKind::Torsion, &dihedrals, reporter, &mut missing, |&atoms| {
        let [a, b, c, d] = atoms;
        let class = torsion_type(graph, a, b, c, d);
        let [ta, tb, tc, td] = atoms.map(|atom| graph.type_number(atom));
        parameters
            .torsion_parameters_by_types(class, ta, tb, tc, td)
            .map(|&p| term(atoms, class, p))
    });

    let (van_der_waals, charges, partial_charges) = if include_nonbonded {
        let singles: Vec<[G::AtomId; 1]> = graph.atoms().map(|atom| [atom]).collect();
        let van_der_waals = resolve_all(TermKind::VanDerWaals, &singles, reporter, &mut missing, |&[atom]| {
            parameters
                .van_der_waals_parameters_by_type(graph.type_number(atom))
                .map(|&p| term([atom], 0, p))
        });
        let charges = resolve_all(TermKind::Charge, &bonds, reporter, &mut missing, |&[a, b]| {
            resolve_charge(graph, parameters, a, b)
        });
        let partial_charges =
            resolve_all(TermKind::PartialCharge, &singles, reporter, &mut missing, |&[atom]| {
                parameters
                    .partial_charge_parameters_by_type(graph.type_number(atom))
                    .map(|&p| term([atom], 0, p))
            });
        (van_der_waals, charges, partial_charges)
    } else {
        (Vec::new(), Vec::new(), Vec::new())
    };

    ParameterizationReport {
        bond_stretches,
        angle_bends,
        stretch_bends,
        out_of_plane_bendings,
        torsions,
        van_der_waals,
        charges,
        partial_charges,
        missing,
    }
}

fn term<A, const N: usize, P>(atoms: [A; N], class: u8, parameters: P) -> Term<A, N, P> {
    Term {
        atoms,
        class,
        parameters,
    }
}

fn resolve_all<A, const N: usize, P, F>(
    kind: TermKind,
    tuples: &[[A; N]],
    reporter: &ProgressReporter,
    missing: &mut Vec<MissingTerm<A>>,
    resolve: F,
) -> Vec<Term<A, N, P>>
where
    A: Copy + Send + Sync,
    P: Send,
    F: Fn(&[A; N]) -> Option<Term<A, N, P>> + Sync,
{
    reporter.report(Progress::TermsEnumerated {
        kind,
        count: tuples.len(),
    });

    let (resolved, unresolved): (Vec<_>, Vec<_>) =
        tuples.par_iter().partition_map(|atoms| match resolve(atoms) {
            Some(term) => Either::Left(term),
            None => Either::Right(MissingTerm {
                kind,
                atoms: atoms.to_vec(),
            }),
        });

    if !unresolved.is_empty() {
        warn!("{} {} term(s) have no parameters.", unresolved.len(), kind);
    }
    reporter.report(Progress::TermsResolved {
        kind,
        missing: unresolved.len(),
    });
    missing.extend(unresolved);
    resolved
}

/// Explicit parameters in either direction first, then the periodic-row
/// defaults in either direction. A reversed match reports the atoms reversed
/// so that `kba_ijk` always refers to the first listed atom.
fn resolve_stretch_bend<G: MolecularGraph>(
    graph: &G,
    parameters: &MmffParameters,
    [a, b, c]: [G::AtomId; 3],
) -> Option<Term<G::AtomId, 3, StretchBendTerm>> {
    let explicit = |[i, j, k]: [G::AtomId; 3]| {
        let class = classify::stretch_bend_type(graph, i, j, k);
        parameters
            .stretch_bend_parameters(graph, i, j, k)
            .map(|&p| term([i, j, k], class, StretchBendTerm { parameters: p, from_defaults: false }))
    };
    let defaults = |[i, j, k]: [G::AtomId; 3]| {
        let class = classify::stretch_bend_type(graph, i, j, k);
        parameters
            .default_stretch_bend_parameters(graph, i, j, k)
            .map(|&p| term([i, j, k], class, StretchBendTerm { parameters: p, from_defaults: true }))
    };

    explicit([a, b, c])
        .or_else(|| explicit([c, b, a]))
        .or_else(|| defaults([a, b, c]))
        .or_else(|| defaults([c, b, a]))
}

/// Bond charge increments are tabulated for one atom order; the reverse order
/// carries the opposite sign.
fn resolve_charge<G: MolecularGraph>(
    graph: &G,
    parameters: &MmffParameters,
    a: G::AtomId,
    b: G::AtomId,
) -> Option<Term<G::AtomId, 2, ChargeParameters>> {
    let class = bond_type(graph, a, b);
    let (ta, tb) = (graph.type_number(a), graph.type_number(b));
    parameters
        .charge_parameters_by_types(class, ta, tb)
        .map(|&p| term([a, b], class, p))
        .or_else(|| {
            parameters
                .charge_parameters_by_types(class, tb, ta)
                .map(|&p| term([b, a], class, p))
        })
}

fn enumerate_bonds<G: MolecularGraph>(graph: &G) -> Vec<[G::AtomId; 2]> {
    graph
        .atoms()
        .flat_map(|a| graph.neighbors(a).filter(move |&b| a < b).map(move |b| [a, b]))
        .sorted()
        .collect()
}

fn enumerate_angles<G: MolecularGraph>(graph: &G) -> Vec<[G::AtomId; 3]> {
    graph
        .atoms()
        .sorted()
        .flat_map(|b| {
            graph
                .neighbors(b)
                .sorted()
                .tuple_combinations()
                .map(move |(a, c)| [a, b, c])
        })
        .collect()
}

/// Three quartets per trivalent center, one for each neighbor bending out of
/// the plane of the other two.
fn enumerate_out_of_plane<G: MolecularGraph>(graph: &G) -> Vec<[G::AtomId; 4]> {
    graph
        .atoms()
        .sorted()
        .filter(|&b| graph.neighbor_count(b) == 3)
        .flat_map(|b| {
            let n: Vec<_> = graph.neighbors(b).sorted().collect();
            [
                [n[1], b, n[2], n[0]],
                [n[0], b, n[2], n[1]],
                [n[0], b, n[1], n[2]],
            ]
        })
        .collect()
}

fn enumerate_torsions<G: MolecularGraph>(graph: &G) -> Vec<[G::AtomId; 4]> {
    enumerate_bonds(graph)
        .into_iter()
        .flat_map(|[b, c]| {
            let outer_b: Vec<_> = graph.neighbors(b).filter(|&a| a != c).sorted().collect();
            let outer_c: Vec<_> = graph.neighbors(c).filter(|&d| d != b).sorted().collect();
            outer_b
                .into_iter()
                .cartesian_product(outer_c)
                .filter(|(a, d)| a != d)
                .map(move |(a, d)| [a, b, c, d])
        })
        .collect()
}
