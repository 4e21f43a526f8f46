use super::atom_types::atom_type_record;
use crate::core::models::graph::MolecularGraph;
use crate::core::models::topology::BondOrder;

/// Smallest ring an angle's three atoms can close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingContext {
    Acyclic,
    ThreeMembered,
    FourMembered,
}

/// Maps a ring context and the sum of the two flanking bond types (0..=2) to
/// the MMFF angle type.
pub fn angle_type_code(context: RingContext, bond_type_sum: u8) -> u8 {
    let codes: [u8; 3] = match context {
        RingContext::Acyclic => [0, 1, 2],
        RingContext::FourMembered => [4, 7, 8],
        RingContext::ThreeMembered => [3, 5, 6],
    };
    codes[usize::from(bond_type_sum.min(2))]
}

/// Maps an angle type and the bond types of its `a-b` and `b-c` bonds to the
/// MMFF stretch-bend type. Zero means the row-based defaults apply.
pub fn stretch_bend_type_code(angle_type: u8, bond_type_ab: u8, bond_type_bc: u8) -> u8 {
    let pick = |first: u8, second: u8| {
        if bond_type_ab == 1 {
            first
        } else if bond_type_bc == 1 {
            second
        } else {
            0
        }
    };
    match angle_type {
        1 => pick(1, 2),
        2 => 3,
        3 => 5,
        4 => 4,
        5 => pick(6, 7),
        6 => 8,
        7 => pick(9, 10),
        8 => 11,
        _ => 0,
    }
}

/// MMFF bond type of the bond `a-b`: 1 for a formally single, non-aromatic bond
/// joining two atoms that both carry `sbmb` or both carry `arom`, 0 otherwise.
pub fn bond_type<G: MolecularGraph>(graph: &G, a: G::AtomId, b: G::AtomId) -> u8 {
    if graph.bond_order(a, b) != Some(BondOrder::Single) || graph.is_aromatic_bond(a, b) {
        return 0;
    }
    let (Some(record_a), Some(record_b)) = (
        atom_type_record(graph.type_number(a)),
        atom_type_record(graph.type_number(b)),
    ) else {
        return 0;
    };
    u8::from((record_a.sbmb && record_b.sbmb) || (record_a.arom && record_b.arom))
}

pub fn ring_context<G: MolecularGraph>(
    graph: &G,
    a: G::AtomId,
    b: G::AtomId,
    c: G::AtomId,
) -> RingContext {
    if graph.is_bonded(a, c) {
        RingContext::ThreeMembered
    } else if graph
        .neighbors(a)
        .any(|n| n != b && n != c && graph.is_bonded(n, c))
    {
        RingContext::FourMembered
    } else {
        RingContext::Acyclic
    }
}

/// MMFF angle type of the angle `a-b-c` with `b` at the center.
pub fn angle_type<G: MolecularGraph>(graph: &G, a: G::AtomId, b: G::AtomId, c: G::AtomId) -> u8 {
    let sum = bond_type(graph, a, b) + bond_type(graph, b, c);
    angle_type_code(ring_context(graph, a, b, c), sum)
}

/// MMFF stretch-bend type of the angle `a-b-c`.
pub fn stretch_bend_type<G: MolecularGraph>(
    graph: &G,
    a: G::AtomId,
    b: G::AtomId,
    c: G::AtomId,
) -> u8 {
    stretch_bend_type_code(
        angle_type(graph, a, b, c),
        bond_type(graph, a, b),
        bond_type(graph, b, c),
    )
}

/// MMFF torsion type of the dihedral `a-b-c-d`.
///
/// Four-membered rings win over non-aromatic five-membered rings, which win
/// over the bond-type based classes.
pub fn torsion_type<G: MolecularGraph>(
    graph: &G,
    a: G::AtomId,
    b: G::AtomId,
    c: G::AtomId,
    d: G::AtomId,
) -> u8 {
    if graph.is_bonded(a, d) {
        return 4;
    }

    let in_saturated_five_ring = graph.rings(a).any(|ring| {
        ring.size() == 5
            && !ring.aromatic
            && ring.contains(&b)
            && ring.contains(&c)
            && ring.contains(&d)
    });
    if in_saturated_five_ring {
        return 5;
    }

    if bond_type(graph, b, c) == 1 {
        1
    } else if bond_type(graph, a, b) == 1 || bond_type(graph, c, d) == 1 {
        2
    } else {
        0
    }
}
