//! Generalized atom-type substitution for out-of-plane and torsion lookups.
//!
//! MMFF groups its symbolic types into progressively coarser classes. When no
//! exact entry exists for an out-of-plane or torsion term, the lookup is retried
//! with the outer atom types replaced by their level 3, 4 or 5 equivalents, in a
//! fixed order. Level 5 is usually the wildcard type 0.

use super::index::TORSION_CLASSES;
use super::params::{OutOfPlaneBendingParameters, ParameterTable, TorsionParameters};
use phf::{Map, phf_map};
use tracing::trace;

/// Level-1..=5 equivalents of an atom type. Level 1 and 2 are the type itself.
pub type EquivalenceRow = [u8; 5];

/// Level of the most specific generalization.
pub const FIRST_EQUIVALENCE_LEVEL: u8 = 3;
/// Level of the coarsest generalization.
pub const LAST_EQUIVALENCE_LEVEL: u8 = 5;

#[rustfmt::skip]
pub static EQUIVALENT_TYPES: Map<u8, EquivalenceRow> = phf_map! {
    1u8 => [1, 1, 1, 1, 0],
    2u8 => [2, 2, 2, 1, 0],
    3u8 => [3, 3, 3, 1, 0],
    4u8 => [4, 4, 4, 1, 0],
    5u8 => [5, 5, 5, 5, 0],
    6u8 => [6, 6, 6, 6, 0],
    7u8 => [7, 7, 7, 6, 0],
    8u8 => [8, 8, 8, 8, 0],
    9u8 => [9, 9, 9, 8, 0],
    10u8 => [10, 10, 10, 8, 0],
    11u8 => [11, 11, 11, 11, 0],
    12u8 => [12, 12, 12, 12, 0],
    13u8 => [13, 13, 13, 13, 0],
    14u8 => [14, 14, 14, 14, 0],
    15u8 => [15, 15, 15, 15, 0],
    16u8 => [16, 16, 16, 15, 0],
    17u8 => [17, 17, 17, 15, 0],
    18u8 => [18, 18, 18, 15, 0],
    19u8 => [19, 19, 19, 19, 0],
    20u8 => [20, 20, 1, 1, 0],
    21u8 => [21, 21, 21, 5, 0],
    22u8 => [22, 22, 22, 1, 0],
    23u8 => [23, 23, 23, 5, 0],
    24u8 => [24, 24, 24, 5, 0],
    25u8 => [25, 25, 25, 25, 0],
    26u8 => [26, 26, 26, 25, 0],
    27u8 => [27, 27, 28, 5, 0],
    28u8 => [28, 28, 28, 5, 0],
    29u8 => [29, 29, 29, 5, 0],
    30u8 => [30, 30, 2, 1, 0],
    31u8 => [31, 31, 31, 31, 0],
    32u8 => [32, 32, 7, 6, 0],
    33u8 => [33, 33, 21, 5, 0],
    34u8 => [34, 34, 8, 8, 0],
    35u8 => [35, 35, 6, 6, 0],
    36u8 => [36, 36, 36, 5, 0],
    37u8 => [37, 37, 2, 1, 0],
    38u8 => [38, 38, 9, 8, 0],
    39u8 => [39, 39, 10, 8, 0],
    40u8 => [40, 40, 10, 8, 0],
    41u8 => [41, 41, 3, 1, 0],
    42u8 => [42, 42, 42, 8, 0],
    43u8 => [43, 43, 10, 8, 0],
    44u8 => [44, 44, 16, 15, 0],
    45u8 => [45, 45, 10, 8, 0],
    46u8 => [46, 46, 9, 8, 0],
    47u8 => [47, 47, 42, 8, 0],
    48u8 => [48, 48, 9, 8, 0],
    49u8 => [49, 49, 6, 6, 0],
    50u8 => [50, 50, 21, 5, 0],
    51u8 => [51, 51, 7, 6, 0],
    52u8 => [52, 52, 21, 5, 0],
    53u8 => [53, 53, 42, 8, 0],
    54u8 => [54, 54, 9, 8, 0],
    55u8 => [55, 55, 10, 8, 0],
    56u8 => [56, 56, 10, 8, 0],
    57u8 => [57, 57, 2, 1, 0],
    58u8 => [58, 58, 10, 8, 0],
    59u8 => [59, 59, 6, 6, 0],
    60u8 => [60, 60, 4, 1, 0],
    61u8 => [61, 61, 42, 8, 0],
    62u8 => [62, 62, 10, 8, 0],
    63u8 => [63, 63, 2, 1, 0],
    64u8 => [64, 64, 2, 1, 0],
    65u8 => [65, 65, 9, 8, 0],
    66u8 => [66, 66, 9, 8, 0],
    67u8 => [67, 67, 9, 8, 0],
    68u8 => [68, 68, 8, 8, 0],
    69u8 => [69, 69, 9, 8, 0],
    70u8 => [70, 70, 70, 70, 70],
    71u8 => [71, 71, 5, 5, 0],
    72u8 => [72, 72, 16, 15, 0],
    73u8 => [73, 73, 18, 15, 0],
    74u8 => [74, 74, 17, 15, 0],
    75u8 => [75, 75, 26, 25, 0],
    76u8 => [76, 76, 9, 8, 0],
    77u8 => [77, 77, 12, 12, 0],
    78u8 => [78, 78, 2, 1, 0],
    79u8 => [79, 79, 9, 8, 0],
    80u8 => [80, 80, 2, 1, 0],
    81u8 => [81, 81, 10, 8, 0],
    82u8 => [82, 82, 9, 8, 0],
    87u8 => [87, 87, 87, 87, 87],
    88u8 => [88, 88, 88, 88, 88],
    89u8 => [89, 89, 89, 89, 89],
    90u8 => [90, 90, 90, 90, 90],
    91u8 => [91, 91, 91, 91, 91],
    92u8 => [92, 92, 92, 92, 92],
    93u8 => [93, 93, 93, 93, 93],
    94u8 => [94, 94, 94, 94, 94],
    95u8 => [95, 95, 95, 95, 95],
    96u8 => [96, 96, 96, 96, 96],
    97u8 => [97, 97, 97, 97, 97],
    98u8 => [98, 98, 98, 98, 98],
    99u8 => [99, 99, 99, 99, 99],
};

/// Returns the equivalent of `type_number` at `level`.
///
/// Levels up to 2 return the type unchanged. Types without an equivalence row
/// have no generalized form and yield `None` at levels 3 and above.
pub fn equivalent_type(type_number: u8, level: u8) -> Option<u8> {
    if level < FIRST_EQUIVALENCE_LEVEL {
        return Some(type_number);
    }
    let column = usize::from(level.min(LAST_EQUIVALENCE_LEVEL)) - 1;
    EQUIVALENT_TYPES.get(&type_number).map(|row| row[column])
}

/// The ordered lookups tried for an out-of-plane term `a-b(-c)-d` with center `b`.
///
/// Exact types first, then the three neighbors generalized together at levels
/// 3, 4 and 5 with the center kept. The sequence ends early at the first level
/// for which a neighbor has no equivalent.
pub fn out_of_plane_attempts(a: u8, b: u8, c: u8, d: u8) -> Vec<[u8; 4]> {
    let mut attempts = vec![[a, b, c, d]];
    for level in FIRST_EQUIVALENCE_LEVEL..=LAST_EQUIVALENCE_LEVEL {
        let generalized = (|| {
            Some([
                equivalent_type(a, level)?,
                b,
                equivalent_type(c, level)?,
                equivalent_type(d, level)?,
            ])
        })();
        match generalized {
            Some(types) => attempts.push(types),
            None => break,
        }
    }
    attempts
}

/// The ordered lookups tried for a torsion `a-b-c-d` of class `torsion_type`.
///
/// Exact types first; then the outer pair at levels (3, 5), (5, 3) and (5, 5)
/// with the original class; finally (5, 5) with the class forced to 0 as the
/// last resort. The central pair is never generalized.
pub fn torsion_attempts(torsion_type: u8, a: u8, b: u8, c: u8, d: u8) -> Vec<(u8, [u8; 4])> {
    let mut attempts = vec![(torsion_type, [a, b, c, d])];
    let outer = (|| {
        Some((
            equivalent_type(a, 3)?,
            equivalent_type(a, 5)?,
            equivalent_type(d, 3)?,
            equivalent_type(d, 5)?,
        ))
    })();
    if let Some((a3, a5, d3, d5)) = outer {
        attempts.push((torsion_type, [a3, b, c, d5]));
        attempts.push((torsion_type, [a5, b, c, d3]));
        attempts.push((torsion_type, [a5, b, c, d5]));
        attempts.push((0, [a5, b, c, d5]));
    }
    attempts
}

/// Resolves out-of-plane parameters, falling back through generalized types.
pub fn resolve_out_of_plane(
    table: &ParameterTable,
    a: u8,
    b: u8,
    c: u8,
    d: u8,
) -> Option<&OutOfPlaneBendingParameters> {
    out_of_plane_attempts(a, b, c, d)
        .into_iter()
        .enumerate()
        .find_map(|(step, [ta, tb, tc, td])| {
            let hit = table.out_of_plane_bending(ta, tb, tc, td);
            if hit.is_some() && step > 0 {
                trace!(step, "out-of-plane {a}-{b}-{c}-{d} resolved as {ta}-{tb}-{tc}-{td}");
            }
            hit
        })
}

/// Resolves torsion parameters, falling back through generalized types.
///
/// An unknown torsion class is a miss; it never reaches the generic class-0 step.
pub fn resolve_torsion(
    table: &ParameterTable,
    torsion_type: u8,
    a: u8,
    b: u8,
    c: u8,
    d: u8,
) -> Option<&TorsionParameters> {
    if i64::from(torsion_type) >= TORSION_CLASSES {
        return None;
    }
    torsion_attempts(torsion_type, a, b, c, d)
        .into_iter()
        .enumerate()
        .find_map(|(step, (class, [ta, tb, tc, td]))| {
            let hit = table.torsion(class, ta, tb, tc, td);
            if hit.is_some() && step > 0 {
                trace!(
                    step,
                    "torsion {torsion_type}:{a}-{b}-{c}-{d} resolved as {class}:{ta}-{tb}-{tc}-{td}"
                );
            }
            hit
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::index::{OutOfPlaneKey, TorsionKey};

    fn oop(koop: f64) -> OutOfPlaneBendingParameters {
        OutOfPlaneBendingParameters { koop }
    }

    fn torsion(v3: f64) -> TorsionParameters {
        TorsionParameters {
            v1: 0.0,
            v2: 0.0,
            v3,
        }
    }

    #[test]
    fn low_levels_return_the_type_itself() {
        assert_eq!(equivalent_type(37, 1), Some(37));
        assert_eq!(equivalent_type(37, 2), Some(37));
        assert_eq!(equivalent_type(84, 2), Some(84));
    }

    #[test]
    fn generalized_levels_follow_the_table() {
        assert_eq!(equivalent_type(37, 3), Some(2));
        assert_eq!(equivalent_type(37, 4), Some(1));
        assert_eq!(equivalent_type(37, 5), Some(0));
        assert_eq!(equivalent_type(27, 3), Some(28));
        assert_eq!(equivalent_type(70, 5), Some(70));
    }

    #[test]
    fn types_without_a_row_have_no_generalized_form() {
        assert_eq!(equivalent_type(84, 3), None);
        assert_eq!(equivalent_type(0, 5), None);
        assert_eq!(equivalent_type(100, 4), None);
    }

    #[test]
    fn out_of_plane_attempts_follow_levels_three_to_five() {
        let attempts = out_of_plane_attempts(37, 37, 37, 5);
        assert_eq!(
            attempts,
            vec![[37, 37, 37, 5], [2, 37, 2, 5], [1, 37, 1, 5], [0, 37, 0, 0]]
        );
    }

    #[test]
    fn out_of_plane_attempts_stop_at_missing_equivalents() {
        assert_eq!(out_of_plane_attempts(84, 2, 1, 1), vec![[84, 2, 1, 1]]);
    }

    #[test]
    fn torsion_attempts_follow_the_published_sequence() {
        let attempts = torsion_attempts(1, 37, 2, 2, 39);
        assert_eq!(
            attempts,
            vec![
                (1, [37, 2, 2, 39]),
                (1, [2, 2, 2, 0]),
                (1, [0, 2, 2, 10]),
                (1, [0, 2, 2, 0]),
                (0, [0, 2, 2, 0]),
            ]
        );
    }

    #[test]
    fn out_of_plane_resolves_to_level_five_entry() {
        let mut table = ParameterTable::new();
        table.insert_out_of_plane_bending(OutOfPlaneKey::new(0, 37, 0, 0), oop(0.04));

        assert_eq!(resolve_out_of_plane(&table, 37, 37, 37, 5), Some(&oop(0.04)));
    }

    #[test]
    fn out_of_plane_prefers_the_most_specific_entry() {
        let mut table = ParameterTable::new();
        table.insert_out_of_plane_bending(OutOfPlaneKey::new(0, 37, 0, 0), oop(0.04));
        table.insert_out_of_plane_bending(OutOfPlaneKey::new(1, 37, 1, 5), oop(0.02));

        assert_eq!(resolve_out_of_plane(&table, 37, 37, 37, 5), Some(&oop(0.02)));
    }

    #[test]
    fn out_of_plane_exhaustion_yields_none() {
        let mut table = ParameterTable::new();
        table.insert_out_of_plane_bending(OutOfPlaneKey::new(0, 2, 0, 0), oop(0.04));

        assert_eq!(resolve_out_of_plane(&table, 37, 37, 37, 5), None);
    }

    #[test]
    fn torsion_falls_back_to_generic_class_last() {
        let mut table = ParameterTable::new();
        table.insert_torsion(TorsionKey::new(0, 0, 2, 2, 0), torsion(0.5));

        assert_eq!(resolve_torsion(&table, 1, 37, 2, 2, 39), Some(&torsion(0.5)));
    }

    #[test]
    fn torsion_keeps_class_before_forcing_generic() {
        let mut table = ParameterTable::new();
        table.insert_torsion(TorsionKey::new(0, 0, 2, 2, 0), torsion(0.5));
        table.insert_torsion(TorsionKey::new(1, 0, 2, 2, 10), torsion(0.9));

        assert_eq!(resolve_torsion(&table, 1, 37, 2, 2, 39), Some(&torsion(0.9)));
    }

    #[test]
    fn torsion_exact_hit_wins() {
        let mut table = ParameterTable::new();
        table.insert_torsion(TorsionKey::new(0, 0, 2, 2, 0), torsion(0.5));
        table.insert_torsion(TorsionKey::new(1, 37, 2, 2, 39), torsion(1.5));

        assert_eq!(resolve_torsion(&table, 1, 39, 2, 2, 37), Some(&torsion(1.5)));
    }

    #[test]
    fn unknown_torsion_class_skips_generic_step() {
        let mut table = ParameterTable::new();
        table.insert_torsion(TorsionKey::new(0, 0, 3, 3, 0), torsion(0.5));

        assert_eq!(resolve_torsion(&table, 1, 2, 3, 3, 2), Some(&torsion(0.5)));
        assert_eq!(resolve_torsion(&table, 6, 2, 3, 3, 2), None);
    }

    #[test]
    fn torsion_exhaustion_yields_none() {
        let table = ParameterTable::new();
        assert_eq!(resolve_torsion(&table, 0, 1, 1, 1, 1), None);
    }
}
