use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kinds of interaction terms the parameter table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermKind {
    BondStretch,
    AngleBend,
    StretchBend,
    DefaultStretchBend,
    OutOfPlaneBending,
    Torsion,
    VanDerWaals,
    Charge,
    PartialCharge,
}

impl TermKind {
    pub const ALL: [TermKind; 9] = [
        TermKind::BondStretch,
        TermKind::AngleBend,
        TermKind::StretchBend,
        TermKind::DefaultStretchBend,
        TermKind::OutOfPlaneBending,
        TermKind::Torsion,
        TermKind::VanDerWaals,
        TermKind::Charge,
        TermKind::PartialCharge,
    ];

    /// Number of atom types (or periodic rows, for default stretch-bend) that
    /// identify a term of this kind.
    pub fn arity(self) -> usize {
        match self {
            TermKind::VanDerWaals | TermKind::PartialCharge => 1,
            TermKind::BondStretch | TermKind::Charge => 2,
            TermKind::AngleBend | TermKind::StretchBend | TermKind::DefaultStretchBend => 3,
            TermKind::OutOfPlaneBending | TermKind::Torsion => 4,
        }
    }

    /// Whether lookups of this kind carry a topological class code.
    pub fn is_classified(self) -> bool {
        matches!(
            self,
            TermKind::BondStretch
                | TermKind::AngleBend
                | TermKind::StretchBend
                | TermKind::Torsion
                | TermKind::Charge
        )
    }

    /// Whether a lookup miss is retried with generalized atom types.
    pub fn has_fallback(self) -> bool {
        matches!(self, TermKind::OutOfPlaneBending | TermKind::Torsion)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TermKind::BondStretch => "bond-stretch",
            TermKind::AngleBend => "angle-bend",
            TermKind::StretchBend => "stretch-bend",
            TermKind::DefaultStretchBend => "default-stretch-bend",
            TermKind::OutOfPlaneBending => "out-of-plane",
            TermKind::Torsion => "torsion",
            TermKind::VanDerWaals => "van-der-waals",
            TermKind::Charge => "charge",
            TermKind::PartialCharge => "partial-charge",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown term kind: '{0}'")]
pub struct ParseTermKindError(pub String);

impl FromStr for TermKind {
    type Err = ParseTermKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bond" | "bond-stretch" => Ok(TermKind::BondStretch),
            "angle" | "angle-bend" => Ok(TermKind::AngleBend),
            "stbn" | "stretch-bend" => Ok(TermKind::StretchBend),
            "dfsb" | "default-stretch-bend" => Ok(TermKind::DefaultStretchBend),
            "oop" | "out-of-plane" | "out-of-plane-bending" => Ok(TermKind::OutOfPlaneBending),
            "torsion" | "dihedral" => Ok(TermKind::Torsion),
            "vdw" | "van-der-waals" => Ok(TermKind::VanDerWaals),
            "charge" | "bci" => Ok(TermKind::Charge),
            "pbci" | "partial-charge" => Ok(TermKind::PartialCharge),
            _ => Err(ParseTermKindError(s.to_string())),
        }
    }
}
