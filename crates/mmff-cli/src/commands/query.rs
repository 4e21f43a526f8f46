use super::load_parameters;
use crate::cli::QueryArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use mmffkit::core::forcefield::term::TermKind;
use mmffkit::engine::forcefield::MmffParameters;
use tracing::{info, warn};

pub fn run(args: QueryArgs, file_config: &PartialConfig) -> Result<()> {
    let (_, parameters) = load_parameters(&args.source, file_config)?;

    match lookup(&parameters, args.kind, args.class, &args.types)? {
        Some(description) => println!("{} {:?}: {}", args.kind, args.types, description),
        None => {
            info!("No {} parameters for types {:?}.", args.kind, args.types);
            println!("{} {:?}: no parameters found", args.kind, args.types);
        }
    }
    Ok(())
}

/// Resolves one term by atom types and renders its parameters.
///
/// Out-of-plane and torsion queries go through the generalized-type fallback;
/// all other kinds are exact lookups with canonical type ordering.
pub fn lookup(
    parameters: &MmffParameters,
    kind: TermKind,
    class: u8,
    types: &[u8],
) -> Result<Option<String>> {
    if types.len() != kind.arity() {
        return Err(CliError::Argument(format!(
            "{} terms take {} atom types, got {}",
            kind,
            kind.arity(),
            types.len()
        )));
    }
    if class != 0 && !kind.is_classified() {
        warn!("{} lookups ignore the class argument ({}).", kind, class);
    }

    let described = match (kind, types) {
        (TermKind::BondStretch, &[a, b]) => parameters
            .bond_stretch_parameters_by_types(class, a, b)
            .map(|p| format!("kb = {:.3} md/A, r0 = {:.3} A", p.kb, p.r0)),
        (TermKind::AngleBend, &[a, b, c]) => parameters
            .angle_bend_parameters_by_types(class, a, b, c)
            .map(|p| format!("ka = {:.3} md*A/rad^2, theta0 = {:.3} deg", p.ka, p.theta0)),
        (TermKind::StretchBend, &[a, b, c]) => parameters
            .stretch_bend_parameters_by_types(class, a, b, c)
            .map(|p| format!("kbaIJK = {:.3}, kbaKJI = {:.3}", p.kba_ijk, p.kba_kji)),
        (TermKind::DefaultStretchBend, &[a, b, c]) => parameters
            .default_stretch_bend_parameters_by_rows(a, b, c)
            .map(|p| format!("kbaIJK = {:.3}, kbaKJI = {:.3}", p.kba_ijk, p.kba_kji)),
        (TermKind::OutOfPlaneBending, &[a, b, c, d]) => parameters
            .out_of_plane_bending_parameters_by_types(a, b, c, d)
            .map(|p| format!("koop = {:.3}", p.koop)),
        (TermKind::Torsion, &[a, b, c, d]) => parameters
            .torsion_parameters_by_types(class, a, b, c, d)
            .map(|p| format!("V1 = {:.3}, V2 = {:.3}, V3 = {:.3}", p.v1, p.v2, p.v3)),
        (TermKind::VanDerWaals, &[t]) => parameters.van_der_waals_parameters_by_type(t).map(|p| {
            format!(
                "alpha-i = {:.3}, N-i = {:.3}, A-i = {:.3}, G-i = {:.3}, DA = {:?}",
                p.alpha, p.n, p.a, p.g, p.da
            )
        }),
        (TermKind::Charge, &[a, b]) => parameters
            .charge_parameters_by_types(class, a, b)
            .map(|p| format!("bci = {:.4}", p.bci)),
        (TermKind::PartialCharge, &[t]) => parameters
            .partial_charge_parameters_by_type(t)
            .map(|p| format!("pbci = {:.3}, fcadj = {:.3}", p.pbci, p.fcadj)),
        _ => None,
    };

    Ok(described)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::SOURCE;
    use mmffkit::core::io::mmff::MmffParameterFile;
    use mmffkit::core::io::traits::ParameterFormat;
    use std::io::Cursor;
    use std::sync::Arc;

    fn parameters() -> MmffParameters {
        let table = MmffParameterFile::read_from(&mut Cursor::new(SOURCE)).unwrap();
        MmffParameters::from_table(Arc::new(table))
    }

    #[test]
    fn bond_lookup_is_order_independent() {
        let parameters = parameters();
        let forward = lookup(&parameters, TermKind::BondStretch, 0, &[1, 5]).unwrap();
        let reverse = lookup(&parameters, TermKind::BondStretch, 0, &[5, 1]).unwrap();
        assert_eq!(forward.as_deref(), Some("kb = 4.766 md/A, r0 = 1.093 A"));
        assert_eq!(forward, reverse);
    }

    #[test]
    fn class_selects_bond_row() {
        let parameters = parameters();
        let found = lookup(&parameters, TermKind::BondStretch, 1, &[2, 2]).unwrap();
        assert_eq!(found.as_deref(), Some("kb = 5.573 md/A, r0 = 1.458 A"));
        assert_eq!(lookup(&parameters, TermKind::BondStretch, 0, &[2, 2]).unwrap(), None);
    }

    #[test]
    fn out_of_plane_lookup_uses_fallback() {
        // 37 reaches the 0-2-0-0 wildcard row at level 5; 84 has no equivalence row.
        let parameters = parameters();
        let found = lookup(&parameters, TermKind::OutOfPlaneBending, 0, &[84, 2, 84, 84]).unwrap();
        assert_eq!(found, None);
        let found = lookup(&parameters, TermKind::OutOfPlaneBending, 0, &[37, 2, 37, 37]).unwrap();
        assert_eq!(found.as_deref(), Some("koop = 0.040"));
    }

    #[test]
    fn default_stretch_bend_takes_rows() {
        let parameters = parameters();
        let found = lookup(&parameters, TermKind::DefaultStretchBend, 0, &[0, 1, 0]).unwrap();
        assert_eq!(found.as_deref(), Some("kbaIJK = 0.150, kbaKJI = 0.150"));
    }

    #[test]
    fn single_type_lookups() {
        let parameters = parameters();
        let vdw = lookup(&parameters, TermKind::VanDerWaals, 0, &[5]).unwrap().unwrap();
        assert!(vdw.starts_with("alpha-i = 0.250"));
        assert!(vdw.ends_with("DA = None"));
        assert_eq!(lookup(&parameters, TermKind::PartialCharge, 0, &[99]).unwrap(), None);
    }

    #[test]
    fn wrong_number_of_types_is_rejected() {
        let parameters = parameters();
        let result = lookup(&parameters, TermKind::Torsion, 0, &[1, 1, 1]);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }
}
