use super::load_parameters;
use crate::cli::DumpArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use mmffkit::core::forcefield::params::{DonorAcceptor, ParameterTable};
use mmffkit::core::forcefield::term::TermKind;
use serde::Serialize;
use std::io::Write;
use tracing::info;

pub fn run(args: DumpArgs, file_config: &PartialConfig) -> Result<()> {
    let (_, parameters) = load_parameters(&args.source, file_config)?;

    let mut writer = csv::Writer::from_path(&args.output)?;
    let count = dump_section(parameters.table(), args.kind, &mut writer)?;
    writer.flush()?;

    info!(
        "Wrote {} {} entries to '{}'.",
        count,
        args.kind,
        args.output.display()
    );
    println!("Wrote {} {} entries to '{}'.", count, args.kind, args.output.display());
    Ok(())
}

#[derive(Serialize)]
struct BondStretchRow {
    bond_type: u8,
    type_a: u8,
    type_b: u8,
    kb: f64,
    r0: f64,
}

#[derive(Serialize)]
struct AngleBendRow {
    angle_type: u8,
    type_a: u8,
    type_b: u8,
    type_c: u8,
    ka: f64,
    theta0: f64,
}

#[derive(Serialize)]
struct StretchBendRow {
    stretch_bend_type: u8,
    type_a: u8,
    type_b: u8,
    type_c: u8,
    kba_ijk: f64,
    kba_kji: f64,
}

#[derive(Serialize)]
struct DefaultStretchBendRow {
    row_a: u8,
    row_b: u8,
    row_c: u8,
    kba_ijk: f64,
    kba_kji: f64,
}

#[derive(Serialize)]
struct OutOfPlaneRow {
    type_a: u8,
    type_b: u8,
    type_c: u8,
    type_d: u8,
    koop: f64,
}

#[derive(Serialize)]
struct TorsionRow {
    torsion_type: u8,
    type_a: u8,
    type_b: u8,
    type_c: u8,
    type_d: u8,
    v1: f64,
    v2: f64,
    v3: f64,
}

#[derive(Serialize)]
struct VanDerWaalsRow {
    #[serde(rename = "type")]
    type_number: u8,
    alpha: f64,
    n: f64,
    a: f64,
    g: f64,
    da: DonorAcceptor,
}

#[derive(Serialize)]
struct ChargeRow {
    bond_type: u8,
    type_a: u8,
    type_b: u8,
    bci: f64,
}

#[derive(Serialize)]
struct PartialChargeRow {
    #[serde(rename = "type")]
    type_number: u8,
    pbci: f64,
    fcadj: f64,
}

fn write_sorted<W: Write, K: Ord, R: Serialize>(
    writer: &mut csv::Writer<W>,
    mut rows: Vec<(K, R)>,
) -> Result<usize> {
    rows.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (_, row) in &rows {
        writer.serialize(row)?;
    }
    Ok(rows.len())
}

/// Writes every entry of one table section as CSV, ordered by canonical key
/// (file order for the list-backed sections).
pub fn dump_section<W: Write>(
    table: &ParameterTable,
    kind: TermKind,
    writer: &mut csv::Writer<W>,
) -> Result<usize> {
    match kind {
        TermKind::BondStretch => write_sorted(
            writer,
            table
                .bond_stretch_entries()
                .map(|(key, p)| {
                    let row = BondStretchRow {
                        bond_type: key.bond_type,
                        type_a: key.type_a,
                        type_b: key.type_b,
                        kb: p.kb,
                        r0: p.r0,
                    };
                    (key.index(), row)
                })
                .collect(),
        ),
        TermKind::AngleBend => write_sorted(
            writer,
            table
                .angle_bend_entries()
                .map(|(key, p)| {
                    let row = AngleBendRow {
                        angle_type: key.angle_type,
                        type_a: key.type_a,
                        type_b: key.type_b,
                        type_c: key.type_c,
                        ka: p.ka,
                        theta0: p.theta0,
                    };
                    (key.index(), row)
                })
                .collect(),
        ),
        TermKind::StretchBend => write_sorted(
            writer,
            table
                .stretch_bend_entries()
                .map(|(key, p)| {
                    let row = StretchBendRow {
                        stretch_bend_type: key.stretch_bend_type,
                        type_a: key.type_a,
                        type_b: key.type_b,
                        type_c: key.type_c,
                        kba_ijk: p.kba_ijk,
                        kba_kji: p.kba_kji,
                    };
                    (key.index(), row)
                })
                .collect(),
        ),
        TermKind::DefaultStretchBend => write_sorted(
            writer,
            table
                .default_stretch_bend_entries()
                .iter()
                .enumerate()
                .map(|(position, entry)| {
                    let row = DefaultStretchBendRow {
                        row_a: entry.row_a,
                        row_b: entry.row_b,
                        row_c: entry.row_c,
                        kba_ijk: entry.parameters.kba_ijk,
                        kba_kji: entry.parameters.kba_kji,
                    };
                    (position, row)
                })
                .collect(),
        ),
        TermKind::OutOfPlaneBending => write_sorted(
            writer,
            table
                .out_of_plane_bending_entries()
                .map(|(key, p)| {
                    let row = OutOfPlaneRow {
                        type_a: key.type_a,
                        type_b: key.type_b,
                        type_c: key.type_c,
                        type_d: key.type_d,
                        koop: p.koop,
                    };
                    (key.index(), row)
                })
                .collect(),
        ),
        TermKind::Torsion => write_sorted(
            writer,
            table
                .torsion_entries()
                .map(|(key, p)| {
                    let row = TorsionRow {
                        torsion_type: key.torsion_type,
                        type_a: key.type_a,
                        type_b: key.type_b,
                        type_c: key.type_c,
                        type_d: key.type_d,
                        v1: p.v1,
                        v2: p.v2,
                        v3: p.v3,
                    };
                    (key.index(), row)
                })
                .collect(),
        ),
        TermKind::VanDerWaals => write_sorted(
            writer,
            table
                .van_der_waals_entries()
                .map(|(type_number, p)| {
                    let row = VanDerWaalsRow {
                        type_number,
                        alpha: p.alpha,
                        n: p.n,
                        a: p.a,
                        g: p.g,
                        da: p.da,
                    };
                    (type_number, row)
                })
                .collect(),
        ),
        TermKind::Charge => write_sorted(
            writer,
            table
                .charge_entries()
                .iter()
                .enumerate()
                .map(|(position, p)| {
                    let row = ChargeRow {
                        bond_type: p.bond_type,
                        type_a: p.type_a,
                        type_b: p.type_b,
                        bci: p.bci,
                    };
                    (position, row)
                })
                .collect(),
        ),
        TermKind::PartialCharge => write_sorted(
            writer,
            table
                .partial_charge_entries()
                .map(|(type_number, p)| {
                    let row = PartialChargeRow {
                        type_number,
                        pbci: p.pbci,
                        fcadj: p.fcadj,
                    };
                    (type_number, row)
                })
                .collect(),
        ),
    }
}
