use super::load_parameters;
use crate::cli::InspectArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use mmffkit::core::forcefield::params::TableStats;
use mmffkit::core::forcefield::term::TermKind;
use std::io::{self, Write};
use tracing::warn;

pub fn run(args: InspectArgs, file_config: &PartialConfig) -> Result<()> {
    let (config, parameters) = load_parameters(&args.source, file_config)?;
    let stats = parameters.table().stats();

    if stats.total() == 0 {
        warn!(
            "'{}' contains no parameter entries.",
            config.parameters_path.display()
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Source: {}", parameters.file_name().unwrap_or("-"))?;
    writeln!(out, "Format: {}", config.format)?;
    render_stats(&stats, &mut out)?;
    Ok(())
}

fn section_count(stats: &TableStats, kind: TermKind) -> usize {
    match kind {
        TermKind::BondStretch => stats.bond_stretch,
        TermKind::AngleBend => stats.angle_bend,
        TermKind::StretchBend => stats.stretch_bend,
        TermKind::DefaultStretchBend => stats.default_stretch_bend,
        TermKind::OutOfPlaneBending => stats.out_of_plane_bending,
        TermKind::Torsion => stats.torsion,
        TermKind::VanDerWaals => stats.van_der_waals,
        TermKind::Charge => stats.charge,
        TermKind::PartialCharge => stats.partial_charge,
    }
}

fn render_stats(stats: &TableStats, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:<22} {:>8}", "Section", "Entries")?;
    writeln!(out, "{}", "-".repeat(31))?;
    for kind in TermKind::ALL {
        writeln!(out, "{:<22} {:>8}", kind.as_str(), section_count(stats, kind))?;
    }
    writeln!(out, "{}", "-".repeat(31))?;
    writeln!(out, "{:<22} {:>8}", "total", stats.total())
}
