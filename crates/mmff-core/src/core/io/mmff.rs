use super::traits::ParameterFormat;
use crate::core::forcefield::atom_types::MAX_ATOM_TYPE;
use crate::core::forcefield::index::{AngleBendKey, BondStretchKey, OutOfPlaneKey, StretchBendKey, TorsionKey};
use crate::core::forcefield::params::{
    AngleBendParameters, BondStretchParameters, ChargeParameters, DefaultStretchBendParameters,
    DonorAcceptor, OutOfPlaneBendingParameters, ParameterTable, PartialChargeParameters,
    StretchBendParameters, TorsionParameters, VanDerWaalsParameters,
};
use std::io::{self, BufRead};
use std::ops::ControlFlow;
use tracing::{debug, info, trace};

const KEY_OUT_OF_RANGE: &str = "type or class does not fit the lookup key";

/// The sections of an MMFF94 parameter source, in file order.
///
/// A source starts in [`Section::BondStretch`]; every line beginning with `$`
/// moves to the next section and reaching [`Section::End`] stops the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BondStretch,
    EmpiricalBondStretch,
    AngleBend,
    StretchBend,
    DefaultStretchBend,
    OutOfPlaneBending,
    Torsion,
    VanDerWaals,
    Charge,
    PartialCharge,
    End,
}

impl Section {
    pub const FIRST: Section = Section::BondStretch;

    pub fn next(self) -> Self {
        match self {
            Section::BondStretch => Section::EmpiricalBondStretch,
            Section::EmpiricalBondStretch => Section::AngleBend,
            Section::AngleBend => Section::StretchBend,
            Section::StretchBend => Section::DefaultStretchBend,
            Section::DefaultStretchBend => Section::OutOfPlaneBending,
            Section::OutOfPlaneBending => Section::Torsion,
            Section::Torsion => Section::VanDerWaals,
            Section::VanDerWaals => Section::Charge,
            Section::Charge => Section::PartialCharge,
            Section::PartialCharge | Section::End => Section::End,
        }
    }
}

/// Reader for the sectioned MMFF94 parameter text format.
///
/// Parsing is lenient: comment lines (`#`) and rows with fewer than two fields
/// are ignored, numeric fields that do not parse read as zero, and rows that
/// cannot be stored (non-bonded types above the last atom type, or types and
/// classes that do not fit the lookup key) are skipped. None of these abort
/// the read.
pub struct MmffParameterFile;

impl ParameterFormat for MmffParameterFile {
    fn read_from(reader: &mut impl BufRead) -> io::Result<ParameterTable> {
        let mut parser = SectionParser::new();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            if parser.consume(&line).is_break() {
                break;
            }
        }

        Ok(parser.finish())
    }
}

struct SectionParser {
    section: Section,
    table: ParameterTable,
    line_number: usize,
    skipped: usize,
}

impl SectionParser {
    fn new() -> Self {
        Self {
            section: Section::FIRST,
            table: ParameterTable::new(),
            line_number: 0,
            skipped: 0,
        }
    }

    fn consume(&mut self, line: &str) -> ControlFlow<()> {
        self.line_number += 1;

        if line.starts_with('$') {
            self.section = self.section.next();
            return if self.section == Section::End {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            };
        }
        if line.starts_with('#') {
            return ControlFlow::Continue(());
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return ControlFlow::Continue(());
        }

        if let Err(reason) = self.store_row(&Row(&fields)) {
            self.skipped += 1;
            trace!(
                line = self.line_number,
                section = ?self.section,
                "Skipping row: {}",
                reason
            );
        }
        ControlFlow::Continue(())
    }

    fn store_row(&mut self, row: &Row) -> Result<(), &'static str> {
        match self.section {
            Section::BondStretch => {
                let key = BondStretchKey::try_new(row.small(0)?, row.small(1)?, row.small(2)?)
                    .ok_or(KEY_OUT_OF_RANGE)?;
                self.table.insert_bond_stretch(
                    key,
                    BondStretchParameters {
                        kb: row.real(3),
                        r0: row.real(4),
                    },
                );
            }
            Section::EmpiricalBondStretch | Section::End => {}
            Section::AngleBend => {
                let key = AngleBendKey::try_new(
                    row.small(0)?,
                    row.small(1)?,
                    row.small(2)?,
                    row.small(3)?,
                )
                .ok_or(KEY_OUT_OF_RANGE)?;
                self.table.insert_angle_bend(
                    key,
                    AngleBendParameters {
                        ka: row.real(4),
                        theta0: row.real(5),
                    },
                );
            }
            Section::StretchBend => {
                let key = StretchBendKey::try_new(
                    row.small(0)?,
                    row.small(1)?,
                    row.small(2)?,
                    row.small(3)?,
                )
                .ok_or(KEY_OUT_OF_RANGE)?;
                self.table.insert_stretch_bend(
                    key,
                    StretchBendParameters {
                        kba_ijk: row.real(4),
                        kba_kji: row.real(5),
                    },
                );
            }
            Section::DefaultStretchBend => {
                self.table.push_default_stretch_bend(DefaultStretchBendParameters {
                    row_a: row.small(0)?,
                    row_b: row.small(1)?,
                    row_c: row.small(2)?,
                    parameters: StretchBendParameters {
                        kba_ijk: row.real(3),
                        kba_kji: row.real(4),
                    },
                });
            }
            Section::OutOfPlaneBending => {
                let key = OutOfPlaneKey::try_new(
                    row.small(0)?,
                    row.small(1)?,
                    row.small(2)?,
                    row.small(3)?,
                )
                .ok_or(KEY_OUT_OF_RANGE)?;
                self.table
                    .insert_out_of_plane_bending(key, OutOfPlaneBendingParameters { koop: row.real(4) });
            }
            Section::Torsion => {
                let key = TorsionKey::try_new(
                    row.small(0)?,
                    row.small(1)?,
                    row.small(2)?,
                    row.small(3)?,
                    row.small(4)?,
                )
                .ok_or(KEY_OUT_OF_RANGE)?;
                self.table.insert_torsion(
                    key,
                    TorsionParameters {
                        v1: row.real(5),
                        v2: row.real(6),
                        v3: row.real(7),
                    },
                );
            }
            Section::VanDerWaals => {
                let type_number = row.atom_type(0)?;
                self.table.insert_van_der_waals(
                    type_number,
                    VanDerWaalsParameters {
                        alpha: row.real(1),
                        n: row.real(2),
                        a: row.real(3),
                        g: row.real(4),
                        da: DonorAcceptor::from_flag(row.text(5)),
                    },
                );
            }
            Section::Charge => {
                self.table.push_charge(ChargeParameters {
                    bond_type: row.small(0)?,
                    type_a: row.small(1)?,
                    type_b: row.small(2)?,
                    bci: row.real(3),
                });
            }
            Section::PartialCharge => {
                let type_number = row.atom_type(1)?;
                self.table.insert_partial_charge(
                    type_number,
                    PartialChargeParameters {
                        pbci: row.real(2),
                        fcadj: row.real(3),
                    },
                );
            }
        }
        Ok(())
    }

    fn finish(self) -> ParameterTable {
        let stats = self.table.stats();
        info!(
            bond_stretch = stats.bond_stretch,
            angle_bend = stats.angle_bend,
            stretch_bend = stats.stretch_bend,
            default_stretch_bend = stats.default_stretch_bend,
            out_of_plane = stats.out_of_plane_bending,
            torsion = stats.torsion,
            van_der_waals = stats.van_der_waals,
            charge = stats.charge,
            partial_charge = stats.partial_charge,
            "Parsed MMFF parameter source ({} entries).",
            stats.total()
        );
        if self.skipped > 0 {
            debug!(
                "Skipped {} row(s) that could not be stored (stopped in section {:?}).",
                self.skipped, self.section
            );
        }
        self.table
    }
}

/// Positional view of one whitespace-split data row.
struct Row<'a>(&'a [&'a str]);

impl Row<'_> {
    fn text(&self, index: usize) -> &str {
        self.0.get(index).copied().unwrap_or("")
    }

    fn int(&self, index: usize) -> i64 {
        self.text(index).parse().unwrap_or(0)
    }

    fn real(&self, index: usize) -> f64 {
        self.text(index).parse().unwrap_or(0.0)
    }

    fn small(&self, index: usize) -> Result<u8, &'static str> {
        u8::try_from(self.int(index)).map_err(|_| "integer field out of range")
    }

    fn atom_type(&self, index: usize) -> Result<u8, &'static str> {
        let value = self.int(index);
        if (0..=i64::from(MAX_ATOM_TYPE)).contains(&value) {
            Ok(value as u8)
        } else {
            Err("atom type above the last MMFF type")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::ParamLoadError;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const ONE_ROW_PER_SECTION: &str = "\
# MMFF94 test parameters
0 1 5 4.766 1.093
$
1 1 1.508
$
0 1 1 5 0.636 110.549
$
0 1 1 5 0.206 0.136
$
0 1 0 0.150 0.150
$
1 2 1 1 0.030
$
1 1 2 2 5 0.000 0.000 0.300
$
1 1.050 2.490 3.890 1.282 -
$
0 1 5 0.0000
$
1 1 0.000 0.000
$
";

    fn read(text: &str) -> ParameterTable {
        MmffParameterFile::read_from(&mut Cursor::new(text.as_bytes())).unwrap()
    }

    #[test]
    fn section_sequence_ends_in_end() {
        let mut section = Section::FIRST;
        let mut steps = 0;
        while section != Section::End {
            section = section.next();
            steps += 1;
        }
        assert_eq!(steps, 10);
        assert_eq!(Section::End.next(), Section::End);
    }

    #[test]
    fn reads_one_row_of_every_section() {
        let table = read(ONE_ROW_PER_SECTION);

        assert_eq!(
            table.bond_stretch(0, 1, 5),
            Some(&BondStretchParameters { kb: 4.766, r0: 1.093 })
        );
        assert_eq!(
            table.angle_bend(0, 1, 1, 5),
            Some(&AngleBendParameters { ka: 0.636, theta0: 110.549 })
        );
        assert_eq!(
            table.stretch_bend(0, 1, 1, 5),
            Some(&StretchBendParameters { kba_ijk: 0.206, kba_kji: 0.136 })
        );
        assert_eq!(
            table.default_stretch_bend(0, 1, 0),
            Some(&StretchBendParameters { kba_ijk: 0.15, kba_kji: 0.15 })
        );
        assert_eq!(
            table.out_of_plane_bending(1, 2, 1, 1),
            Some(&OutOfPlaneBendingParameters { koop: 0.03 })
        );
        assert_eq!(
            table.torsion(1, 1, 2, 2, 5),
            Some(&TorsionParameters { v1: 0.0, v2: 0.0, v3: 0.3 })
        );
        let vdw = table.van_der_waals(1).unwrap();
        assert_eq!(vdw.alpha, 1.05);
        assert_eq!(vdw.g, 1.282);
        assert_eq!(vdw.da, DonorAcceptor::None);
        assert_eq!(table.charge(0, 1, 5).map(|c| c.bci), Some(0.0));
        assert_eq!(
            table.partial_charge(1),
            Some(&PartialChargeParameters { pbci: 0.0, fcadj: 0.0 })
        );
        assert_eq!(table.stats().total(), 9);
    }

    #[test]
    fn empirical_section_is_ignored() {
        let table = read(ONE_ROW_PER_SECTION);
        assert_eq!(table.empirical_bond_stretch(1, 1), None);
        assert_eq!(table.stats().bond_stretch, 1);
    }

    #[test]
    fn short_rows_are_skipped() {
        let table = read("0 1 5 4.766 1.093\n7\n\n");
        assert_eq!(table.stats().bond_stretch, 1);
        assert_eq!(table.stats().total(), 1);
    }

    #[test]
    fn unparsable_numbers_read_as_zero() {
        let table = read("0 1 5 abc\n");
        assert_eq!(
            table.bond_stretch(0, 1, 5),
            Some(&BondStretchParameters { kb: 0.0, r0: 0.0 })
        );
    }

    #[test]
    fn nonbonded_rows_above_last_type_are_skipped() {
        let text = "$\n$\n$\n$\n$\n$\n$\n100 1.0 2.0 3.0 4.0 D\n42 1.0 2.0 3.0 4.0 A\n$\n$\n0 150 0.1 0.2\n";
        let table = read(text);
        assert!(table.van_der_waals(100).is_none());
        assert_eq!(table.van_der_waals(42).map(|p| p.da), Some(DonorAcceptor::Acceptor));
        assert_eq!(table.stats().partial_charge, 0);
    }

    #[test]
    fn rows_that_would_overflow_the_key_are_skipped() {
        let table = read("0 1 200 1.0 1.0\n3 1 5 1.0 1.0\n0 1 136 1.0 1.0\n");
        assert!(table.is_empty());
    }

    #[test]
    fn torsion_rows_with_unknown_class_are_skipped() {
        let table = read("$\n$\n$\n$\n$\n$\n6 2 3 3 3 1.0 2.0 3.0\n0 2 3 3 4 1.0 2.0 3.0\n");
        assert_eq!(table.stats().torsion, 1);
        assert!(table.torsion(0, 2, 3, 3, 4).is_some());
    }

    #[test]
    fn reading_stops_at_end_section() {
        let mut text = String::from(ONE_ROW_PER_SECTION);
        text.push_str("0 1 1 9.9 9.9\n");
        let table = read(&text);
        assert_eq!(table.stats().total(), 9);
    }

    #[test]
    fn missing_end_marker_is_accepted() {
        let table = read("0 1 5 4.766 1.093\n$\n$\n0 1 1 5 0.636 110.549");
        assert_eq!(table.stats().bond_stretch, 1);
        assert_eq!(table.stats().angle_bend, 1);
    }

    #[test]
    fn last_row_wins_on_colliding_keys() {
        let table = read("0 1 5 1.0 1.0\n0 5 1 2.0 2.0\n");
        assert_eq!(
            table.bond_stretch(0, 1, 5),
            Some(&BondStretchParameters { kb: 2.0, r0: 2.0 })
        );
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("MMFF94.prm");
        fs::write(&path, ONE_ROW_PER_SECTION).unwrap();

        let table = MmffParameterFile::read_from_path(&path).unwrap();
        assert_eq!(table.stats().total(), 9);
    }

    #[test]
    fn read_from_path_reports_unopenable_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.prm");

        let result = MmffParameterFile::read_from_path(&path);
        match result {
            Err(ParamLoadError::Io { path: reported, .. }) => {
                assert!(reported.ends_with("missing.prm"));
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
