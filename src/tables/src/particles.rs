// astrars-tables/src/particles.rs

//! The particle distribution codec.
//!
//! ASTRA exchanges particle sets as header-less ASCII files, one particle
//! per row, columns in the fixed order
//! `x y z px py pz clock macro_charge index status`.
//! By ASTRA's convention the first row is the reference particle; the z,
//! pz and clock entries of all later rows are offsets relative to it. The
//! codec passes that convention through untouched.

use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Column names in file order. Trailing columns are optional on read.
pub const COLUMNS: [&str; 10] = [
    "x",
    "y",
    "z",
    "px",
    "py",
    "pz",
    "clock",
    "macro_charge",
    "index",
    "status",
];

/// Number of leading columns every row must carry.
const REQUIRED_COLUMNS: usize = 6;

/// A columnar particle set.
///
/// Positions are in [m], momenta in [eV/c], clock in [ns], macro charge in
/// [nC]; `index` is the particle species index and `status` the ASTRA
/// status flag. All populated columns have equal length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleTable {
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
    #[serde(default)]
    pub z: Vec<f64>,
    #[serde(default)]
    pub px: Vec<f64>,
    #[serde(default)]
    pub py: Vec<f64>,
    #[serde(default)]
    pub pz: Vec<f64>,
    #[serde(default)]
    pub clock: Vec<f64>,
    #[serde(default)]
    pub macro_charge: Vec<f64>,
    #[serde(default)]
    pub index: Vec<i64>,
    #[serde(default)]
    pub status: Vec<i64>,
}

impl ParticleTable {
    /// Number of particles.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the table holds no particles.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn column_lengths(&self) -> [usize; 10] {
        [
            self.x.len(),
            self.y.len(),
            self.z.len(),
            self.px.len(),
            self.py.len(),
            self.pz.len(),
            self.clock.len(),
            self.macro_charge.len(),
            self.index.len(),
            self.status.len(),
        ]
    }

    /// Validate the equal-length invariant and return the number of
    /// populated columns.
    ///
    /// The six coordinate/momentum columns must all have the row count;
    /// each optional trailing column is either fully populated or absent,
    /// with no gaps (a populated column after an absent one could not be
    /// written positionally).
    pub fn populated_columns(&self) -> Result<usize> {
        let n = self.len();
        let lengths = self.column_lengths();
        let mut width = 0;
        for (column, &len) in COLUMNS.iter().zip(lengths.iter()) {
            if width < REQUIRED_COLUMNS || len == n {
                if len != n {
                    return Err(TableError::LengthMismatch(format!(
                        "column `{}` has {} entries, expected {}",
                        column, len, n
                    )));
                }
                width += 1;
            } else if len == 0 {
                break;
            } else {
                return Err(TableError::LengthMismatch(format!(
                    "column `{}` has {} entries, expected {}",
                    column, len, n
                )));
            }
        }
        for (column, &len) in COLUMNS.iter().zip(lengths.iter()).skip(width) {
            if len != 0 {
                return Err(TableError::LengthMismatch(format!(
                    "column `{}` is populated but an earlier column is absent",
                    column
                )));
            }
        }
        Ok(width)
    }

    /// Write the table to `path`: one row per particle, space-separated,
    /// no header, full numeric precision.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let width = self.populated_columns()?;
        let mut out = String::new();
        for row in 0..self.len() {
            let mut sep = "";
            for column in 0..width {
                let token = match column {
                    0 => self.x[row].to_string(),
                    1 => self.y[row].to_string(),
                    2 => self.z[row].to_string(),
                    3 => self.px[row].to_string(),
                    4 => self.py[row].to_string(),
                    5 => self.pz[row].to_string(),
                    6 => self.clock[row].to_string(),
                    7 => self.macro_charge[row].to_string(),
                    8 => self.index[row].to_string(),
                    _ => self.status[row].to_string(),
                };
                let _ = write!(out, "{}{}", sep, token);
                sep = " ";
            }
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }

    /// Read a particle file.
    ///
    /// A missing or empty file resolves to `None`: the distribution has
    /// not been produced yet, which callers must distinguish from
    /// malformed content. Columns are assigned positionally; absent
    /// optional trailing columns are tolerated, but every row must carry
    /// the same column count as the first.
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse particle rows from text. Empty content resolves to `None`.
    pub fn parse(content: &str) -> Result<Option<Self>> {
        let mut table = ParticleTable::default();
        let mut width = None;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let expected = match width {
                None => {
                    if tokens.len() < REQUIRED_COLUMNS || tokens.len() > COLUMNS.len() {
                        return Err(TableError::MalformedParticleRow {
                            line: line_no,
                            reason: format!(
                                "expected between {} and {} columns, got {}",
                                REQUIRED_COLUMNS,
                                COLUMNS.len(),
                                tokens.len()
                            ),
                        });
                    }
                    width = Some(tokens.len());
                    tokens.len()
                }
                Some(expected) => expected,
            };
            if tokens.len() != expected {
                return Err(TableError::MalformedParticleRow {
                    line: line_no,
                    reason: format!("expected {} columns, got {}", expected, tokens.len()),
                });
            }
            table.push_row(&tokens, line_no)?;
        }

        if table.is_empty() {
            Ok(None)
        } else {
            Ok(Some(table))
        }
    }

    fn push_row(&mut self, tokens: &[&str], line_no: usize) -> Result<()> {
        let real = |column: usize| -> Result<f64> {
            tokens[column]
                .parse()
                .map_err(|_| TableError::MalformedParticleRow {
                    line: line_no,
                    reason: format!(
                        "non-numeric token `{}` in column `{}`",
                        tokens[column], COLUMNS[column]
                    ),
                })
        };
        let int = |column: usize| -> Result<i64> {
            tokens[column]
                .parse()
                .map_err(|_| TableError::MalformedParticleRow {
                    line: line_no,
                    reason: format!(
                        "non-integer token `{}` in column `{}`",
                        tokens[column], COLUMNS[column]
                    ),
                })
        };

        self.x.push(real(0)?);
        self.y.push(real(1)?);
        self.z.push(real(2)?);
        self.px.push(real(3)?);
        self.py.push(real(4)?);
        self.pz.push(real(5)?);
        if tokens.len() > 6 {
            self.clock.push(real(6)?);
        }
        if tokens.len() > 7 {
            self.macro_charge.push(real(7)?);
        }
        if tokens.len() > 8 {
            self.index.push(int(8)?);
        }
        if tokens.len() > 9 {
            self.status.push(int(9)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ParticleTable {
        ParticleTable {
            x: vec![0.0, 1.5e-3],
            y: vec![0.0, -2.5e-4],
            z: vec![0.0, 1e-6],
            px: vec![0.0, 12.5],
            py: vec![0.0, -7.25],
            pz: vec![2.4585e6, -153.75],
            clock: vec![0.0, 1e-4],
            macro_charge: vec![-1e-4, -1e-4],
            index: vec![1, 1],
            status: vec![5, 5],
        }
    }

    #[test]
    fn roundtrip_preserves_every_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("particles.ini");

        let table = sample();
        table.write_to(&path).unwrap();
        let restored = ParticleTable::read_from(&path).unwrap().unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn reads_an_astra_formatted_row() {
        let line = "  0.0000E+00  0.0000E+00  0.0000E+00  0.0000E+00  0.0000E+00  2.4585E+06  0.0000E+00 -1.0000E-04   1   5\n";
        let table = ParticleTable::parse(line).unwrap().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.pz[0], 2.4585e6);
        assert_eq!(table.macro_charge[0], -1e-4);
        assert_eq!(table.index[0], 1);
        assert_eq!(table.status[0], 5);
    }

    #[test]
    fn missing_file_resolves_to_no_table() {
        let dir = TempDir::new().unwrap();
        let result = ParticleTable::read_from(&dir.path().join("absent.ini")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_file_resolves_to_no_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.ini");
        fs::write(&path, "").unwrap();
        assert!(ParticleTable::read_from(&path).unwrap().is_none());

        fs::write(&path, "\n  \n").unwrap();
        assert!(ParticleTable::read_from(&path).unwrap().is_none());
    }

    #[test]
    fn absent_trailing_columns_are_tolerated() {
        let table = ParticleTable::parse("0.0 0.0 0.0 0.0 0.0 2.4e6\n")
            .unwrap()
            .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.clock.is_empty());
        assert!(table.status.is_empty());
    }

    #[test]
    fn wrong_column_count_is_surfaced() {
        let err = ParticleTable::parse("0.0 0.0 0.0 0.0 0.0 2.4e6\n0.0 0.0\n").unwrap_err();
        match err {
            TableError::MalformedParticleRow { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn non_numeric_token_is_surfaced() {
        let err = ParticleTable::parse("0.0 0.0 zero 0.0 0.0 2.4e6\n").unwrap_err();
        match err {
            TableError::MalformedParticleRow { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("`z`"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn gap_in_populated_columns_is_rejected() {
        let mut table = sample();
        table.index.clear();
        assert!(matches!(
            table.populated_columns(),
            Err(TableError::LengthMismatch(_))
        ));
    }
}
