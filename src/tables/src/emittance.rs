// astrars-tables/src/emittance.rs

//! Read-only codec for ASTRA emittance output tables.
//!
//! ASTRA writes one emittance file per axis, `run.Xemit.<run>`,
//! `run.Yemit.<run>` and `run.Zemit.<run>`, with the run number
//! zero-padded to three digits. The transverse files share one column set;
//! the longitudinal file carries energy columns instead. Both are consumed
//! as pass-through structured output.

use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// The axis an emittance file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmittanceAxis {
    X,
    Y,
    Z,
}

impl EmittanceAxis {
    /// File name of this axis' emittance table for a given run number.
    pub fn output_file_name(&self, run_number: u32) -> String {
        format!("run.{}emit.{:03}", self, run_number)
    }
}

impl fmt::Display for EmittanceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmittanceAxis::X => write!(f, "X"),
            EmittanceAxis::Y => write!(f, "Y"),
            EmittanceAxis::Z => write!(f, "Z"),
        }
    }
}

/// Transverse (x or y) emittance table.
///
/// Columns: z [m], t [ns], mean position [mm], rms position [mm], rms
/// angle [mrad], normalized emittance [pi*mrad*mm], correlation [mrad].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XyEmittanceTable {
    pub z: Vec<f64>,
    pub t: Vec<f64>,
    pub mean: Vec<f64>,
    pub position_rms: Vec<f64>,
    pub angle_rms: Vec<f64>,
    pub emittance: Vec<f64>,
    pub correlation: Vec<f64>,
}

impl XyEmittanceTable {
    /// Read a transverse emittance file; absent or empty resolves to `None`.
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        let columns = match read_columns::<7>(path)? {
            Some(columns) => columns,
            None => return Ok(None),
        };
        let [z, t, mean, position_rms, angle_rms, emittance, correlation] = columns;
        Ok(Some(Self {
            z,
            t,
            mean,
            position_rms,
            angle_rms,
            emittance,
            correlation,
        }))
    }
}

/// Longitudinal emittance table.
///
/// Columns: z [m], t [ns], mean kinetic energy [MeV], rms position [mm],
/// rms energy spread [keV], normalized emittance [pi*keV*mm],
/// correlation [keV].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZEmittanceTable {
    pub z: Vec<f64>,
    pub t: Vec<f64>,
    pub e_kin: Vec<f64>,
    pub position_rms: Vec<f64>,
    pub delta_e_rms: Vec<f64>,
    pub emittance: Vec<f64>,
    pub correlation: Vec<f64>,
}

impl ZEmittanceTable {
    /// Read a longitudinal emittance file; absent or empty resolves to `None`.
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        let columns = match read_columns::<7>(path)? {
            Some(columns) => columns,
            None => return Ok(None),
        };
        let [z, t, e_kin, position_rms, delta_e_rms, emittance, correlation] = columns;
        Ok(Some(Self {
            z,
            t,
            e_kin,
            position_rms,
            delta_e_rms,
            emittance,
            correlation,
        }))
    }
}

/// Split a whitespace-delimited numeric file into `N` positional columns.
fn read_columns<const N: usize>(path: &Path) -> Result<Option<[Vec<f64>; N]>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let mut columns: [Vec<f64>; N] = std::array::from_fn(|_| Vec::new());
    let mut any = false;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != N {
            return Err(TableError::MalformedEmittanceRow {
                line: line_no,
                reason: format!("expected {} columns, got {}", N, tokens.len()),
            });
        }
        for (column, token) in columns.iter_mut().zip(tokens.iter()) {
            let value = token
                .parse()
                .map_err(|_| TableError::MalformedEmittanceRow {
                    line: line_no,
                    reason: format!("non-numeric token `{}`", token),
                })?;
            column.push(value);
        }
        any = true;
    }

    if any {
        Ok(Some(columns))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn axis_file_names_carry_the_run_number() {
        assert_eq!(EmittanceAxis::X.output_file_name(1), "run.Xemit.001");
        assert_eq!(EmittanceAxis::Z.output_file_name(12), "run.Zemit.012");
    }

    #[test]
    fn z_variant_rows_map_columns_positionally() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.Zemit.001");
        fs::write(
            &path,
            "0.0 0.0 0.511 0.3 1.2 0.05 -0.4\n0.5 1.7 1.233 0.4 1.5 0.07 -0.2\n",
        )
        .unwrap();

        let table = ZEmittanceTable::read_from(&path).unwrap().unwrap();
        assert_eq!(table.z, vec![0.0, 0.5]);
        assert_eq!(table.e_kin, vec![0.511, 1.233]);
        assert_eq!(table.correlation, vec![-0.4, -0.2]);
    }

    #[test]
    fn absent_file_resolves_to_no_table() {
        let dir = TempDir::new().unwrap();
        assert!(XyEmittanceTable::read_from(&dir.path().join("run.Xemit.001"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn short_row_is_surfaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.Yemit.001");
        fs::write(&path, "0.0 0.0 0.1\n").unwrap();
        assert!(matches!(
            XyEmittanceTable::read_from(&path),
            Err(TableError::MalformedEmittanceRow { line: 1, .. })
        ));
    }
}
