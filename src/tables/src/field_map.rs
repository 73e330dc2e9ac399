// astrars-tables/src/field_map.rs

//! Field-map tables for beamline modules.
//!
//! Cavities and solenoids reference an on-axis field profile by file name;
//! the file holds two space-separated columns, longitudinal position z [m]
//! and field amplitude v in free units, no header.

use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// An on-axis field profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTable {
    /// Longitudinal positions along the z-axis [m].
    pub z: Vec<f64>,
    /// Field values at the z positions, free units.
    pub v: Vec<f64>,
}

impl FieldTable {
    /// Create a field table, enforcing the equal-length invariant.
    pub fn new(z: Vec<f64>, v: Vec<f64>) -> Result<Self> {
        if z.len() != v.len() {
            return Err(TableError::LengthMismatch(format!(
                "column `z` has {} entries, column `v` has {}",
                z.len(),
                v.len()
            )));
        }
        Ok(Self { z, v })
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Check if the profile has no sample points.
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Write the profile to `path` as two space-separated columns.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for (z, v) in self.z.iter().zip(self.v.iter()) {
            let _ = writeln!(out, "{} {}", z, v);
        }
        fs::write(path, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_two_columns_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("C1_E.dat");

        let table = FieldTable::new(vec![0.0, 0.1, 0.2], vec![0.0, 1.0, 0.0]).unwrap();
        table.write_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0 0\n0.1 1\n0.2 0\n");
    }

    #[test]
    fn unequal_columns_are_rejected() {
        assert!(matches!(
            FieldTable::new(vec![0.0], vec![]),
            Err(TableError::LengthMismatch(_))
        ));
    }
}
