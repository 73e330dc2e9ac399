// astrars-tables/src/lib.rs

//! Columnar table codecs for the file formats ASTRA reads and writes.
//!
//! Three shapes of whitespace-delimited ASCII table flow between this
//! system and the external binary:
//! - particle distributions (read and written, ten fixed columns, no
//!   header), see [`ParticleTable`]
//! - emittance tables (read only, column set depends on the axis), see
//!   [`XyEmittanceTable`] and [`ZEmittanceTable`]
//! - field-map tables for beamline modules (written only, two columns),
//!   see [`FieldTable`]
//!
//! A missing or empty output file is a valid "not yet produced" state: the
//! read paths resolve it to `None`, never an error. Malformed content, on
//! the other hand, is surfaced as a [`TableError`] rather than dropped.

pub mod emittance;
pub mod error;
pub mod field_map;
pub mod particles;

pub use emittance::{EmittanceAxis, XyEmittanceTable, ZEmittanceTable};
pub use error::{Result, TableError};
pub use field_map::FieldTable;
pub use particles::ParticleTable;
