// astrars-namelist/src/lib.rs

//! Unit-tagged field models and namelist rendering for ASTRA input decks.
//!
//! ASTRA consumes a rigid, order-sensitive configuration format of the shape
//!
//! ```text
//! &INPUT
//!     IPart = 100
//!     Species = 'electrons'
//! /
//! ```
//!
//! This crate provides the pieces the domain schemas are built from:
//! - [`NmlValue`]: the scalar value kinds that can appear on the right-hand
//!   side of a namelist assignment, with their textual formatting
//! - [`FieldSpec`]: a `const` descriptor of one field (external keyword,
//!   public alias, unit tag, exclusion/computed flags) with typed lookup
//!   against a raw request map
//! - [`NamelistGroup`]: an ordered list of `key = value` entries rendered
//!   between `&NAME` and `/`
//!
//! Rendering is a direct fold over each model's static field table. The
//! codec is render-only: the system never reads its own configuration back,
//! so there is no parse path for the group format.

pub mod error;
pub mod field;
pub mod group;
pub mod value;

pub use error::{Result, SchemaError};
pub use field::{json_kind, FieldSpec, RawMap};
pub use group::{render_document, NamelistGroup};
pub use value::NmlValue;
