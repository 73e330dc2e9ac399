// astrars-beamline/src/lib.rs

//! Typed beam-setup field models for ASTRA input decks.
//!
//! Each configuration entity the external binary reads is a typed struct
//! with a static table of unit-tagged field descriptors: [`GeneratorInput`]
//! (&INPUT), [`RunSpecs`] (&NEWRUN), [`OutputSpecs`] (&OUTPUT),
//! [`SpaceCharge`] (&CHARGE), and the indexed beamline modules [`Cavity`],
//! [`Solenoid`] and [`Quadrupole`]. Models resolve from raw request maps
//! (accepting either internal keywords or public aliases, with defaults)
//! and render as a direct fold over their field tables.
//!
//! [`SimulationInput`] is the composite document: it orders each module
//! kind by longitudinal position, assigns instance ids, and renders the
//! full deck in the fixed group order the binary expects.

pub mod composite;
pub mod enums;
pub mod generator;
pub mod modules;
pub mod output;
pub mod run;
pub mod space_charge;

pub use composite::SimulationInput;
pub use enums::{Distribution, ParticleType};
pub use generator::GeneratorInput;
pub use modules::{BeamlineModule, Cavity, Indexed, Quadrupole, Solenoid};
pub use output::OutputSpecs;
pub use run::{DistributionPaths, RunSpecs};
pub use space_charge::SpaceCharge;
