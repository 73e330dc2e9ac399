// astrars/src/cli/mod.rs

pub mod generate;
pub mod particles;
pub mod simulate;

pub use generate::run_generator;
pub use particles::{list_distributions, read_distribution, store_distribution};
pub use simulate::run_simulation;
