//! Component parameters
//!
//! Every parameter struct deserializes with `#[serde(default)]`, so a partial
//! configuration only overrides the fields it names.

mod absorption;
mod deposition;
mod geometry;
mod recombination;

pub use absorption::{AbsorptionParameters, GyrofrequencyModel};
pub use deposition::DepositionParameters;
pub use geometry::GeometryParameters;
pub use recombination::RecombinationParameters;
