//! Physical components of the polar cap absorption model
//!
//! Each stage of the calculation is a component with an associated parameter
//! struct:
//!
//! - `geometry`: solar declination, zenith angle and Earth-shadow height
//! - `deposition`: proton energy degradation through the altitude slabs
//! - `ionization`: channel-summed ionization rate
//! - `recombination`: effective recombination regimes and electron density
//! - `absorption`: magnetoionic absorption coefficient and its altitude integral
//!
//! # Parameters
//!
//! Parameter structs live in the `parameters` module. Their defaults are the
//! published empirical constants of the model.

pub mod absorption;
pub mod deposition;
pub mod geometry;
pub mod ionization;
pub mod parameters;
pub mod recombination;
