//! Polar cap absorption of HF radio waves
//!
//! Estimates how strongly high-frequency radio waves are attenuated over the
//! polar cap during solar proton events. Each daily flux observation of ten
//! proton energy channels is turned into:
//!
//! 1. an ionization rate profile, by degrading one representative proton per
//!    channel through the atmosphere from 115 km down to 20 km
//! 2. an equilibrium electron density profile, using empirical day, night and
//!    high-altitude recombination coefficients
//! 3. a total absorption in dB at each configured radio frequency
//!
//! The physics lives in [`rpca_components`] and the shared types in [`rpca_core`].
//! This crate wires them together into a [`Pipeline`](pipeline::Pipeline) and
//! provides the tabular output records.
//!
//! ```rust
//! use rpca::pipeline::Pipeline;
//! use rpca_core::observation::FluxObservation;
//!
//! let pipeline = Pipeline::new();
//! let observation = FluxObservation::from_named_fluxes(
//!     355,
//!     1990,
//!     [("p1_fx", 1.0e4), ("p3_fx", 6.0e2), ("p5_fx", 0.3)],
//! );
//! let output = pipeline.run(&[observation]);
//! assert!(output.failures.is_empty());
//! assert_eq!(output.absorption_table().len(), 2);
//! ```

pub mod config;
pub mod output;
pub mod pipeline;

pub use rpca_components;
pub use rpca_core;
