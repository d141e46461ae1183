//! Numerical utilities.

pub mod integrate;
