//! Core types for polar cap absorption modelling
//!
//! This crate holds everything the physical components share:
//!
//! - [`atmosphere`]: the fixed altitude grid and the neutral-atmosphere reference table
//! - [`channels`]: the ten proton energy channels and their flux field names
//! - [`observation`]: the per-time-step flux input contract
//! - [`profile`]: containers for values on the altitude grid
//! - [`errors`]: the shared error type
//! - [`utils`]: numerical helpers

pub mod atmosphere;
pub mod channels;
pub mod errors;
pub mod observation;
pub mod profile;
pub mod types;
pub mod utils;
