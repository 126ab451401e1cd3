//! IPv4 subnet calculator.
//!
//! - [`models`] - addresses, masks, networks and address classes
//! - [`processing`] - network reports, VLSM, equal splits and supernets
//! - [`output`] - text, CSV and JSON rendering
//! - [`batch`] - JSON request files

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{CalcError, Result};
pub use models::{AddressClass, Mask, Network};
pub use processing::{
    aggregate, aggregate_str, allocate, allocate_partial, calculate, calculate_input, plan_split,
    run, split, Report, Request,
};
