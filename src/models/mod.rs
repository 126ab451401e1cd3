//! Domain models for subnet calculations.
//!
//! This module contains the value types and primitive operations used by
//! every calculation:
//! - [`parse_address`] and friends for dotted-decimal addresses
//! - [`Mask`] and the mask parser
//! - [`Network`] and the subnet arithmetic on it
//! - [`AddressClass`] legacy classifier

mod address;
mod class;
mod mask;
mod network;

// Re-export public types
pub use address::{format_address, parse_address, to_binary, to_hex};
pub use class::{classify, AddressClass};
pub use mask::{
    count_leading_ones, get_cidr_mask, get_wildcard, parse_prefix_or_mask, Mask, MAX_LENGTH,
};
pub use network::{
    block_size, broadcast_addr, cut_addr, derive_network, lo_mask, usable_hosts, HostRange,
    Network,
};
