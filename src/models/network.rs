//! IPv4 networks in CIDR notation and the subnet arithmetic on them.
//!
//! Provides [`Network`] (a base address with its prefix length) along with
//! the helper functions for network, broadcast and host range calculations.

use super::address::parse_address;
use super::mask::{get_cidr_mask, parse_prefix_or_mask, MAX_LENGTH};
use crate::error::{CalcError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// Number of usable host addresses for a prefix length.
///
/// /31 is a point-to-point link with both addresses usable, /32 a single
/// host route; anything shorter loses the network and broadcast address.
pub fn usable_hosts(len: u8) -> u64 {
    match len {
        32 => 1,
        31 => 2,
        _ => block_size(len) - 2,
    }
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
///
/// This is the shortest prefix for which `ip` is still a network address.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros() as u8;
    MAX_LENGTH - trailing_zeros.min(MAX_LENGTH)
}

/// Usable address range of a network together with its host counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct HostRange {
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
    /// All addresses in the block, including network and broadcast.
    pub total: u64,
    pub usable: u64,
}

/// IPv4 network: base address with host bits zeroed plus prefix length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    base: Ipv4Addr,
    prefix: u8,
}

/// Derive the network that contains `addr` at prefix length `prefix`.
pub fn derive_network(addr: Ipv4Addr, prefix: u8) -> Result<Network> {
    Network::new(addr, prefix)
}

impl Network {
    /// Create the network containing `addr`; host bits are cleared.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Network> {
        Ok(Network {
            base: cut_addr(addr, prefix)?,
            prefix,
        })
    }

    /// Network for a block whose prefix is already known to be at most 32.
    pub(crate) fn from_block(addr: Ipv4Addr, prefix: u8) -> Network {
        debug_assert!(prefix <= MAX_LENGTH, "prefix /{prefix} out of range");
        let prefix = prefix.min(MAX_LENGTH);
        let mask = (u32::MAX as u64 >> (MAX_LENGTH - prefix) << (MAX_LENGTH - prefix)) as u32;
        Network {
            base: Ipv4Addr::from(u32::from(addr) & mask),
            prefix,
        }
    }

    /// Parse `A.B.C.D/P` and reject it if host bits are set.
    pub fn parse_exact(text: &str) -> Result<Network> {
        let (addr, prefix) = split_cidr(text)?;
        let network = Network::new(addr, prefix)?;
        if network.base != addr {
            return Err(CalcError::invalid_network(
                text,
                format!("host bits set, network address is {}", network.base),
            ));
        }
        Ok(network)
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Mask bits for this prefix.
    pub fn mask(&self) -> u32 {
        // prefix is validated on construction
        get_cidr_mask(self.prefix).unwrap_or(u32::MAX)
    }

    pub fn mask_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask())
    }

    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.mask())
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        self.base
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !self.mask())
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.hi()
    }

    /// Number of addresses in this network.
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    /// First/last usable host and host counts, with the /31 and /32 rules.
    pub fn host_range(&self) -> HostRange {
        let (first, last) = if self.prefix >= 31 {
            (self.lo(), self.hi())
        } else {
            (
                Ipv4Addr::from(u32::from(self.lo()) + 1),
                Ipv4Addr::from(u32::from(self.hi()) - 1),
            )
        };
        HostRange {
            first,
            last,
            total: self.size(),
            usable: usable_hosts(self.prefix),
        }
    }

    /// Check if an IP address is contained within this network.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask() == u32::from(self.base)
    }

    /// Check if `other` lies completely within this network.
    pub fn contains_network(&self, other: &Network) -> bool {
        other.prefix >= self.prefix && self.contains(other.base)
    }

    pub fn overlaps(&self, other: &Network) -> bool {
        self.contains_network(other) || other.contains_network(self)
    }

    /// The adjacent network of the same size, `None` past 255.255.255.255.
    pub fn next(&self) -> Option<Network> {
        let next = u64::from(u32::from(self.base)) + self.size();
        let next = u32::try_from(next).ok()?;
        Some(Network {
            base: Ipv4Addr::from(next),
            prefix: self.prefix,
        })
    }
}

fn split_cidr(text: &str) -> Result<(Ipv4Addr, u8)> {
    let (addr, prefix) = text
        .split_once('/')
        .ok_or_else(|| CalcError::invalid_network(text, "expected A.B.C.D/P"))?;
    let addr = parse_address(addr).map_err(|e| CalcError::invalid_network(text, e.to_string()))?;
    let mask = parse_prefix_or_mask(&format!("/{prefix}"))
        .map_err(|e| CalcError::invalid_network(text, e.to_string()))?;
    Ok((addr, mask.prefix))
}

impl FromStr for Network {
    type Err = CalcError;

    /// Parse `A.B.C.D/P`; host bits are cleared like [`derive_network`].
    fn from_str(s: &str) -> Result<Network> {
        let (addr, prefix) = split_cidr(s)?;
        let network = Network::new(addr, prefix)?;
        if network.base != addr {
            log::debug!("{s}: host bits cleared, using {network}");
        }
        Ok(network)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::from_str(&s).map_err(de::Error::custom)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}
