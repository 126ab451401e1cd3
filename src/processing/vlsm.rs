//! Variable-length subnet mask allocation.
//!
//! Requirements are packed largest first from the start of the base
//! network; every block is aligned because block sizes never grow.

use super::gap_finder::free_blocks;
use crate::error::{CalcError, Result};
use crate::models::{block_size, usable_hosts, HostRange, Network, MAX_LENGTH};
use itertools::Itertools;
use serde::Serialize;
use std::net::Ipv4Addr;

/// One allocated subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlsmEntry {
    /// Position of the requirement in the caller's list.
    pub index: usize,
    /// Hosts requested.
    pub required: u64,
    pub network: Network,
    pub hosts: HostRange,
}

/// Result of a complete VLSM run, in allocation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetAllocation {
    pub base: Network,
    pub entries: Vec<VlsmEntry>,
    /// Space of `base` left after allocation.
    pub free: Vec<Network>,
}

/// Result of a partial VLSM run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialAllocation {
    pub allocation: SubnetAllocation,
    /// First requirement that did not fit, with its input position.
    pub unallocated: Option<(usize, u64)>,
}

impl SubnetAllocation {
    /// Addresses handed out, network and broadcast included.
    pub fn allocated_addresses(&self) -> u64 {
        self.entries.iter().map(|e| e.hosts.total).sum()
    }

    pub fn remaining_addresses(&self) -> u64 {
        self.base.size() - self.allocated_addresses()
    }

    /// Requested hosts as a fraction of usable hosts handed out.
    pub fn utilisation(&self) -> f64 {
        let usable: u64 = self.entries.iter().map(|e| e.hosts.usable).sum();
        if usable == 0 {
            return 0.0;
        }
        let required: u64 = self.entries.iter().map(|e| e.required).sum();
        required as f64 / usable as f64
    }
}

/// Smallest prefix whose block holds `hosts` plus network and broadcast.
///
/// `None` when even a /0 is too small.
pub fn required_prefix(hosts: u64) -> Option<u8> {
    let needed = hosts.checked_add(2)?;
    (0..=MAX_LENGTH).rev().find(|&p| block_size(p) >= needed)
}

fn validate(requirements: &[i64]) -> Result<Vec<(usize, u64)>> {
    requirements
        .iter()
        .enumerate()
        .map(|(index, &hosts)| {
            if hosts <= 0 {
                Err(CalcError::InvalidRequirement { index, hosts })
            } else {
                Ok((index, hosts as u64))
            }
        })
        .collect()
}

/// Requirement that stopped packing: input position, hosts and the reason.
type Stopped = Option<(usize, u64, CalcError)>;

fn pack(base: Network, requirements: &[i64]) -> Result<(Vec<VlsmEntry>, Stopped)> {
    let sorted = validate(requirements)?
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .collect::<Vec<_>>();
    log::debug!(
        "#Start vlsm pack in {base}, requirements sorted {:?}",
        sorted.iter().map(|r| r.1).collect::<Vec<_>>()
    );

    let mut cursor = u64::from(u32::from(base.base()));
    // one past the broadcast address, up to 2^32 for a /0
    let base_end = cursor + base.size();
    let mut entries = Vec::with_capacity(sorted.len());

    for (index, hosts) in sorted {
        let prefix = match required_prefix(hosts) {
            Some(p) => p,
            None => {
                let err = CalcError::PrefixOverflow {
                    network: base,
                    requested: hosts,
                    max: usable_hosts(0),
                };
                return Ok((entries, Some((index, hosts, err))));
            }
        };
        let size = block_size(prefix);
        let start = match u32::try_from(cursor) {
            Ok(start) if prefix >= base.prefix() && cursor + size <= base_end => start,
            _ => {
                log::debug!("{hosts} hosts (/{prefix}) do not fit at {cursor:#x} in {base}");
                let err = CalcError::InsufficientSpace {
                    base,
                    hosts,
                    prefix,
                    start: start_label(cursor),
                };
                return Ok((entries, Some((index, hosts, err))));
            }
        };

        let network = Network::new(Ipv4Addr::from(start), prefix)?;
        log::trace!("allocated {network} for {hosts} hosts");
        entries.push(VlsmEntry {
            index,
            required: hosts,
            network,
            hosts: network.host_range(),
        });
        cursor += size;
    }
    Ok((entries, None))
}

fn start_label(cursor: u64) -> String {
    match u32::try_from(cursor) {
        Ok(addr) => Ipv4Addr::from(addr).to_string(),
        Err(_) => "the end of the address space".to_string(),
    }
}

fn finish(base: Network, entries: Vec<VlsmEntry>) -> SubnetAllocation {
    let used: Vec<Network> = entries.iter().map(|e| e.network).collect();
    SubnetAllocation {
        base,
        free: free_blocks(base, &used),
        entries,
    }
}

/// Allocate subnets for every host requirement inside `base`.
///
/// Fails without a partial result if any requirement does not fit.
pub fn allocate(base: Network, requirements: &[i64]) -> Result<SubnetAllocation> {
    match pack(base, requirements)? {
        (_, Some((_, _, err))) => Err(err),
        (entries, None) => Ok(finish(base, entries)),
    }
}

/// Allocate until the first requirement that does not fit.
pub fn allocate_partial(base: Network, requirements: &[i64]) -> Result<PartialAllocation> {
    let (entries, stopped) = pack(base, requirements)?;
    if let Some((index, hosts, err)) = &stopped {
        log::warn!("VLSM stopped at requirement #{index} ({hosts} hosts): {err}");
    }
    Ok(PartialAllocation {
        allocation: finish(base, entries),
        unallocated: stopped.map(|(index, hosts, _)| (index, hosts)),
    })
}
