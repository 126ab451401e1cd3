//! Equal-size subnet splitting.

use crate::error::{CalcError, Result};
use crate::models::{block_size, Network, MAX_LENGTH};
use serde::Serialize;
use std::net::Ipv4Addr;
use std::ops::Range;

/// Every block produced by splitting a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitPlan {
    pub network: Network,
    /// Requested subnets, ascending.
    pub subnets: Vec<Network>,
    /// Trailing blocks left over when the count is not a power of two.
    pub reserved: Vec<Network>,
}

/// Extra prefix bits needed for `count` subnets, i.e. `ceil(log2(count))`.
pub fn additional_bits(count: u64) -> u32 {
    match count {
        0 | 1 => 0,
        _ => 64 - (count - 1).leading_zeros(),
    }
}

/// Prefix of the equal blocks `count` subnets of `network` need.
fn split_prefix(network: Network, count: u64) -> Result<u8> {
    if count < 2 {
        return Err(CalcError::InvalidCount { count });
    }

    let new_prefix = u32::from(network.prefix()) + additional_bits(count);
    if new_prefix > u32::from(MAX_LENGTH) {
        return Err(CalcError::PrefixOverflow {
            network,
            requested: count,
            max: block_size(network.prefix()),
        });
    }
    log::debug!("split {network} into {count} x /{new_prefix}");
    Ok(new_prefix as u8)
}

/// Blocks `range` of `network` cut into /`prefix` pieces.
fn blocks(network: Network, prefix: u8, range: Range<u64>) -> Result<Vec<Network>> {
    let size = block_size(prefix);
    let start = u64::from(u32::from(network.base()));
    // range ends inside network, so every start fits in u32
    range
        .map(|i| Network::new(Ipv4Addr::from((start + i * size) as u32), prefix))
        .collect()
}

/// Split `network` into `2^ceil(log2(count))` equal blocks.
///
/// The first `count` are the requested subnets, the rest are reserved.
pub fn plan_split(network: Network, count: u64) -> Result<SplitPlan> {
    let prefix = split_prefix(network, count)?;
    let total = 1u64 << (prefix - network.prefix());
    Ok(SplitPlan {
        network,
        subnets: blocks(network, prefix, 0..count)?,
        reserved: blocks(network, prefix, count..total)?,
    })
}

/// Split `network` into exactly `count` equal, contiguous subnets.
///
/// Unlike [`plan_split`] the reserved tail is never built.
pub fn split(network: Network, count: u64) -> Result<Vec<Network>> {
    let prefix = split_prefix(network, count)?;
    blocks(network, prefix, 0..count)
}
