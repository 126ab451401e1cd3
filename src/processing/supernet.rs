//! Route aggregation (supernetting).

use super::gap_finder::free_blocks;
use crate::error::{CalcError, Result};
use crate::models::{get_cidr_mask, Network};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Aggregated route plus the addresses it covers that no input does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supernet {
    pub supernet: Network,
    pub networks: Vec<Network>,
    /// Blocks inside the supernet that none of the inputs cover.
    pub uncovered: Vec<Network>,
}

/// Longest common prefix of two addresses.
pub fn common_prefix(a: Ipv4Addr, b: Ipv4Addr) -> u8 {
    (u32::from(a) ^ u32::from(b)).leading_zeros() as u8
}

/// Aggregate `networks` into the longest prefix that contains them all.
///
/// The candidate comes from the first and last entry in input order, capped
/// at the shortest input prefix so whole ranges are covered; every entry is
/// then checked against it.
pub fn aggregate(networks: &[Network]) -> Result<Network> {
    let (first, last) = match networks {
        [first, .., last] => (first, last),
        _ => {
            return Err(CalcError::invalid_network(
                &networks
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
                "at least 2 networks are required",
            ))
        }
    };

    let shortest = networks.iter().map(|n| n.prefix()).min().unwrap_or(0);
    let prefix = common_prefix(first.base(), last.base()).min(shortest);
    let supernet = Network::new(first.base(), prefix)?;
    log::debug!("aggregate candidate {supernet} from {first} .. {last}");

    let supernet_mask = get_cidr_mask(prefix)?;
    for n in networks {
        if u32::from(n.base()) & supernet_mask != u32::from(supernet.base()) {
            return Err(CalcError::NotAggregatable {
                network: *n,
                supernet,
            });
        }
    }
    Ok(supernet)
}

/// Parse `A.B.C.D/P` entries and aggregate them.
///
/// Entries with host bits set are malformed here.
pub fn aggregate_str<S: AsRef<str>>(networks: &[S]) -> Result<Supernet> {
    let parsed = networks
        .iter()
        .map(|s| Network::parse_exact(s.as_ref().trim()))
        .collect::<Result<Vec<_>>>()?;
    let supernet = aggregate(&parsed)?;
    Ok(Supernet {
        supernet,
        uncovered: free_blocks(supernet, &parsed),
        networks: parsed,
    })
}
