//! Gap finding inside a network.
//!
//! Identifies unused address ranges between allocated subnets and expresses
//! them as the largest aligned CIDR blocks.

use crate::models::{lo_mask, Network, MAX_LENGTH};
use std::net::Ipv4Addr;

/// List the blocks of `base` that none of `used` cover, ascending.
///
/// Networks in `used` outside `base` are ignored; overlapping entries are
/// allowed.
pub fn free_blocks(base: Network, used: &[Network]) -> Vec<Network> {
    let mut inside: Vec<&Network> = used
        .iter()
        .filter(|n| base.contains_network(n))
        .collect();
    inside.sort();

    let base_end = u64::from(u32::from(base.hi())) + 1;
    let mut next_ip = u64::from(u32::from(base.lo()));
    let mut gaps = Vec::new();

    for n in inside {
        let lo = u64::from(u32::from(n.lo()));
        fill_gap(&mut gaps, next_ip, lo, base.prefix());
        next_ip = next_ip.max(u64::from(u32::from(n.hi())) + 1);
    }
    fill_gap(&mut gaps, next_ip, base_end, base.prefix());

    log::trace!("free_blocks({base}) found {} gap(s)", gaps.len());
    gaps
}

/// Cover `[start, end)` with the biggest aligned blocks, left to right.
fn fill_gap(gaps: &mut Vec<Network>, mut start: u64, end: u64, min_mask: u8) {
    while start < end {
        let next_mask = find_biggest_subnet(start, min_mask, end);
        // start < end <= 2^32, so start fits in u32
        let gap = Network::from_block(Ipv4Addr::from(start as u32), next_mask);
        gaps.push(gap);
        start += gap.size();
    }
}

/// Find the biggest subnet starting at `start_ip` that ends before `below`.
///
/// The returned mask is constrained by:
/// 1. The `start_mask` parameter (won't return a smaller mask)
/// 2. The IP alignment - `start_ip` must be a valid network address for the mask
/// 3. The subnet must end at or before `below` (exclusive)
fn find_biggest_subnet(start_ip: u64, start_mask: u8, below: u64) -> u8 {
    assert!(
        start_ip < below && below <= 1u64 << MAX_LENGTH,
        "start_ip[{start_ip}] must be below [{below}]"
    );

    let min_mask_for_alignment = lo_mask(Ipv4Addr::from(start_ip as u32));
    let mut next_mask = start_mask.max(min_mask_for_alignment);

    while start_ip + (1u64 << (MAX_LENGTH - next_mask)) > below {
        next_mask += 1;
    }

    assert!(
        next_mask <= MAX_LENGTH,
        "next_mask[{next_mask}] > 32 should never happen."
    );
    next_mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Network {
        s.parse().unwrap()
    }

    fn ip(s: &str) -> u64 {
        u64::from(u32::from(s.parse::<Ipv4Addr>().unwrap()))
    }

    #[test]
    fn test_find_biggest_subnet() {
        let below = ip("10.0.1.0");
        assert_eq!(24, find_biggest_subnet(ip("10.0.0.0"), 8, below));
        assert_eq!(28, find_biggest_subnet(ip("10.0.0.0"), 28, below));

        // 10.11.12.16 has 4 trailing zeros, so the alignment limits it to /28
        assert_eq!(28, find_biggest_subnet(ip("10.11.12.16"), 8, ip("10.11.16.0")));
        assert_eq!(22, find_biggest_subnet(ip("10.11.12.0"), 8, ip("10.11.16.0")));

        assert_eq!(13, find_biggest_subnet(ip("10.0.0.0"), 8, ip("10.11.16.0")));
        assert_eq!(9, find_biggest_subnet(ip("10.0.0.0"), 8, ip("10.192.0.0")));
        assert_eq!(12, find_biggest_subnet(ip("10.0.0.0"), 12, ip("10.192.0.0")));

        assert_eq!(0, find_biggest_subnet(0, 0, 1u64 << 32));
    }

    #[test]
    fn test_find_biggest_subnet_alignment() {
        // 10.6.2.80 ends in 0101_0000, so it can be /28 at most
        let mask = find_biggest_subnet(ip("10.6.2.80"), 16, ip("10.6.8.0"));
        assert_eq!(28, mask);
    }

    #[test]
    fn test_free_blocks_after_allocation() {
        let base = net("10.0.0.0/24");
        let used = [net("10.0.0.0/26"), net("10.0.0.64/27"), net("10.0.0.96/28")];
        let gaps = free_blocks(base, &used);
        assert_eq!(gaps, vec![net("10.0.0.112/28"), net("10.0.0.128/25")]);
    }

    #[test]
    fn test_free_blocks_middle_gap() {
        let base = net("192.168.0.0/22");
        let used = [net("192.168.3.0/24"), net("192.168.0.0/24")];
        let gaps = free_blocks(base, &used);
        assert_eq!(gaps, vec![net("192.168.1.0/24"), net("192.168.2.0/24")]);
    }

    #[test]
    fn test_free_blocks_edges() {
        let base = net("10.0.0.0/24");
        assert_eq!(free_blocks(base, &[]), vec![base]);
        assert!(free_blocks(base, &[base]).is_empty());
        // outside networks are ignored, overlapping ones merge
        let used = [net("10.0.0.0/25"), net("10.0.0.0/26"), net("11.0.0.0/8")];
        assert_eq!(free_blocks(base, &used), vec![net("10.0.0.128/25")]);

        let all = net("0.0.0.0/0");
        let gaps = free_blocks(all, &[net("255.255.255.255/32")]);
        assert_eq!(gaps.first(), Some(&net("0.0.0.0/1")));
        assert_eq!(gaps.last(), Some(&net("255.255.255.254/32")));
        assert_eq!(gaps.len(), 32);
    }
}
