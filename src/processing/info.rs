//! Single network report: everything derived from one address and mask.

use crate::error::{CalcError, Result};
use crate::models::{
    classify, derive_network, parse_address, parse_prefix_or_mask, to_binary, to_hex,
    AddressClass, Mask, Network, MAX_LENGTH,
};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Role of one bit in the classful view of an address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BitKind {
    Network,
    Subnet,
    Host,
}

/// One of the 32 bits of a network address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Bit {
    pub value: u8,
    pub kind: BitKind,
}

/// The same four addresses rendered in one notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notation {
    pub address: String,
    pub mask: String,
    pub network: String,
    pub broadcast: String,
}

/// Complete calculation result for one address and mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetInfo {
    pub address: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub prefix: u8,
    pub network: Network,
    pub broadcast: Ipv4Addr,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    pub total_addresses: u64,
    pub usable_hosts: u64,
    pub wildcard: Ipv4Addr,
    pub class: AddressClass,
    pub binary: Notation,
    pub hex: Notation,
    pub bit_map: Vec<Bit>,
}

/// Bit map of the network address of `addr/prefix`.
///
/// Bits below the classful default prefix are network bits, bits below
/// `prefix` subnet bits and the rest host bits. Classes without a default
/// prefix (D, E, Invalid) have no network bits.
pub fn bit_map(addr: Ipv4Addr, prefix: u8) -> Result<Vec<Bit>> {
    let network = u32::from(derive_network(addr, prefix)?.base());
    let class_bits = classify(addr).default_prefix().unwrap_or(0);

    let bits = (0..MAX_LENGTH)
        .map(|i| {
            let kind = if i < class_bits {
                BitKind::Network
            } else if i < prefix {
                BitKind::Subnet
            } else {
                BitKind::Host
            };
            Bit {
                value: ((network >> (31 - i)) & 1) as u8,
                kind,
            }
        })
        .collect();
    Ok(bits)
}

/// Calculate the full report for an address and a parsed mask.
pub fn subnet_info(address: Ipv4Addr, mask: Mask) -> Result<SubnetInfo> {
    let network = derive_network(address, mask.prefix)?;
    let hosts = network.host_range();
    log::debug!("subnet_info({address}, /{}) -> {network}", mask.prefix);

    let notation = |f: fn(Ipv4Addr) -> String| Notation {
        address: f(address),
        mask: f(mask.addr()),
        network: f(network.base()),
        broadcast: f(network.broadcast()),
    };

    Ok(SubnetInfo {
        address,
        mask: mask.addr(),
        prefix: mask.prefix,
        network,
        broadcast: network.broadcast(),
        first_host: hosts.first,
        last_host: hosts.last,
        total_addresses: hosts.total,
        usable_hosts: hosts.usable,
        wildcard: network.wildcard(),
        class: classify(address),
        binary: notation(to_binary),
        hex: notation(to_hex),
        bit_map: bit_map(address, mask.prefix)?,
    })
}

/// Calculate from an address string and a mask string (`/P` or dotted).
pub fn calculate(address: &str, mask: &str) -> Result<SubnetInfo> {
    let address = parse_address(address)?;
    let mask = parse_prefix_or_mask(mask)?;
    subnet_info(address, mask)
}

/// Calculate from `A.B.C.D/P`, `A.B.C.D` plus a mask, or a bare address.
///
/// A bare address without any mask falls back to its classful default.
pub fn calculate_input(address: &str, mask: Option<&str>) -> Result<SubnetInfo> {
    match (address.split_once('/'), mask) {
        (Some(_), Some(_)) => Err(CalcError::invalid_mask(
            address,
            "mask given both inline and separately",
        )),
        (Some((addr, prefix)), None) => calculate(addr, &format!("/{prefix}")),
        (None, Some(mask)) => calculate(address, mask),
        (None, None) => {
            let addr = parse_address(address)?;
            let class = classify(addr);
            let prefix = class.default_prefix().ok_or_else(|| {
                CalcError::invalid_mask(address, format!("class {class} has no default mask"))
            })?;
            log::info!("No mask for {addr}, using class {class} default /{prefix}");
            subnet_info(addr, Mask::from_prefix(prefix)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_192_168_1_130() {
        let info = calculate("192.168.1.130", "/24").unwrap();
        assert_eq!(info.network.to_string(), "192.168.1.0/24");
        assert_eq!(info.broadcast, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(info.first_host, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(info.last_host, Ipv4Addr::new(192, 168, 1, 254));
        assert_eq!(info.usable_hosts, 254);
        assert_eq!(info.total_addresses, 256);
        assert_eq!(info.wildcard, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(info.class, AddressClass::C);
        assert_eq!(info.binary.mask, "11111111.11111111.11111111.00000000");
        assert_eq!(info.hex.network, "C0.A8.01.00");
        assert_eq!(info.hex.broadcast, "C0.A8.01.FF");
    }

    #[test]
    fn test_calculate_dotted_mask_matches_cidr() {
        let a = calculate("10.20.30.40", "255.255.252.0").unwrap();
        let b = calculate("10.20.30.40", "/22").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.network.to_string(), "10.20.28.0/22");
    }

    #[test]
    fn test_calculate_errors() {
        assert_eq!(
            calculate("256.1.1.1", "/24").unwrap_err().kind(),
            "InvalidAddress"
        );
        assert_eq!(
            calculate("10.0.0.1", "255.0.255.0").unwrap_err().kind(),
            "InvalidMask"
        );
    }

    #[test]
    fn test_calculate_input_forms() {
        let inline = calculate_input("172.16.5.4/20", None).unwrap();
        assert_eq!(inline.network.to_string(), "172.16.0.0/20");

        let classful = calculate_input("172.16.5.4", None).unwrap();
        assert_eq!(classful.prefix, 16);

        assert_eq!(
            calculate_input("224.0.0.1", None).unwrap_err().kind(),
            "InvalidMask"
        );
        assert_eq!(
            calculate_input("10.0.0.1/8", Some("/8")).unwrap_err().kind(),
            "InvalidMask"
        );
    }

    #[test]
    fn test_bit_map() {
        let bits = bit_map(Ipv4Addr::new(192, 168, 1, 130), 26).unwrap();
        assert_eq!(bits.len(), 32);
        assert!(bits[..24].iter().all(|b| b.kind == BitKind::Network));
        assert!(bits[24..26].iter().all(|b| b.kind == BitKind::Subnet));
        assert!(bits[26..].iter().all(|b| b.kind == BitKind::Host));
        // network 192.168.1.128, bit 24 is the top bit of the last octet
        assert_eq!(bits[0].value, 1);
        assert_eq!(bits[24].value, 1);
        assert_eq!(bits[25].value, 0);
        assert!(bits[26..].iter().all(|b| b.value == 0));

        let multicast = bit_map(Ipv4Addr::new(224, 0, 0, 1), 4).unwrap();
        assert!(multicast.iter().all(|b| b.kind != BitKind::Network));
    }
}
