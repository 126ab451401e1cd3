//! Dotted-decimal address codec.
//!
//! Converts between the textual `A.B.C.D` form and [`Ipv4Addr`], and renders
//! the binary and hexadecimal octet forms shown next to a calculation.

use crate::error::{CalcError, Result};
use itertools::Itertools;
use std::net::Ipv4Addr;

/// Parse a dotted-decimal IPv4 address.
///
/// Exactly four components, each a decimal integer in 0-255 written without
/// sign, whitespace or leading zeros.
///
/// # Examples
/// ```
/// use ipv4_subnet_calc::models::parse_address;
/// assert_eq!(u32::from(parse_address("10.0.0.1").unwrap()), 0x0A000001);
/// assert!(parse_address("256.1.1.1").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Addr> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(CalcError::invalid_address(
            text,
            format!("expected 4 octets, found {}", parts.len()),
        ));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        *octet = parse_octet(text, part)?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(text: &str, part: &str) -> Result<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalcError::invalid_address(
            text,
            format!("octet '{part}' is not a decimal number"),
        ));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(CalcError::invalid_address(
            text,
            format!("octet '{part}' has a leading zero"),
        ));
    }
    // at most 3 digits, fits u16
    let value: u16 = part
        .parse()
        .map_err(|_| CalcError::invalid_address(text, format!("octet '{part}' is not a number")))?;
    u8::try_from(value).map_err(|_| {
        CalcError::invalid_address(text, format!("octet '{part}' is out of range 0-255"))
    })
}

/// Format an address as four dotted octets, most significant first.
pub fn format_address(addr: Ipv4Addr) -> String {
    addr.octets().iter().join(".")
}

/// Each octet as 8 zero-padded binary digits, dot separated.
pub fn to_binary(addr: Ipv4Addr) -> String {
    addr.octets().iter().map(|o| format!("{o:08b}")).join(".")
}

/// Each octet as 2 uppercase hex digits, dot separated.
pub fn to_hex(addr: Ipv4Addr) -> String {
    addr.octets().iter().map(|o| format!("{o:02X}")).join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("192.168.1.130").unwrap(),
            Ipv4Addr::new(192, 168, 1, 130)
        );
        assert_eq!(parse_address("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(
            parse_address("255.255.255.255").unwrap(),
            Ipv4Addr::BROADCAST
        );
    }

    #[test]
    fn test_parse_address_rejects() {
        for bad in [
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.",
            "a.b.c.d",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1.2.-3.4",
            "+1.2.3.4",
            "01.2.3.4",
            "1000.2.3.4",
            "",
        ] {
            let err = parse_address(bad).unwrap_err();
            assert_eq!(err.kind(), "InvalidAddress", "input {bad:?}");
        }
    }

    #[test]
    fn test_round_trip() {
        for text in ["0.0.0.0", "10.0.0.1", "172.16.254.3", "255.255.255.255"] {
            assert_eq!(format_address(parse_address(text).unwrap()), text);
        }
    }

    #[test]
    fn test_to_binary() {
        assert_eq!(
            to_binary(Ipv4Addr::new(192, 168, 1, 0)),
            "11000000.10101000.00000001.00000000"
        );
        assert_eq!(
            to_binary(Ipv4Addr::new(255, 255, 255, 0)),
            "11111111.11111111.11111111.00000000"
        );
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Ipv4Addr::new(192, 168, 1, 10)), "C0.A8.01.0A");
        assert_eq!(to_hex(Ipv4Addr::new(0, 0, 0, 255)), "00.00.00.FF");
    }
}
