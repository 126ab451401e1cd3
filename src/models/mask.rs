//! Subnet mask parsing and validation.

use super::address::parse_address;
use crate::error::{CalcError, Result};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ipv4_subnet_calc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(CalcError::invalid_mask(
            &format!("/{len}"),
            "prefix length must be in 0-32",
        ))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Bitwise complement of the mask for `len`.
pub fn get_wildcard(len: u8) -> Result<u32> {
    Ok(!get_cidr_mask(len)?)
}

/// Count the contiguous one bits from the most significant bit down.
pub fn count_leading_ones(mask: u32) -> u8 {
    mask.leading_ones() as u8
}

/// A validated subnet mask with its prefix length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mask {
    /// Mask bits, e.g. `0xFFFFFF00`.
    pub bits: u32,
    /// Number of leading one bits.
    pub prefix: u8,
}

impl Mask {
    /// Build the canonical mask for a prefix length.
    pub fn from_prefix(prefix: u8) -> Result<Mask> {
        Ok(Mask {
            bits: get_cidr_mask(prefix)?,
            prefix,
        })
    }

    /// Mask as a dotted address, e.g. `255.255.255.0`.
    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.bits)
    }

    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.bits)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (/{})", self.addr(), self.prefix)
    }
}

/// Parse either a CIDR prefix (`/24`) or a dotted mask (`255.255.255.0`).
///
/// A dotted mask must be a run of ones followed by a run of zeros;
/// `255.0.255.0` is rejected.
pub fn parse_prefix_or_mask(text: &str) -> Result<Mask> {
    if let Some(rest) = text.strip_prefix('/') {
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CalcError::invalid_mask(text, "prefix is not a number"));
        }
        let prefix: u8 = rest
            .parse()
            .map_err(|_| CalcError::invalid_mask(text, "prefix length must be in 0-32"))?;
        if prefix > MAX_LENGTH {
            return Err(CalcError::invalid_mask(text, "prefix length must be in 0-32"));
        }
        return Mask::from_prefix(prefix);
    }

    let bits = u32::from(parse_address(text)?);
    let prefix = count_leading_ones(bits);
    if get_cidr_mask(prefix)? != bits {
        log::debug!("rejecting non-contiguous mask {text} ({bits:#034b})");
        return Err(CalcError::invalid_mask(
            text,
            "mask bits must be contiguous ones followed by zeros",
        ));
    }
    Ok(Mask { bits, prefix })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(1).unwrap(), 0x80000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(31).unwrap(), 0xFFFFFFFE);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(get_wildcard(24).unwrap(), 0x000000FF);
        assert_eq!(get_wildcard(0).unwrap(), 0xFFFFFFFF);
        assert_eq!(get_wildcard(32).unwrap(), 0);
    }

    #[test]
    fn test_mask_canonical_for_every_prefix() {
        for p in 0..=MAX_LENGTH {
            let mask = get_cidr_mask(p).unwrap();
            assert_eq!(count_leading_ones(mask), p);
            let parsed = parse_prefix_or_mask(&Ipv4Addr::from(mask).to_string()).unwrap();
            assert_eq!(parsed.prefix, p);
            assert_eq!(parsed.bits, mask);
        }
    }

    #[test]
    fn test_parse_cidr_prefix() {
        let mask = parse_prefix_or_mask("/24").unwrap();
        assert_eq!(mask.prefix, 24);
        assert_eq!(mask.addr(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(mask.wildcard(), Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(mask.to_string(), "255.255.255.0 (/24)");

        assert_eq!(parse_prefix_or_mask("/0").unwrap().bits, 0);
        assert_eq!(parse_prefix_or_mask("/32").unwrap().bits, u32::MAX);
    }

    #[test]
    fn test_parse_mask_rejects() {
        for bad in ["/33", "/", "/-1", "/+8", "/ 8", "/abc", "/999"] {
            assert_eq!(parse_prefix_or_mask(bad).unwrap_err().kind(), "InvalidMask", "{bad}");
        }
        assert_eq!(
            parse_prefix_or_mask("255.0.255.0").unwrap_err().kind(),
            "InvalidMask"
        );
        assert_eq!(
            parse_prefix_or_mask("0.255.255.255").unwrap_err().kind(),
            "InvalidMask"
        );
        // malformed dotted text is an address error
        assert_eq!(
            parse_prefix_or_mask("255.255.0").unwrap_err().kind(),
            "InvalidAddress"
        );
    }

    #[test]
    fn test_parse_dotted_mask() {
        let mask = parse_prefix_or_mask("255.255.240.0").unwrap();
        assert_eq!(mask.prefix, 20);
        let mask = parse_prefix_or_mask("0.0.0.0").unwrap();
        assert_eq!(mask.prefix, 0);
    }
}
