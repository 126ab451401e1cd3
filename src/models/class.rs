//! Legacy classful address classes.
//!
//! Only used for display and default mask suggestions, never for routing.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum AddressClass {
    A,
    B,
    C,
    /// Multicast, 224-239.
    D,
    /// Reserved, 240-255.
    E,
    /// Leading octet 0 or 127.
    Invalid,
}

/// Classify an address by its leading octet.
pub fn classify(addr: Ipv4Addr) -> AddressClass {
    match addr.octets()[0] {
        1..=126 => AddressClass::A,
        128..=191 => AddressClass::B,
        192..=223 => AddressClass::C,
        224..=239 => AddressClass::D,
        240..=255 => AddressClass::E,
        _ => AddressClass::Invalid,
    }
}

impl AddressClass {
    /// Classful default prefix length, if the class has one.
    pub fn default_prefix(&self) -> Option<u8> {
        match self {
            AddressClass::A => Some(8),
            AddressClass::B => Some(16),
            AddressClass::C => Some(24),
            _ => None,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D (Multicast)",
            AddressClass::E => "E (Reserved)",
            AddressClass::Invalid => "Invalid",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(first: u8) -> AddressClass {
        classify(Ipv4Addr::new(first, 1, 2, 3))
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(class_of(0), AddressClass::Invalid);
        assert_eq!(class_of(1), AddressClass::A);
        assert_eq!(class_of(126), AddressClass::A);
        assert_eq!(class_of(127), AddressClass::Invalid);
        assert_eq!(class_of(128), AddressClass::B);
        assert_eq!(class_of(191), AddressClass::B);
        assert_eq!(class_of(192), AddressClass::C);
        assert_eq!(class_of(223), AddressClass::C);
        assert_eq!(class_of(224), AddressClass::D);
        assert_eq!(class_of(239), AddressClass::D);
        assert_eq!(class_of(240), AddressClass::E);
        assert_eq!(class_of(255), AddressClass::E);
    }

    #[test]
    fn test_display_and_default_prefix() {
        assert_eq!(AddressClass::D.to_string(), "D (Multicast)");
        assert_eq!(AddressClass::E.to_string(), "E (Reserved)");
        assert_eq!(AddressClass::B.default_prefix(), Some(16));
        assert_eq!(AddressClass::Invalid.default_prefix(), None);
    }
}
