//! Error types for subnet calculations.

use crate::models::Network;

/// Result alias used by every calculation in this crate.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Failure of a parse or calculation.
///
/// Each variant carries the offending input and, where one exists, the
/// accepted range so a caller can render a message without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("invalid IPv4 address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("invalid subnet mask '{input}': {reason}")]
    InvalidMask { input: String, reason: String },

    #[error("invalid subnet count {count}: at least 2 subnets are required")]
    InvalidCount { count: u64 },

    #[error("invalid host requirement {hosts} at position {index}: must be at least 1")]
    InvalidRequirement { index: usize, hosts: i64 },

    #[error("{requested} does not fit in {network}: at most {max} possible")]
    PrefixOverflow {
        network: Network,
        requested: u64,
        max: u64,
    },

    #[error("no room for {hosts} hosts (/{prefix}) at {start} inside {base}")]
    InsufficientSpace {
        base: Network,
        hosts: u64,
        prefix: u8,
        start: String,
    },

    #[error("invalid network '{input}': {reason}")]
    InvalidNetwork { input: String, reason: String },

    #[error("{network} is outside the candidate supernet {supernet}")]
    NotAggregatable { network: Network, supernet: Network },
}

impl CalcError {
    pub(crate) fn invalid_address(input: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_mask(input: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidMask {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_network(input: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidNetwork {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::InvalidAddress { .. } => "InvalidAddress",
            CalcError::InvalidMask { .. } => "InvalidMask",
            CalcError::InvalidCount { .. } => "InvalidCount",
            CalcError::InvalidRequirement { .. } => "InvalidRequirement",
            CalcError::PrefixOverflow { .. } => "PrefixOverflow",
            CalcError::InsufficientSpace { .. } => "InsufficientSpace",
            CalcError::InvalidNetwork { .. } => "InvalidNetwork",
            CalcError::NotAggregatable { .. } => "NotAggregatable",
        }
    }
}
