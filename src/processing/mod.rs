//! Subnet calculation logic.
//!
//! This module contains the calculations offered to callers:
//! - [`info`] - Single network report
//! - [`vlsm`] - Variable-length subnet allocation
//! - [`split`] - Equal-size splitting
//! - [`supernet`] - Route aggregation
//!
//! [`run`] dispatches one [`Request`] to the matching calculation.

mod gap_finder;
pub mod info;
pub mod split;
pub mod supernet;
pub mod vlsm;

use crate::error::Result;
use crate::models::Network;
use serde::{Deserialize, Serialize};

// Re-export public functions
pub use gap_finder::free_blocks;
pub use info::{bit_map, calculate, calculate_input, subnet_info, Bit, BitKind, SubnetInfo};
pub use split::{plan_split, split, SplitPlan};
pub use supernet::{aggregate, aggregate_str, Supernet};
pub use vlsm::{allocate, allocate_partial, PartialAllocation, SubnetAllocation, VlsmEntry};

/// One calculation asked for by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    /// Address with `/P` inline, or address plus `mask`.
    Info {
        address: String,
        #[serde(default)]
        mask: Option<String>,
    },
    Vlsm {
        base: Network,
        hosts: Vec<i64>,
        /// Keep what fits instead of failing.
        #[serde(default)]
        partial: bool,
    },
    Split {
        network: Network,
        count: u64,
    },
    Supernet {
        networks: Vec<String>,
    },
}

/// Result of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Report {
    Info(SubnetInfo),
    Vlsm(SubnetAllocation),
    VlsmPartial(PartialAllocation),
    Split(SplitPlan),
    Supernet(Supernet),
}

/// Run a single request.
pub fn run(request: &Request) -> Result<Report> {
    log::debug!("#Start run({request:?})");
    let report = match request {
        Request::Info { address, mask } => {
            Report::Info(calculate_input(address.trim(), mask.as_deref().map(str::trim))?)
        }
        Request::Vlsm {
            base,
            hosts,
            partial: false,
        } => Report::Vlsm(allocate(*base, hosts)?),
        Request::Vlsm {
            base,
            hosts,
            partial: true,
        } => Report::VlsmPartial(allocate_partial(*base, hosts)?),
        Request::Split { network, count } => Report::Split(plan_split(*network, *count)?),
        Request::Supernet { networks } => Report::Supernet(aggregate_str(networks)?),
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_dispatch() {
        let report = run(&Request::Split {
            network: "192.168.0.0/24".parse().unwrap(),
            count: 4,
        })
        .unwrap();
        match report {
            Report::Split(plan) => assert_eq!(plan.subnets.len(), 4),
            other => panic!("unexpected report {other:?}"),
        }

        let report = run(&Request::Vlsm {
            base: "10.0.0.0/24".parse().unwrap(),
            hosts: vec![200, 100],
            partial: true,
        })
        .unwrap();
        assert!(matches!(report, Report::VlsmPartial(p) if p.unallocated == Some((1, 100))));

        let err = run(&Request::Info {
            address: "10.0.0.1".to_string(),
            mask: Some("255.0.255.0".to_string()),
        })
        .unwrap_err();
        assert_eq!(err.kind(), "InvalidMask");
    }

    #[test]
    fn test_request_json() {
        let req: Request =
            serde_json::from_str(r#"{"op":"vlsm","base":"10.0.0.0/24","hosts":[50,20,10]}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::Vlsm {
                base: "10.0.0.0/24".parse().unwrap(),
                hosts: vec![50, 20, 10],
                partial: false,
            }
        );

        let req: Request = serde_json::from_str(r#"{"op":"info","address":"10.1.2.3/8"}"#).unwrap();
        assert!(matches!(req, Request::Info { mask: None, .. }));
    }

    #[test]
    fn test_report_json() {
        let report = run(&Request::Supernet {
            networks: vec!["192.168.0.0/24".to_string(), "192.168.1.0/24".to_string()],
        })
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["op"], "supernet");
        assert_eq!(json["supernet"], "192.168.0.0/23");
        assert_eq!(json["uncovered"], serde_json::json!([]));
    }
}
