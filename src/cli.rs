//! Command line parsing.

use crate::models::Network;
use crate::output::OutputFormat;
use crate::processing::Request;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::sync::OnceLock;

/// Regex for splitting host lists on commas and whitespace.
static LIST_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_list_regex() -> &'static Regex {
    LIST_REGEX.get_or_init(|| Regex::new(r"[,\s]+").expect("Invalid Regex"))
}

#[derive(Parser, Debug)]
#[command(name = "subnet-calc", version, about = "IPv4 subnet calculator")]
pub struct Cli {
    /// Output format, overrides SUBNET_CALC_FORMAT
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Network report for an address, mask as /P or dotted
    Info {
        /// A.B.C.D or A.B.C.D/P
        address: String,
        mask: Option<String>,
    },
    /// Allocate subnets for host counts
    Vlsm {
        base: Network,
        /// Host counts, comma or space separated
        #[arg(required = true, allow_negative_numbers = true, value_parser = parse_host_list)]
        hosts: Vec<HostList>,
        /// Keep the subnets that fit instead of failing
        #[arg(long)]
        partial: bool,
    },
    /// Split a network into equal subnets
    Split { network: Network, count: u64 },
    /// Aggregate networks into one route
    Supernet {
        #[arg(required = true)]
        networks: Vec<String>,
    },
    /// Run a JSON array of requests
    Batch { file: String },
}

/// Host counts from one command line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostList(pub Vec<i64>);

/// Split host lists like `50,20` or `"50, 20 10"` into numbers.
pub fn parse_host_list(arg: &str) -> Result<HostList, String> {
    get_list_regex()
        .split(arg.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| format!("host count '{s}' is not a number"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(HostList)
}

/// What `main` has to do for a parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Request),
    Batch(String),
}

impl Command {
    pub fn into_action(self) -> Action {
        let request = match self {
            Command::Batch { file } => return Action::Batch(file),
            Command::Info { address, mask } => Request::Info { address, mask },
            Command::Vlsm {
                base,
                hosts,
                partial,
            } => Request::Vlsm {
                base,
                hosts: hosts.into_iter().flat_map(|h| h.0).collect(),
                partial,
            },
            Command::Split { network, count } => Request::Split { network, count },
            Command::Supernet { networks } => Request::Supernet { networks },
        };
        log::trace!("parsed request {request:?}");
        Action::Run(request)
    }
}
