//! Terminal output.
//!
//! Human readable rendering of reports, with colour highlights.

use crate::processing::{
    BitKind, PartialAllocation, SplitPlan, SubnetAllocation, SubnetInfo, Supernet,
};
use colored::Colorize;
use itertools::Itertools;
use std::fmt::{self, Write};

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string().replace('"', "\"\"");
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn line(out: &mut String, key: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(out, "{:<20}{}", format!("{key}:"), value)
}

/// Bit map as 32 characters in 4 octets: `N` network, `S` subnet, `H` host
/// above the bit values.
fn bit_map_lines(info: &SubnetInfo) -> (String, String) {
    let kinds = info
        .bit_map
        .chunks(8)
        .map(|octet| {
            octet
                .iter()
                .map(|b| match b.kind {
                    BitKind::Network => "N",
                    BitKind::Subnet => "S",
                    BitKind::Host => "H",
                })
                .collect::<String>()
        })
        .join(".");
    let values = info
        .bit_map
        .chunks(8)
        .map(|octet| octet.iter().map(|b| b.value.to_string()).collect::<String>())
        .join(".");
    (kinds, values)
}

pub fn info_text(info: &SubnetInfo) -> Result<String, fmt::Error> {
    let mut out = String::new();
    line(&mut out, "Address", info.address)?;
    line(&mut out, "Subnet mask", format!("{} (/{})", info.mask, info.prefix))?;
    line(&mut out, "Network", info.network.to_string().green().bold())?;
    line(&mut out, "Broadcast", info.broadcast.to_string().yellow())?;
    line(&mut out, "First host", info.first_host)?;
    line(&mut out, "Last host", info.last_host)?;
    line(
        &mut out,
        "Hosts",
        format!("{} ({} usable)", info.total_addresses, info.usable_hosts),
    )?;
    line(&mut out, "Wildcard mask", info.wildcard)?;
    line(&mut out, "Class", info.class)?;
    line(&mut out, "CIDR", format!("/{}", info.prefix))?;
    out.push('\n');
    line(&mut out, "Binary address", &info.binary.address)?;
    line(&mut out, "Binary mask", &info.binary.mask)?;
    line(&mut out, "Binary network", &info.binary.network)?;
    line(&mut out, "Binary broadcast", &info.binary.broadcast)?;
    line(&mut out, "Hex address", &info.hex.address)?;
    line(&mut out, "Hex mask", &info.hex.mask)?;
    line(&mut out, "Hex network", &info.hex.network)?;
    line(&mut out, "Hex broadcast", &info.hex.broadcast)?;
    let (kinds, values) = bit_map_lines(info);
    line(&mut out, "Bit map", kinds)?;
    line(&mut out, "", values)?;
    Ok(out)
}

pub fn vlsm_text(alloc: &SubnetAllocation) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "VLSM allocation in {}", alloc.base.to_string().bold())?;
    writeln!(
        out,
        "{:>4} {:>10} {:<20} {:<16} {:<16} {:<16} {:>10}",
        "#", "required", "subnet", "first host", "last host", "broadcast", "usable"
    )?;
    for e in &alloc.entries {
        writeln!(
            out,
            "{:>4} {:>10} {:<20} {:<16} {:<16} {:<16} {:>10}",
            e.index + 1,
            e.required,
            e.network.to_string().green(),
            e.hosts.first.to_string(),
            e.hosts.last.to_string(),
            e.network.broadcast().to_string(),
            e.hosts.usable
        )?;
    }
    writeln!(
        out,
        "Allocated {} of {} addresses, {} free, {:.1}% of usable hosts requested",
        alloc.allocated_addresses(),
        alloc.base.size(),
        alloc.remaining_addresses(),
        alloc.utilisation() * 100.0
    )?;
    if !alloc.free.is_empty() {
        writeln!(out, "Free: {}", alloc.free.iter().join(", "))?;
    }
    Ok(out)
}

pub fn vlsm_partial_text(partial: &PartialAllocation) -> Result<String, fmt::Error> {
    let mut out = vlsm_text(&partial.allocation)?;
    if let Some((index, hosts)) = partial.unallocated {
        writeln!(
            out,
            "{} requirement #{} ({hosts} hosts) and the ones after it did not fit",
            "STOPPED".on_red(),
            index + 1
        )?;
    }
    Ok(out)
}

pub fn split_text(plan: &SplitPlan) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{} split into {} subnet(s)",
        plan.network.to_string().bold(),
        plan.subnets.len()
    )?;
    for (i, n) in plan.subnets.iter().enumerate() {
        let hosts = n.host_range();
        writeln!(
            out,
            "{:>4} {:<20} {} - {} ({} usable)",
            i + 1,
            n.to_string().green(),
            hosts.first,
            hosts.last,
            hosts.usable
        )?;
    }
    if !plan.reserved.is_empty() {
        writeln!(
            out,
            "Unused: {}",
            plan.reserved.iter().join(", ").dimmed()
        )?;
    }
    Ok(out)
}

pub fn supernet_text(s: &Supernet) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Networks: {}", s.networks.iter().join(", "))?;
    writeln!(out, "Supernet: {}", s.supernet.to_string().green().bold())?;
    writeln!(out, "Mask:     {}", s.supernet.mask_addr())?;
    if !s.uncovered.is_empty() {
        writeln!(
            out,
            "{} also covers: {}",
            "NOTE".yellow(),
            s.uncovered.iter().join(", ")
        )?;
    }
    Ok(out)
}
