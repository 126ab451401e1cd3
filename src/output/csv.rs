//! CSV output formatting for reports.

use super::terminal::format_field;
use crate::models::Network;
use crate::processing::{SplitPlan, SubnetAllocation, SubnetInfo, Supernet};
use std::fmt::{self, Write};

pub fn info_csv(info: &SubnetInfo) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        r#""address","mask","cidr","network","broadcast","first_host","last_host","total","usable","wildcard","class""#
    )?;
    writeln!(
        out,
        "{},{},{},{},{},{},{},{},{},{},{}",
        format_field(info.address, 17),
        format_field(info.mask, 17),
        format_field(format!("/{}", info.prefix), 5),
        format_field(info.network, 20),
        format_field(info.broadcast, 17),
        format_field(info.first_host, 17),
        format_field(info.last_host, 17),
        format_field(info.total_addresses, 12),
        format_field(info.usable_hosts, 12),
        format_field(info.wildcard, 17),
        format_field(info.class, 15),
    )?;
    Ok(out)
}

fn header(out: &mut String) -> fmt::Result {
    writeln!(
        out,
        r#""cnt","state","required","subnet_cidr","mask","first_host","last_host","broadcast","usable""#
    )
}

/// Print a single subnet row.
fn network_row(
    out: &mut String,
    cnt: usize,
    state: &str,
    required: Option<u64>,
    n: &Network,
) -> fmt::Result {
    let hosts = n.host_range();
    writeln!(
        out,
        "{cnt},{state},{required},{subnet_cidr},{mask},{first},{last},{broadcast},{usable}",
        cnt = format_field(cnt, 6),
        state = format_field(state, 10),
        required = format_field(required.map(|r| r.to_string()).unwrap_or_default(), 12),
        subnet_cidr = format_field(n, 20),
        mask = format_field(n.mask_addr(), 17),
        first = format_field(hosts.first, 17),
        last = format_field(hosts.last, 17),
        broadcast = format_field(n.broadcast(), 17),
        usable = format_field(hosts.usable, 12),
    )
}

pub fn vlsm_csv(alloc: &SubnetAllocation) -> Result<String, fmt::Error> {
    let mut out = String::new();
    header(&mut out)?;
    for e in &alloc.entries {
        network_row(&mut out, e.index + 1, "allocated", Some(e.required), &e.network)?;
    }
    for n in &alloc.free {
        network_row(&mut out, 0, "-free-", None, n)?;
    }
    Ok(out)
}

pub fn split_csv(plan: &SplitPlan) -> Result<String, fmt::Error> {
    let mut out = String::new();
    header(&mut out)?;
    for (i, n) in plan.subnets.iter().enumerate() {
        network_row(&mut out, i + 1, "subnet", None, n)?;
    }
    for n in &plan.reserved {
        network_row(&mut out, 0, "-reserved-", None, n)?;
    }
    Ok(out)
}

pub fn supernet_csv(s: &Supernet) -> Result<String, fmt::Error> {
    let mut out = String::new();
    header(&mut out)?;
    for (i, n) in s.networks.iter().enumerate() {
        network_row(&mut out, i + 1, "input", None, n)?;
    }
    for n in &s.uncovered {
        network_row(&mut out, 0, "-gap-", None, n)?;
    }
    network_row(&mut out, 0, "supernet", None, &s.supernet)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{aggregate_str, allocate, calculate, plan_split};

    #[test]
    fn test_info_csv() {
        let info = calculate("10.1.2.3", "255.255.0.0").unwrap();
        let csv = info_csv(&info).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#""address","mask""#));
        assert!(lines[1].contains(r#""10.1.0.0/16""#));
        assert!(lines[1].contains(r#""65534""#));
        assert!(lines[1].ends_with(r#""A""#));
    }

    #[test]
    fn test_vlsm_csv() {
        let alloc = allocate("10.0.0.0/24".parse().unwrap(), &[50, 20, 10]).unwrap();
        let csv = vlsm_csv(&alloc).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        // header, 3 allocations, 2 free blocks
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains(r#""10.0.0.0/26""#));
        assert!(lines[1].contains(r#""255.255.255.192""#));
        assert!(lines[5].contains(r#""-free-""#));
        assert!(lines[5].contains(r#""10.0.0.128/25""#));
    }

    #[test]
    fn test_split_and_supernet_csv() {
        let plan = plan_split("192.168.0.0/24".parse().unwrap(), 3).unwrap();
        let csv = split_csv(&plan).unwrap();
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.contains(r#""-reserved-""#));

        let s = aggregate_str(&["192.168.0.0/24", "192.168.1.0/24"]).unwrap();
        let csv = supernet_csv(&s).unwrap();
        assert!(csv.lines().last().unwrap().contains(r#""192.168.0.0/23""#));
    }
}
