use std::cmp::Ordering;
use std::net::ToSocketAddrs;

use chrono::{DateTime, Local};

use crate::hosts::Host;
use crate::monitor::types::StatusRecord;

/// Sort keys available in the options dialog, in display order.
pub const SORT_CHOICES: [SortKey; 5] =
    [SortKey::Name, SortKey::Address, SortKey::Status, SortKey::Latency, SortKey::Age];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Address,
    Status,
    Latency,
    Age,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Address => write!(f, "address"),
            SortKey::Status => write!(f, "status"),
            SortKey::Latency => write!(f, "latency"),
            SortKey::Age => write!(f, "age"),
        }
    }
}

/// Compute the stable permutation ordering `hosts` by `key`. Status, latency
/// and age read the record at the paired index, so the permutation must be
/// applied to the host and record sequences together.
pub fn order(
    hosts: &[Host],
    records: &[StatusRecord],
    key: SortKey,
    now: DateTime<Local>,
) -> Vec<usize> {
    debug_assert_eq!(hosts.len(), records.len());

    // Resolve once per sort; failures fall back to the raw address string.
    let resolved: Vec<String> = match key {
        SortKey::Address => hosts.iter().map(|h| resolve_address(&h.address)).collect(),
        _ => Vec::new(),
    };

    let mut indices: Vec<usize> = (0..hosts.len()).collect();
    indices.sort_by(|&a, &b| match key {
        SortKey::Name => by_name(hosts, a, b),
        SortKey::Address => resolved[a].cmp(&resolved[b]).then_with(|| by_name(hosts, a, b)),
        SortKey::Status => {
            // Reachable hosts first.
            let up = |i: usize| records[i].reachable;
            up(b).cmp(&up(a)).then_with(|| by_name(hosts, a, b))
        }
        SortKey::Latency => latency_key(&records[a])
            .partial_cmp(&latency_key(&records[b]))
            .unwrap_or(Ordering::Equal)
            .then_with(|| by_name(hosts, a, b)),
        SortKey::Age => {
            // Oldest status first; never-observed hosts have age zero.
            age_key(&records[b], now)
                .cmp(&age_key(&records[a], now))
                .then_with(|| by_name(hosts, a, b))
        }
    });
    indices
}

/// Apply one permutation to the host and record sequences in lockstep.
pub fn apply_permutation(
    permutation: &[usize],
    hosts: &mut Vec<Host>,
    records: &mut Vec<StatusRecord>,
) {
    *hosts = permutation.iter().map(|&i| hosts[i].clone()).collect();
    *records = permutation.iter().map(|&i| records[i]).collect();
}

fn by_name(hosts: &[Host], a: usize, b: usize) -> Ordering {
    hosts[a]
        .address
        .to_lowercase()
        .cmp(&hosts[b].address.to_lowercase())
        .then_with(|| hosts[a].description.cmp(&hosts[b].description))
}

fn latency_key(record: &StatusRecord) -> f64 {
    match record.latency_ms {
        Some(ms) if record.reachable => ms,
        _ => f64::INFINITY,
    }
}

fn age_key(record: &StatusRecord, now: DateTime<Local>) -> i64 {
    record.last_change.map(|at| (now - at).num_milliseconds().max(0)).unwrap_or(0)
}

fn resolve_address(address: &str) -> String {
    (address, 0)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| address.to_string())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(address: &str) -> Host {
        Host { address: address.into(), description: String::new() }
    }

    fn up(latency_ms: f64, age_secs: i64, now: DateTime<Local>) -> StatusRecord {
        StatusRecord {
            reachable: true,
            latency_ms: Some(latency_ms),
            last_change: Some(now - chrono::Duration::seconds(age_secs)),
            flash_until: None,
        }
    }

    fn down(age_secs: i64, now: DateTime<Local>) -> StatusRecord {
        StatusRecord {
            reachable: false,
            latency_ms: None,
            last_change: Some(now - chrono::Duration::seconds(age_secs)),
            flash_until: None,
        }
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let hosts = vec![host("Charlie"), host("alpha"), host("Bravo")];
        let records = vec![StatusRecord::default(); 3];

        let perm = order(&hosts, &records, SortKey::Name, Local::now());
        assert_eq!(perm, vec![1, 2, 0]);
    }

    #[test]
    fn test_status_sort_puts_reachable_first() {
        let now = Local::now();
        let hosts = vec![host("a"), host("b"), host("c")];
        let records = vec![down(0, now), up(5.0, 0, now), down(0, now)];

        let perm = order(&hosts, &records, SortKey::Status, now);
        assert_eq!(perm, vec![1, 0, 2]);
    }

    #[test]
    fn test_latency_sort_sends_unreachable_last() {
        let now = Local::now();
        let hosts = vec![host("a"), host("b"), host("c"), host("d")];
        let records = vec![
            up(40.0, 0, now),
            down(0, now),
            up(3.5, 0, now),
            // Up but with an unparsed reply time: infinite latency.
            StatusRecord { reachable: true, ..StatusRecord::default() },
        ];

        let perm = order(&hosts, &records, SortKey::Latency, now);
        assert_eq!(perm, vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_age_sort_is_descending_with_unobserved_last() {
        let now = Local::now();
        let hosts = vec![host("a"), host("b"), host("c")];
        let records = vec![down(10, now), StatusRecord::default(), down(300, now)];

        let perm = order(&hosts, &records, SortKey::Age, now);
        assert_eq!(perm, vec![2, 0, 1]);
    }

    #[test]
    fn test_address_sort_falls_back_to_raw_string() {
        // Unresolvable names compare by their raw value, name rule as tie-break.
        let hosts = vec![host("zzz-bogus.invalid"), host("aaa-bogus.invalid")];
        let records = vec![StatusRecord::default(); 2];

        let perm = order(&hosts, &records, SortKey::Address, Local::now());
        assert_eq!(perm, vec![1, 0]);
    }

    #[test]
    fn test_duplicate_addresses_tie_break_by_description() {
        let hosts = vec![
            Host { address: "a".into(), description: "second".into() },
            Host { address: "a".into(), description: "first".into() },
        ];
        let records = vec![StatusRecord::default(); 2];

        let perm = order(&hosts, &records, SortKey::Name, Local::now());
        assert_eq!(perm, vec![1, 0]);
    }

    #[test]
    fn test_resort_is_a_bijection_and_idempotent() {
        let now = Local::now();
        let mut hosts = vec![host("d"), host("b"), host("a"), host("c")];
        let mut records =
            vec![up(9.0, 5, now), down(60, now), up(1.0, 0, now), StatusRecord::default()];
        let original: Vec<_> = hosts.iter().cloned().zip(records.clone()).collect();

        let perm = order(&hosts, &records, SortKey::Latency, now);
        apply_permutation(&perm, &mut hosts, &mut records);

        // Pairs travel together: same set of (host, record) pairs afterwards.
        for (h, r) in hosts.iter().zip(&records) {
            assert!(original.iter().any(|(oh, or)| oh == h && or == r));
        }
        assert_eq!(hosts.len(), original.len());

        // Applying the same key again changes nothing.
        let again = order(&hosts, &records, SortKey::Latency, now);
        assert_eq!(again, vec![0, 1, 2, 3]);
    }
}
