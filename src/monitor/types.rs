use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Hard deadline for a single probe, double the platform ping's own budget.
pub const PROBE_DEADLINE: Duration = Duration::from_secs(2);

/// How long a row stays highlighted after a reachability transition.
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

/// Outcome of probing one host once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    /// Round-trip time in milliseconds, when the reply carried a parsable one.
    pub latency_ms: Option<f64>,
}

impl ProbeOutcome {
    pub fn up(latency_ms: Option<f64>) -> Self {
        Self { reachable: true, latency_ms }
    }

    pub fn down() -> Self {
        Self { reachable: false, latency_ms: None }
    }
}

/// Reconciled status for one host, index-aligned with the host list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusRecord {
    pub reachable: bool,
    pub latency_ms: Option<f64>,
    /// Wall-clock time of the first observation or the last reachability
    /// flip. `None` until the host has been probed at least once.
    pub last_change: Option<DateTime<Local>>,
    /// Monotonic deadline until which the row is highlighted.
    pub flash_until: Option<Instant>,
}

impl StatusRecord {
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|deadline| deadline > now)
    }

    /// Seconds since the last status change, `None` before first observation.
    pub fn age_secs(&self, now: DateTime<Local>) -> Option<i64> {
        self.last_change.map(|at| (now - at).num_seconds().max(0))
    }
}
