use std::time::Instant;

use chrono::{DateTime, Local};

use super::types::{FLASH_DURATION, ProbeOutcome, StatusRecord};

/// Reconcile a completed probe round against the previous records.
///
/// Returns the new record sequence plus the number of reachability
/// transitions it contained; the caller sounds one alert per reconciliation
/// with at least one transition. Returns `None` when the batch does not line
/// up with the previous records (a round raced a structural edit): a stale
/// batch must never be applied positionally to a different host set.
pub fn reconcile(
    previous: &[StatusRecord],
    batch: &[ProbeOutcome],
    now: DateTime<Local>,
    mono_now: Instant,
) -> Option<(Vec<StatusRecord>, usize)> {
    if previous.len() != batch.len() {
        return None;
    }

    let mut transitions = 0;
    let records = previous
        .iter()
        .zip(batch)
        .map(|(prev, outcome)| {
            let mut next = StatusRecord {
                reachable: outcome.reachable,
                latency_ms: if outcome.reachable { outcome.latency_ms } else { None },
                last_change: prev.last_change,
                flash_until: None,
            };
            if prev.last_change.is_none() {
                // First observation: stamp the time but do not flash.
                next.last_change = Some(now);
            } else if prev.reachable != outcome.reachable {
                transitions += 1;
                next.last_change = Some(now);
                next.flash_until = Some(mono_now + FLASH_DURATION);
            } else if prev.is_flashing(mono_now) {
                next.flash_until = prev.flash_until;
            }
            next
        })
        .collect();

    Some((records, transitions))
}
