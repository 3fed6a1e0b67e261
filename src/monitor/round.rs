use tracing::debug;

use super::pinger;
use super::types::ProbeOutcome;

/// Probe every address concurrently and collect the outcomes in input order.
/// The round blocks until every probe has finished; per-probe deadlines keep
/// that wait bounded. A panicked probe task counts as unreachable.
pub async fn run_round(addresses: Vec<String>) -> Vec<ProbeOutcome> {
    let handles: Vec<_> = addresses
        .into_iter()
        .map(|address| tokio::spawn(async move { pinger::probe(&address).await }))
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                debug!(error = %e, "probe task failed");
                outcomes.push(ProbeOutcome::down());
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_round() {
        assert!(run_round(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_round_is_index_aligned() {
        let outcomes = run_round(vec![
            "first-bogus-host.invalid".into(),
            "second-bogus-host.invalid".into(),
        ])
        .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.reachable && o.latency_ms.is_none()));
    }
}
