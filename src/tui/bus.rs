use tokio::sync::broadcast;
use tracing::debug;

use crate::monitor::types::ProbeOutcome;

/// Events delivered to the TUI loop from outside the keyboard path.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// A probe round finished. `epoch` tags the host-set version the round
    /// was armed against; the loop discards stale deliveries.
    RoundComplete { epoch: u64, outcomes: Vec<ProbeOutcome> },
}

static BUS_TX: std::sync::OnceLock<broadcast::Sender<TuiEvent>> = std::sync::OnceLock::new();

fn bus() -> &'static broadcast::Sender<TuiEvent> {
    BUS_TX.get_or_init(|| {
        let (tx, _rx) = broadcast::channel::<TuiEvent>(16);
        tx
    })
}

pub fn subscribe() -> broadcast::Receiver<TuiEvent> {
    bus().subscribe()
}

pub fn publish_round(epoch: u64, outcomes: Vec<ProbeOutcome>) {
    debug!(epoch, count = outcomes.len(), "TUI bus: publishing probe round");
    publish(TuiEvent::RoundComplete { epoch, outcomes });
}

fn publish(ev: TuiEvent) {
    // Ignore errors if there are no receivers
    let _ = bus().send(ev);
}
