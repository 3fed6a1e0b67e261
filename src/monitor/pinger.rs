use std::process::Stdio;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::types::{PROBE_DEADLINE, ProbeOutcome};

/// Probe one host by spawning the platform `ping` binary with a
/// single-packet request. Every failure mode on this boundary — spawn error,
/// deadline expiry, non-zero exit, unparsable output — collapses into an
/// unreachable outcome; the caller never sees an error. The child is killed
/// when the deadline drops the pending future.
pub async fn probe(address: &str) -> ProbeOutcome {
    let mut command = Command::new("ping");
    if cfg!(windows) {
        command.args(["-n", "1", "-w", "1000", address]);
    } else {
        command.args(["-c", "1", address]);
    }
    command.stdin(Stdio::null()).kill_on_drop(true);

    let output = match timeout(PROBE_DEADLINE, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!(address, error = %e, "ping spawn failed");
            return ProbeOutcome::down();
        }
        Err(_) => {
            debug!(address, "ping deadline expired");
            return ProbeOutcome::down();
        }
    };

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    parse_ping_output(&text)
}

/// Parse the combined output of a single-packet ping. A reply is recognised
/// by a `ttl=` marker (capitalisation differs between platforms); the
/// round-trip time comes from the first `time` field, where `=`, `<` and
/// spaces may separate the label from the value. A reply without a parsable
/// time is still up.
pub(crate) fn parse_ping_output(output: &str) -> ProbeOutcome {
    if !output.to_lowercase().contains("ttl=") {
        return ProbeOutcome::down();
    }
    ProbeOutcome::up(parse_reply_time(output))
}

fn parse_reply_time(output: &str) -> Option<f64> {
    let rest = &output[output.find("time")? + "time".len()..];
    let rest = rest.trim_start_matches(['=', '<', ' ']);
    let end = rest.find(|c: char| !c.is_ascii_digit() && c != '.').unwrap_or(rest.len());
    rest[..end].parse().ok()
}
