use std::fs;
use std::path::Path;

use thiserror::Error;

/// One ping target plus a free-form description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub address: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum HostFileError {
    #[error("failed to read host file: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write host file: {0}")]
    Write(#[source] std::io::Error),
}

/// Load hosts from a flat file of `address,description` lines. Blank lines
/// are skipped and a missing description defaults to empty. The returned
/// list is pre-sorted by address, case-insensitively.
pub fn load(path: &Path) -> Result<Vec<Host>, HostFileError> {
    let text = fs::read_to_string(path).map_err(HostFileError::Read)?;

    let mut hosts = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (address, description) = match line.split_once(',') {
            Some((address, description)) => (address.trim(), description.trim()),
            None => (line, ""),
        };
        if address.is_empty() {
            continue;
        }
        hosts.push(Host { address: address.into(), description: description.into() });
    }

    hosts.sort_by(|a, b| a.address.to_lowercase().cmp(&b.address.to_lowercase()));
    Ok(hosts)
}

/// Write the host list back as `address,description` lines, replacing the
/// previous file contents wholesale.
pub fn save(path: &Path, hosts: &[Host]) -> Result<(), HostFileError> {
    let mut out = String::new();
    for (i, host) in hosts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&host.address);
        if !host.description.is_empty() {
            out.push(',');
            out.push_str(&host.description);
        }
    }
    fs::write(path, out).map_err(HostFileError::Write)
}
