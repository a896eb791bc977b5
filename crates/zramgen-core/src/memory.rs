//! Total-memory probe.
//!
//! The generator needs exactly one number from the running system. Putting
//! it behind a trait lets policy evaluation be driven from tests without a
//! real `/proc`.

use crate::{Error, Result};
use std::path::PathBuf;

/// Source of the total-memory measurement.
pub trait MemoryProbe {
    /// Total usable system memory in whole MiB.
    ///
    /// # Errors
    ///
    /// Returns an error if the measurement cannot be taken or parsed.
    fn total_memory_mib(&self) -> Result<u64>;
}

/// Probe backed by `{root}/proc/meminfo`.
#[derive(Debug)]
pub struct ProcMeminfo {
    root: PathBuf,
}

impl ProcMeminfo {
    /// Probe the running system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Probe under a different root directory (tests, image builds).
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ProcMeminfo {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcMeminfo {
    fn total_memory_mib(&self) -> Result<u64> {
        let path = self.root.join("proc/meminfo");
        let meminfo = std::fs::read_to_string(&path)
            .map_err(|e| Error::IoError(format!("failed to read {}: {e}", path.display())))?;

        for line in meminfo.lines() {
            let mut fields = line.split_whitespace();
            if fields.next() != Some("MemTotal:") {
                continue;
            }
            let kib: u64 = fields
                .next()
                .ok_or_else(|| {
                    Error::InvalidInput(format!("malformed MemTotal line in {}", path.display()))
                })?
                .parse()
                .map_err(|_| {
                    Error::InvalidInput(format!("invalid MemTotal value in {}", path.display()))
                })?;
            return Ok(kib / 1024);
        }

        Err(Error::InvalidInput(format!(
            "could not find MemTotal in {}",
            path.display()
        )))
    }
}
