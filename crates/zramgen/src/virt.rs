//! Virtualization detection.

use anyhow::Context;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Check whether we are running inside a container.
///
/// zram devices belong to the host; inside a container the generator does
/// nothing. A machine without `systemd-detect-virt` installed counts as not
/// containerized.
pub fn detect_container() -> anyhow::Result<bool> {
    match Command::new("systemd-detect-virt")
        .arg("--container")
        .stdout(Stdio::null())
        .status()
    {
        Ok(status) => Ok(status.success()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).context("failed to run systemd-detect-virt"),
    }
}
