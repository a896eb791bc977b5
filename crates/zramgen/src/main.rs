//! systemd generator for zram swap devices.
//!
//! Runs during early boot: reads `/etc/zramgen.conf`, sizes each configured
//! device against total system memory, and writes the systemd units that
//! create and activate the swap space. Device creation itself happens later
//! in boot, when systemd runs the emitted units.

#![deny(missing_docs)]
#![deny(clippy::panic)]
#![warn(clippy::all, clippy::pedantic)]

mod unit;
mod virt;

use anyhow::bail;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zramgen_core::config::load_config;
use zramgen_core::memory::{MemoryProbe, ProcMeminfo};
use zramgen_core::policy::{compute_device_size, DeviceSizeDecision};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("zramgen: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // systemd generators receive: normal_dir early_dir late_dir
    let output_dir = match args.len() {
        2 | 4 => Path::new(&args[1]),
        _ => bail!("usage: zramgen <normal_dir> [<early_dir> <late_dir>]"),
    };

    let root = root_directory();

    let config = load_config(Path::new(&root))?;
    if config.devices.is_empty() {
        return Ok(());
    }

    // A ZRAMGEN_ROOT tree is not the live system; the container check only
    // applies to the real root.
    if root == "/" && virt::detect_container()? {
        info!("running in a container, exiting");
        return Ok(());
    }

    let probe = ProcMeminfo::with_root(&root);
    let total_memory_mib = probe.total_memory_mib()?;

    let mut devices_made = false;
    for device in &config.devices {
        match compute_device_size(total_memory_mib, device)? {
            DeviceSizeDecision::Skip => {
                if let Some(limit) = device.memory_limit_mib {
                    info!(
                        "{}: system has too much memory ({total_memory_mib}MiB), \
                         limit is {limit}MiB, ignoring",
                        device.name
                    );
                }
            }
            DeviceSizeDecision::Create { size_mib } => {
                unit::write_units(&root, output_dir, &device.name, size_mib)?;
                devices_made = true;
            }
        }
    }

    if devices_made {
        unit::write_modules_load(&root)?;
    }

    Ok(())
}

/// Root directory for all file access, normally `/`.
///
/// `ZRAMGEN_ROOT` points the generator at a different tree for tests and
/// image builds; the returned string always ends in a separator so it can be
/// spliced directly into unit text.
fn root_directory() -> String {
    match std::env::var("ZRAMGEN_ROOT") {
        Ok(mut root) if !root.is_empty() => {
            if !root.ends_with(std::path::is_separator) {
                root.push('/');
            }
            info!("using {root} as root directory");
            root
        }
        _ => "/".to_string(),
    }
}
