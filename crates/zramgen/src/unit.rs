//! systemd unit emission.
//!
//! For each device the generator writes a `swap-create@.service` instance
//! that sizes and formats the zram block device, a `.swap` unit that
//! activates it, and the `swap.target.wants` symlink that pulls the swap
//! unit into boot.

use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;
use tracing::info;

/// Write the units for one device into the generator output directory.
///
/// `root` is spliced into the unit text so that units generated against a
/// `ZRAMGEN_ROOT` tree point back into that tree.
pub fn write_units(root: &str, output_dir: &Path, device_name: &str, size_mib: u64) -> Result<()> {
    let disksize = size_mib * 1024 * 1024;
    let service_name = format!("swap-create@{device_name}.service");
    info!("creating {service_name} for {root}dev/{device_name} ({size_mib}MiB)");

    let service_path = output_dir.join(&service_name);
    let service = format!(
        "\
[Unit]
Description=Create swap on {root}dev/%i
Wants=systemd-modules-load.service
After=systemd-modules-load.service
After=dev-{device_name}.device
DefaultDependencies=false

[Service]
Type=oneshot
ExecStartPre=-modprobe zram
ExecStart=sh -c 'echo {disksize} >{root}sys/block/%i/disksize'
ExecStart=mkswap {root}dev/%i
"
    );
    fs::write(&service_path, service)
        .with_context(|| format!("failed to write {}", service_path.display()))?;

    let swap_name = format!("dev-{device_name}.swap");
    let swap_path = output_dir.join(&swap_name);
    let swap = format!(
        "\
[Unit]
Description=Compressed swap on {root}dev/{device_name}
Requires={service_name}
After={service_name}

[Swap]
What={root}dev/{device_name}
Options=pri=100
"
    );
    fs::write(&swap_path, swap)
        .with_context(|| format!("failed to write {}", swap_path.display()))?;

    let wants_path = output_dir.join("swap.target.wants").join(&swap_name);
    make_symlink(&format!("../{swap_name}"), &wants_path)?;

    Ok(())
}

/// Drop a modules-load.d entry so the zram module is loaded at boot.
pub fn write_modules_load(root: &str) -> Result<()> {
    let path = Path::new(root).join("run/modules-load.d/zram.conf");
    make_parent(&path)?;
    fs::write(&path, "zram\n").with_context(|| format!("failed to write {}", path.display()))
}

fn make_parent(of: &Path) -> Result<()> {
    let parent = of
        .parent()
        .with_context(|| format!("no parent directory for {}", of.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))
}

fn make_symlink(target: &str, link: &Path) -> Result<()> {
    make_parent(link)?;
    symlink(target, link).with_context(|| format!("failed to link {}", link.display()))
}
