//! Integration tests for the configuration → probe → policy flow.
//!
//! These build a synthetic root directory with a configuration file and a
//! fake `/proc/meminfo`, then evaluate the policy the way the generator
//! binary does.

use zramgen_core::config::load_config;
use zramgen_core::memory::{MemoryProbe, ProcMeminfo};
use zramgen_core::policy::{compute_device_size, DeviceSizeDecision};

fn synthetic_root(conf: &str, memtotal_kib: u64) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let etc = dir.path().join("etc");
    let proc = dir.path().join("proc");
    std::fs::create_dir_all(&etc).unwrap();
    std::fs::create_dir_all(&proc).unwrap();
    std::fs::write(etc.join("zramgen.conf"), conf).unwrap();
    std::fs::write(
        proc.join("meminfo"),
        format!("MemTotal:        {memtotal_kib} kB\nMemFree:         1024 kB\n"),
    )
    .unwrap();
    dir
}

#[test]
fn test_device_sized_from_live_memory() {
    // 4 GiB system, 10% fraction, limit well above.
    let root = synthetic_root(
        "[zram0]\n\
         memory-limit = 9048\n\
         zram-fraction = 0.10\n",
        4096 * 1024,
    );

    let config = load_config(root.path()).unwrap();
    let total = ProcMeminfo::with_root(root.path()).total_memory_mib().unwrap();
    assert_eq!(total, 4096);

    let decision = compute_device_size(total, &config.devices[0]).unwrap();
    assert_eq!(decision, DeviceSizeDecision::Create { size_mib: 409 });
}

#[test]
fn test_device_skipped_on_large_system() {
    // 16 GiB system, limit 9048 MiB.
    let root = synthetic_root(
        "[zram0]\n\
         memory-limit = 9048\n\
         zram-fraction = 0.10\n",
        16384 * 1024,
    );

    let config = load_config(root.path()).unwrap();
    let total = ProcMeminfo::with_root(root.path()).total_memory_mib().unwrap();

    let decision = compute_device_size(total, &config.devices[0]).unwrap();
    assert_eq!(decision, DeviceSizeDecision::Skip);
}

#[test]
fn test_mixed_decisions_across_devices() {
    let root = synthetic_root(
        "[zram0]\n\
         memory-limit = none\n\
         zram-fraction = 0.25\n\
         [zram1]\n\
         memory-limit = 2048\n",
        8192 * 1024,
    );

    let config = load_config(root.path()).unwrap();
    let total = ProcMeminfo::with_root(root.path()).total_memory_mib().unwrap();

    let decisions: Vec<_> = config
        .devices
        .iter()
        .map(|d| compute_device_size(total, d).unwrap())
        .collect();

    assert_eq!(
        decisions,
        vec![
            DeviceSizeDecision::Create { size_mib: 2048 },
            DeviceSizeDecision::Skip,
        ]
    );
}

#[test]
fn test_no_config_means_no_devices() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(dir.path()).unwrap();
    assert!(config.devices.is_empty());
}
