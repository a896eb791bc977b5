//! Device size policy.
//!
//! Decides whether a zram device should exist on this machine at all and, if
//! so, how large it should be. The computation is pure: it can be evaluated
//! once per configured device, in any order, with no shared state.

use crate::config::DeviceConfig;
use crate::{Error, Result};

/// Outcome of a size-policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSizeDecision {
    /// The system has more memory than the configured limit; no device
    /// should be created.
    Skip,
    /// Create the device.
    Create {
        /// Target device size in whole MiB.
        size_mib: u64,
    },
}

/// Compute the target size of a zram device.
///
/// A configured `memory-limit` is inclusive: a system with exactly that much
/// memory still gets the device, only strictly more memory skips it. The
/// size is `total_memory_mib * zram_fraction`, rounded down to a whole MiB;
/// conversion to the byte granularity the kernel expects is left to the
/// device-creation side.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `zram_fraction` is
/// non-positive or non-finite.
pub fn compute_device_size(
    total_memory_mib: u64,
    config: &DeviceConfig,
) -> Result<DeviceSizeDecision> {
    if !(config.zram_fraction.is_finite() && config.zram_fraction > 0.0) {
        return Err(Error::InvalidConfiguration(format!(
            "{}: zram-fraction must be a positive finite number, got {}",
            config.name, config.zram_fraction
        )));
    }

    if let Some(limit) = config.memory_limit_mib {
        if total_memory_mib > limit {
            return Ok(DeviceSizeDecision::Skip);
        }
    }

    let size_mib = (config.zram_fraction * total_memory_mib as f64).floor() as u64;
    Ok(DeviceSizeDecision::Create { size_mib })
}
