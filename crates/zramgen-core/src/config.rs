//! Configuration parsing for zram devices.
//!
//! The configuration file is INI-style: one `[zramN]` section per device,
//! with `memory-limit` (MiB, or `none`) and `zram-fraction` keys. Sections
//! whose name does not start with `zram` and keys this crate does not know
//! are ignored, so the file can be shared with other tooling.

use crate::{Error, Result};
use ini::Ini;
use std::path::Path;
use tracing::{debug, info, warn};

/// Location of the configuration file, relative to the root directory.
pub const CONFIG_PATH: &str = "etc/zramgen.conf";

/// Memory limit applied when `memory-limit` is absent.
pub const DEFAULT_MEMORY_LIMIT_MIB: u64 = 2 * 1024;

/// Fraction of total memory used when `zram-fraction` is absent.
pub const DEFAULT_ZRAM_FRACTION: f64 = 0.25;

/// Configuration for a single zram device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Device name from the section header (e.g. `zram0`).
    pub name: String,

    /// Upper bound on eligible system memory in MiB.
    ///
    /// `None` means no limit; the device is created regardless of how much
    /// memory the system has.
    pub memory_limit_mib: Option<u64>,

    /// Fraction of total system memory given to the device.
    pub zram_fraction: f64,
}

impl DeviceConfig {
    /// Create a device configuration with default settings.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            memory_limit_mib: Some(DEFAULT_MEMORY_LIMIT_MIB),
            zram_fraction: DEFAULT_ZRAM_FRACTION,
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Devices to configure, in file order.
    pub devices: Vec<DeviceConfig>,
}

impl Config {
    /// Parse configuration from INI-style text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the text is not valid INI
    /// or a recognized key has an unparseable value.
    pub fn from_ini_str(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| Error::InvalidConfiguration(format!("malformed configuration: {e}")))?;

        let mut devices = Vec::new();
        for (section, properties) in ini.iter() {
            // Keys before the first section header belong to no device.
            let Some(name) = section else { continue };

            if !name.starts_with("zram") {
                debug!("ignoring section \"{name}\"");
                continue;
            }

            let mut device = DeviceConfig::new(name);

            if let Some(val) = properties.get("memory-limit") {
                device.memory_limit_mib = if val == "none" {
                    None
                } else {
                    Some(val.parse().map_err(|_| {
                        Error::InvalidConfiguration(format!(
                            "{name}: invalid memory-limit \"{val}\""
                        ))
                    })?)
                };
            }

            if let Some(val) = properties.get("zram-fraction") {
                let fraction: f64 = val.parse().map_err(|_| {
                    Error::InvalidConfiguration(format!("{name}: invalid zram-fraction \"{val}\""))
                })?;
                if fraction.is_finite() && fraction > 0.0 {
                    device.zram_fraction = fraction;
                } else {
                    warn!(
                        "{name}: zram-fraction {fraction} is not positive, \
                         using default {DEFAULT_ZRAM_FRACTION}"
                    );
                }
            }

            info!(
                "found configuration for {name}: memory-limit={} zram-fraction={}",
                device
                    .memory_limit_mib
                    .map_or_else(|| "none".to_string(), |v| format!("{v}MiB")),
                device.zram_fraction
            );
            devices.push(device);
        }

        Ok(Self { devices })
    }
}

/// Load configuration from `{root}/etc/zramgen.conf`.
///
/// A missing file is not an error: it yields an empty device list, meaning
/// nothing to set up on this machine.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the file exists but cannot be read, or
/// [`Error::InvalidConfiguration`] if it cannot be parsed.
pub fn load_config(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_PATH);
    if !path.exists() {
        info!("no configuration file found, nothing to set up");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::IoError(format!("failed to read {}: {e}", path.display())))?;
    Config::from_ini_str(&content)
}
