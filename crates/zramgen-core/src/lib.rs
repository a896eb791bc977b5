//! Size policy and configuration model for Linux zram swap devices.
//!
//! This crate holds the decision-making half of the zramgen generator: the
//! configuration model parsed from `/etc/zramgen.conf`, a probe for total
//! system memory, and the pure policy that maps both to a per-device size.
//! Everything that touches the kernel (module loading, device sizing, swap
//! activation) is left to the systemd units the generator binary emits.
//!
//! # Example
//!
//! ```
//! use zramgen_core::config::DeviceConfig;
//! use zramgen_core::policy::{compute_device_size, DeviceSizeDecision};
//!
//! let device = DeviceConfig::new("zram0");
//! let decision = compute_device_size(1024, &device).unwrap();
//!
//! assert_eq!(decision, DeviceSizeDecision::Create { size_mib: 256 });
//! ```

#![deny(missing_docs)]
#![deny(clippy::panic)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
mod error;
pub mod memory;
pub mod policy;

pub use error::{Error, Result};
