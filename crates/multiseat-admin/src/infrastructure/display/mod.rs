//! Platform-specific monitor enumeration.
//!
//! Returns the bounding rectangle of every connected monitor so a scan can
//! list them as `Monitor at (L,T)-(R,B)`.
//!
//! # Platform implementations
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]` and re-exported as `NativeMonitorEnumerator`:
//!
//! | Module    | OS        | API used                                  |
//! |-----------|-----------|-------------------------------------------|
//! | `windows` | Windows   | `EnumDisplayMonitors` + `GetMonitorInfoW` |
//! | (none)    | elsewhere | reports `MonitorError::Unsupported`       |
//!
//! Multiseat only targets Windows hosts.  On other platforms the scan still
//! runs (useful for development) and simply finds no monitors.

use crate::application::scan_devices::{MonitorEnumerator, MonitorError, MonitorRect};

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use self::windows::WindowsMonitorEnumerator as NativeMonitorEnumerator;

// ── Other platforms ───────────────────────────────────────────────────────────

#[cfg(not(target_os = "windows"))]
pub use self::UnsupportedMonitorEnumerator as NativeMonitorEnumerator;

/// Monitor enumerator for builds without a supported display API.
#[derive(Debug, Default)]
pub struct UnsupportedMonitorEnumerator;

impl UnsupportedMonitorEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl MonitorEnumerator for UnsupportedMonitorEnumerator {
    fn enumerate(&self) -> Result<Vec<MonitorRect>, MonitorError> {
        Err(MonitorError::Unsupported)
    }
}
