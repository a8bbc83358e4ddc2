//! ScanDevicesUseCase: rebuilds the device catalog from the OS.
//!
//! A scan has two halves with different failure rules:
//!
//! - **Monitors** come from a synchronous [`MonitorEnumerator`].  This half is
//!   best-effort: an enumeration failure is logged and treated as "no
//!   monitors", never surfaced to the operator.
//! - **Keyboards and mice** come from a [`DeviceQuerier`] that runs the
//!   Plug-and-Play query and returns its table text.  If that command cannot be
//!   launched, times out, or exits non-zero the scan fails with
//!   [`ScanError`].
//!
//! The monitor list is written to the catalog before the peripheral query
//! runs, so a failed peripheral query still leaves fresh monitor data behind.

use std::sync::Arc;

use async_trait::async_trait;
use multiseat_core::{DeviceCatalog, DeviceCategory, Peripherals};
use thiserror::Error;
use tracing::{info, warn};

use super::command::CommandError;

/// Error type for the scan use case.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The peripheral query failed to launch, timed out, or exited non-zero.
    #[error("peripheral scan failed: {0}")]
    Query(#[from] CommandError),
}

/// Error type for monitor enumeration.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The display API call failed.
    #[error("platform API error while enumerating monitors: {0}")]
    Platform(String),

    /// This build has no display API to call.
    #[error("monitor enumeration is not supported on this platform")]
    Unsupported,
}

/// Bounding rectangle of one monitor in virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorRect {
    /// Catalog descriptor, e.g. `"Monitor at (0,0)-(1920,1080)"`.
    pub fn descriptor(&self) -> String {
        format!(
            "Monitor at ({},{})-({},{})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Returns the connected monitors in enumeration order.
pub trait MonitorEnumerator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`MonitorError`] if the display API cannot be queried.
    fn enumerate(&self) -> Result<Vec<MonitorRect>, MonitorError>;
}

/// Runs the HID/keyboard/mouse Plug-and-Play query.
#[async_trait]
pub trait DeviceQuerier: Send + Sync {
    /// Returns the raw `FriendlyName / InstanceId` table printed by the query.
    async fn query_peripherals(&self) -> Result<String, CommandError>;
}

/// Counts from one completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub monitors: usize,
    pub keyboards: usize,
    pub mice: usize,
}

pub struct ScanDevicesUseCase {
    monitors: Arc<dyn MonitorEnumerator>,
    querier: Arc<dyn DeviceQuerier>,
}

impl ScanDevicesUseCase {
    pub fn new(monitors: Arc<dyn MonitorEnumerator>, querier: Arc<dyn DeviceQuerier>) -> Self {
        Self { monitors, querier }
    }

    /// Scans monitors and peripherals into `catalog`.
    ///
    /// Only the `monitors`, `keyboards` and `mice` keys are replaced; any other
    /// key in the catalog is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Query`] when the peripheral query fails.  The
    /// monitor list has already been replaced at that point.
    pub async fn scan(&self, catalog: &mut DeviceCatalog) -> Result<ScanSummary, ScanError> {
        let monitors: Vec<String> = match self.monitors.enumerate() {
            Ok(rects) => rects.iter().map(MonitorRect::descriptor).collect(),
            Err(e) => {
                warn!("monitor enumeration failed, continuing without monitors: {e}");
                Vec::new()
            }
        };
        let monitor_count = monitors.len();
        catalog.replace(DeviceCategory::Monitors, monitors);

        let listing = self.querier.query_peripherals().await?;
        let Peripherals { keyboards, mice } = Peripherals::from_listing(&listing);

        let summary = ScanSummary {
            monitors: monitor_count,
            keyboards: keyboards.len(),
            mice: mice.len(),
        };
        catalog.replace(DeviceCategory::Keyboards, keyboards);
        catalog.replace(DeviceCategory::Mice, mice);

        info!(
            "Hardware scan completed: {} monitor(s), {} keyboard(s), {} mice.",
            summary.monitors, summary.keyboards, summary.mice
        );
        Ok(summary)
    }
}
