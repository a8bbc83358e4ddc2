//! Seat plan files for batch mode.
//!
//! ```toml
//! share_internet = true
//!
//! [[seats]]
//! seat = 1
//! monitor = "#1"
//! keyboard = "HID Keyboard Device"
//! mouse = "#2"
//! username = "seat1"
//!
//! [[seats]]
//! seat = 2
//! username = "seat2"
//! ```
//!
//! Device values use the console's selection syntax: `#N` picks the N-th
//! device of that kind from the scan that starts the batch, anything else is
//! a literal descriptor.

use std::path::Path;

use multiseat_core::{DeviceKind, SeatId};
use serde::{Deserialize, Serialize};

use super::config::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatPlan {
    /// Enable Internet Connection Sharing after applying.
    #[serde(default)]
    pub share_internet: bool,
    #[serde(default)]
    pub seats: Vec<PlannedSeat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedSeat {
    pub seat: SeatId,
    #[serde(default)]
    pub monitor: Option<String>,
    #[serde(default)]
    pub keyboard: Option<String>,
    #[serde(default)]
    pub mouse: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl PlannedSeat {
    /// The device selections present on this seat, in monitor, keyboard,
    /// mouse order.
    pub fn selections(&self) -> impl Iterator<Item = (DeviceKind, &str)> {
        [
            (DeviceKind::Monitor, self.monitor.as_deref()),
            (DeviceKind::Keyboard, self.keyboard.as_deref()),
            (DeviceKind::Mouse, self.mouse.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, selection)| selection.map(|s| (kind, s)))
    }
}

impl SeatPlan {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Reads a seat plan.  Unlike the config file, a missing plan is an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read or
/// [`ConfigError::Parse`] if it is not a valid plan.
pub fn load_plan(path: &Path) -> Result<SeatPlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SeatPlan::from_toml(&content)
}
