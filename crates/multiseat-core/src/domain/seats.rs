//! Seats and the seat assignment registry.
//!
//! A *seat* is one logical workstation position: a monitor, a keyboard and a
//! mouse that one person uses through their own session.  Seats are numbered
//! from 1; the operator surface offers `Seat 1` … `Seat N` where N is the
//! configured maximum (10 by default).
//!
//! # Assignment semantics
//!
//! [`SeatRegistry::assign`] is a plain upsert keyed by `(seat, kind)`:
//!
//! - The last assignment for a key wins; the previous device is returned.
//! - The device string is not checked against the current catalog.
//! - The seat number is not checked against the configured maximum.
//! - Nothing stops the same physical device being assigned to two seats.
//!
//! Callers that want bounds checking run [`validate_seat`] first.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::catalog::DeviceCategory;

/// Seat identifier.  Valid seats are `1..=max_seats`.
pub type SeatId = u32;

/// Default number of seats offered to the operator.
pub const MAX_SEATS: SeatId = 10;

/// Error type for operator input that breaks a seat invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The seat number is 0 or above the configured maximum.
    #[error("seat {seat} is outside the allowed range 1..={max}")]
    SeatOutOfRange { seat: SeatId, max: SeatId },

    /// The device kind label is not `monitor`, `keyboard` or `mouse`.
    #[error("unknown device kind {0:?} (expected monitor, keyboard or mouse)")]
    UnknownDeviceKind(String),

    /// An empty device descriptor was submitted.
    #[error("device descriptor must not be empty")]
    EmptyDevice,
}

/// The kind of device a seat slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Monitor,
    Keyboard,
    Mouse,
}

impl DeviceKind {
    /// Lowercase label used in logs and on the console.
    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::Monitor => "monitor",
            DeviceKind::Keyboard => "keyboard",
            DeviceKind::Mouse => "mouse",
        }
    }

    /// The catalog category that lists candidate devices for this kind.
    pub fn category(self) -> DeviceCategory {
        match self {
            DeviceKind::Monitor => DeviceCategory::Monitors,
            DeviceKind::Keyboard => DeviceCategory::Keyboards,
            DeviceKind::Mouse => DeviceCategory::Mice,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monitor" => Ok(DeviceKind::Monitor),
            "keyboard" => Ok(DeviceKind::Keyboard),
            "mouse" => Ok(DeviceKind::Mouse),
            _ => Err(ValidationError::UnknownDeviceKind(s.to_string())),
        }
    }
}

/// Checks that `seat` lies in `1..=max`.
///
/// # Errors
///
/// Returns [`ValidationError::SeatOutOfRange`] otherwise.
pub fn validate_seat(seat: SeatId, max: SeatId) -> Result<SeatId, ValidationError> {
    if (1..=max).contains(&seat) {
        Ok(seat)
    } else {
        Err(ValidationError::SeatOutOfRange { seat, max })
    }
}

/// Formats the label shown for a seat, e.g. `"Seat 3"`.
pub fn seat_label(seat: SeatId) -> String {
    format!("Seat {seat}")
}

/// Returns the selectable seat labels `Seat 1` … `Seat max`.
pub fn seat_options(max: SeatId) -> Vec<String> {
    (1..=max).map(seat_label).collect()
}

/// Parses a `"Seat N"` label (or a bare number) back into a seat id.
pub fn parse_seat_label(label: &str) -> Option<SeatId> {
    let trimmed = label.trim();
    let number = trimmed.strip_prefix("Seat").unwrap_or(trimmed);
    number.trim().parse().ok()
}

/// Seat → (device kind → device descriptor).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatRegistry {
    seats: BTreeMap<SeatId, BTreeMap<DeviceKind, String>>,
}

impl SeatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `device` to `(seat, kind)`, returning the device it replaced.
    ///
    /// Never fails; see the module docs for what is deliberately not checked.
    pub fn assign(
        &mut self,
        seat: SeatId,
        kind: DeviceKind,
        device: impl Into<String>,
    ) -> Option<String> {
        let device = device.into();
        info!("Assigned {kind}: {device} to Seat {seat}");
        self.seats.entry(seat).or_default().insert(kind, device)
    }

    /// Returns the device assigned to `(seat, kind)`.
    pub fn get(&self, seat: SeatId, kind: DeviceKind) -> Option<&str> {
        self.seats.get(&seat)?.get(&kind).map(String::as_str)
    }

    /// Returns every assignment of one seat.
    pub fn devices(&self, seat: SeatId) -> Option<&BTreeMap<DeviceKind, String>> {
        self.seats.get(&seat)
    }

    /// Iterates seats in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &BTreeMap<DeviceKind, String>)> {
        self.seats.iter().map(|(id, devices)| (*id, devices))
    }

    /// Seats that currently hold `device` in any slot.
    pub fn seats_holding(&self, device: &str) -> Vec<SeatId> {
        self.seats
            .iter()
            .filter(|(_, devices)| devices.values().any(|d| d == device))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
