//! Applies the seat plan.
//!
//! Applying is advisory bookkeeping: for every seat that has an account, the
//! devices assigned to that seat are logged as belonging to that user's
//! session.  Nothing is redirected at the OS level; the actual keyboard, mouse
//! and monitor routing happens in the remote-session client's device
//! redirection settings.
//!
//! Under [`ApplyPolicy::RequireDevices`] a seat with an account but no
//! devices makes the whole apply fail, so the operator notices before handing
//! out logins.  The default [`ApplyPolicy::Advisory`] never fails.

use std::collections::BTreeMap;

use multiseat_core::{DeviceKind, SeatId, SeatRegistry, UserRegistry};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("seats with a user but no assigned devices: {seats:?}")]
    SeatWithoutDevices { seats: Vec<SeatId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyPolicy {
    /// Log associations, never fail.
    #[default]
    Advisory,
    /// Fail when any user seat has no devices.
    RequireDevices,
}

/// What was applied for one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatReport {
    pub seat: SeatId,
    pub username: String,
    pub devices: BTreeMap<DeviceKind, String>,
}

/// Outcome of one apply, in ascending seat order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub seats: Vec<SeatReport>,
}

impl ApplyReport {
    /// Seats whose user has nothing assigned.
    pub fn seats_without_devices(&self) -> Vec<SeatId> {
        self.seats
            .iter()
            .filter(|report| report.devices.is_empty())
            .map(|report| report.seat)
            .collect()
    }
}

/// Walks every seat with a registered user and logs its device association.
///
/// # Errors
///
/// Only under [`ApplyPolicy::RequireDevices`]: returns
/// [`ApplyError::SeatWithoutDevices`] listing every user seat with no devices.
/// Nothing is logged as applied in that case.
pub fn apply(
    seats: &SeatRegistry,
    users: &UserRegistry,
    policy: ApplyPolicy,
) -> Result<ApplyReport, ApplyError> {
    let report = ApplyReport {
        seats: users
            .iter()
            .map(|(seat, username)| SeatReport {
                seat,
                username: username.to_string(),
                devices: seats.devices(seat).cloned().unwrap_or_default(),
            })
            .collect(),
    };

    if policy == ApplyPolicy::RequireDevices {
        let empty = report.seats_without_devices();
        if !empty.is_empty() {
            return Err(ApplyError::SeatWithoutDevices { seats: empty });
        }
    }

    for seat in &report.seats {
        info!(
            "Enabling remote sessions for user {} on Seat {}",
            seat.username, seat.seat
        );
        for (kind, device) in &seat.devices {
            info!("Assigned {kind} {device} to {}", seat.username);
        }
    }
    info!("Configuration applied successfully.");
    Ok(report)
}
