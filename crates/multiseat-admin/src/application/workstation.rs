//! The owned state of one administration session.
//!
//! [`Workstation`] bundles the device catalog and both registries so that
//! every operator action receives its state explicitly instead of reaching for
//! globals.  It also carries the configured seat maximum and adds the checks
//! the bare registries leave out:
//!
//! - [`Workstation::assign_checked`] rejects seats outside `1..=max_seats`.
//! - [`Workstation::resolve_device`] turns an operator selection (`#2` or a
//!   device name) into a descriptor from the current catalog.
//!
//! The raw [`SeatRegistry::assign`] stays reachable through
//! [`Workstation::seats_mut`] for callers that want the lenient upsert.

use multiseat_core::{
    validate_seat, DeviceCatalog, DeviceKind, SeatId, SeatRegistry, UserRegistry,
    ValidationError, MAX_SEATS,
};
use thiserror::Error;

/// Error type for resolving an operator device selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no {kind} #{index} in the last scan ({available} available)")]
    IndexOutOfRange {
        kind: DeviceKind,
        index: usize,
        available: usize,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct Workstation {
    pub catalog: DeviceCatalog,
    pub seats: SeatRegistry,
    pub users: UserRegistry,
    max_seats: SeatId,
}

impl Default for Workstation {
    fn default() -> Self {
        Self::new(MAX_SEATS)
    }
}

impl Workstation {
    pub fn new(max_seats: SeatId) -> Self {
        Self {
            catalog: DeviceCatalog::new(),
            seats: SeatRegistry::new(),
            users: UserRegistry::new(),
            max_seats,
        }
    }

    pub fn max_seats(&self) -> SeatId {
        self.max_seats
    }

    pub fn seats_mut(&mut self) -> &mut SeatRegistry {
        &mut self.seats
    }

    /// Checks `seat` against the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SeatOutOfRange`].
    pub fn check_seat(&self, seat: SeatId) -> Result<SeatId, ValidationError> {
        validate_seat(seat, self.max_seats)
    }

    /// Bounds-checked assignment.  Returns the device that was replaced.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::SeatOutOfRange`] for seats outside `1..=max_seats`.
    /// - [`ValidationError::EmptyDevice`] for a blank descriptor.
    pub fn assign_checked(
        &mut self,
        seat: SeatId,
        kind: DeviceKind,
        device: &str,
    ) -> Result<Option<String>, ValidationError> {
        self.check_seat(seat)?;
        let device = device.trim();
        if device.is_empty() {
            return Err(ValidationError::EmptyDevice);
        }
        Ok(self.seats.assign(seat, kind, device))
    }

    /// Candidate devices for `kind` from the last scan.
    pub fn candidates(&self, kind: DeviceKind) -> &[String] {
        self.catalog.devices(kind.category())
    }

    /// Resolves an operator selection against the current catalog.
    ///
    /// `#N` (1-based) picks the N-th candidate for `kind`.  Anything else is
    /// taken as a literal descriptor, whether or not the last scan saw it.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::IndexOutOfRange`] when `#N` has no candidate.
    /// - [`SelectionError::Invalid`] for an empty selection.
    pub fn resolve_device(&self, kind: DeviceKind, selection: &str) -> Result<String, SelectionError> {
        let selection = selection.trim();
        if selection.is_empty() {
            return Err(ValidationError::EmptyDevice.into());
        }
        let Some(index) = selection
            .strip_prefix('#')
            .and_then(|n| n.parse::<usize>().ok())
        else {
            return Ok(selection.to_string());
        };

        let candidates = self.candidates(kind);
        index
            .checked_sub(1)
            .and_then(|i| candidates.get(i))
            .cloned()
            .ok_or(SelectionError::IndexOutOfRange {
                kind,
                index,
                available: candidates.len(),
            })
    }
}
