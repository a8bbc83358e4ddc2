//! # multiseat-core
//!
//! Shared domain library for Multiseat: the device catalog produced by a
//! hardware scan, the seat and user registries the operator fills in, and the
//! parsing rules that turn raw Plug-and-Play listings into keyboards and mice.
//!
//! This crate has zero dependencies on OS APIs, external processes, or UI
//! frameworks.  Everything that touches Windows lives in `multiseat-admin`.
//!
//! # Architecture overview (for beginners)
//!
//! Multiseat turns one Windows PC into several "seats": each seat is a
//! keyboard, a mouse and a monitor used by one person logged in through their
//! own remote-desktop session.  Setting that up takes four steps:
//!
//! 1. **Scan** the hardware (monitors + HID peripherals) into a
//!    [`DeviceCatalog`].
//! 2. **Assign** devices to seats in the [`SeatRegistry`].
//! 3. **Create** one local account per seat and record it in the
//!    [`UserRegistry`].
//! 4. **Apply** the plan and optionally enable Internet Connection Sharing.
//!
//! This crate owns the data for steps 1–3.  It defines:
//!
//! - **`domain::catalog`** – The category → device list map rebuilt on every scan.
//! - **`domain::peripherals`** – Parsing and keyboard/mouse classification of
//!   the `Get-PnpDevice` table.
//! - **`domain::seats`** – Seat identifiers, device kinds and the last-write-wins
//!   assignment registry.
//! - **`domain::users`** – The seat → account name registry.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `multiseat_core::SeatRegistry` instead of `multiseat_core::domain::seats::SeatRegistry`.
pub use domain::catalog::{DeviceCatalog, DeviceCategory};
pub use domain::peripherals::{classify_peripheral, parse_pnp_listing, PeripheralClass, Peripherals};
pub use domain::seats::{
    parse_seat_label, seat_label, seat_options, validate_seat, DeviceKind, SeatId, SeatRegistry,
    ValidationError, MAX_SEATS,
};
pub use domain::users::UserRegistry;
