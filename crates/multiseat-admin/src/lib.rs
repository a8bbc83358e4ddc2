//! multiseat-admin library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does multiseat-admin do? (for beginners)
//!
//! The admin tool runs on the PC being shared.  An operator uses it to:
//!
//! 1. Scan the attached monitors, keyboards and mice.
//! 2. Assign one of each to a numbered seat (up to 10 by default).
//! 3. Create a local Windows account per seat and add it to
//!    `Remote Desktop Users`, so each person gets their own session.
//! 4. Apply the plan (an advisory log of who uses which devices) and enable
//!    Internet Connection Sharing.
//!
//! Every OS interaction (PowerShell, `net.exe`, the Win32 display API) sits
//! behind a narrow trait so the use cases can be tested with fakes instead of
//! mutating the test machine.

/// Application layer: use cases and the capability traits they depend on.
pub mod application;

/// Infrastructure layer: OS adapters, config file, logging, and the console.
pub mod infrastructure;
