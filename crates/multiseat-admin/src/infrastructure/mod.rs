//! Infrastructure layer for the admin tool.
//!
//! Contains OS-facing adapters: the async process runner, the PowerShell and
//! `net.exe` wrappers, Win32 monitor enumeration, config file storage, logging
//! setup, and the operator console.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `multiseat_core`, but MUST NOT be imported by the `application` or domain
//! layers (test modules excepted, which borrow the fakes from `mock`).
//!
//! # Sub-modules
//!
//! - **`process`**  – Runs one external command under a timeout and classifies
//!   the outcome as a `CommandError`.
//! - **`pnp`**      – `DeviceQuerier` backed by `Get-PnpDevice`.
//! - **`accounts`** – `AccountManager` backed by `net user` / `net localgroup`.
//! - **`sharing`**  – `NetworkSharer` backed by `Set-NetConnectionSharing`.
//! - **`display`**  – `MonitorEnumerator` for the current platform.
//! - **`mock`**     – In-memory fakes for every capability trait.
//! - **`storage`**  – TOML config file and seat plan files.
//! - **`logging`**  – stdout + append-only file log setup.
//! - **`console`**  – Command parsing, rendering and dispatch for the operator.

pub mod accounts;
pub mod console;
pub mod display;
pub mod logging;
pub mod mock;
pub mod pnp;
pub mod process;
pub mod sharing;
pub mod storage;
