//! Application layer use cases for the admin tool.
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects from `multiseat-core` to fulfil one
//!   operator action (scan, assign, create user, apply, share).
//! - **Depend on abstractions** (`MonitorEnumerator`, `DeviceQuerier`,
//!   `AccountManager`, `NetworkSharer`) rather than PowerShell or `net.exe`
//!   directly, so the infrastructure can be swapped for fakes in tests.
//! - **Contain no OS calls, no process spawning, no file system access**.
//!
//! # Sub-modules
//!
//! - **`command`**        – The transport error every command-backed trait
//!   reports (not found / launch failure / timeout / non-zero exit).
//! - **`scan_devices`**   – Rebuilds the device catalog from the display API
//!   and the Plug-and-Play query.
//! - **`manage_users`**   – Creates a seat account and registers it.
//! - **`apply_config`**   – Walks seats and users and logs the advisory
//!   device/session association.
//! - **`share_internet`** – One-shot Internet Connection Sharing toggle.
//! - **`workstation`**    – The owned state object (catalog + registries)
//!   that every operator action reads and mutates.

pub mod apply_config;
pub mod command;
pub mod manage_users;
pub mod scan_devices;
pub mod share_internet;
pub mod workstation;
