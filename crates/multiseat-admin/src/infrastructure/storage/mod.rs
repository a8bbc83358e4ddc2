//! Storage infrastructure: TOML files the operator edits by hand.
//!
//! - **`config`** – Tool settings (seat maximum, account password and group,
//!   sharing interface, command timeout, log file).  Missing file means
//!   defaults.
//! - **`plan`**   – A seat plan for batch mode: which devices and which
//!   account go on each seat.
//!
//! Neither file stores runtime state; the catalog and registries live only in
//! memory for the duration of one run.

pub mod config;
pub mod plan;
