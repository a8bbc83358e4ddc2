//! Domain entities for Multiseat.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application (here: what a seat is, how a
//!   device is classified, what "last write wins" means for assignments).
//! - Has **no** imports from OS APIs, process spawning, or UI code.
//! - Can be compiled and tested on any platform without a Windows machine.
//!
//! Outer layers (application, infrastructure, console) depend on the domain,
//! but the domain never depends on them.

/// Category → device descriptor lists produced by a hardware scan.
pub mod catalog;

/// `Get-PnpDevice` table parsing and keyboard/mouse classification.
pub mod peripherals;

/// Seat identifiers, device kinds, and the seat assignment registry.
pub mod seats;

/// Seat → account name registry.
pub mod users;
