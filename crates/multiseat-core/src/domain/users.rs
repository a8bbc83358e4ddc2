//! Seat → account name registry.
//!
//! Entries are only written after the OS account was created successfully,
//! and they are never removed: deleting OS accounts is outside what Multiseat
//! manages.  Registering a seat a second time replaces its name.

use std::collections::BTreeMap;

use super::seats::SeatId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    users: BTreeMap<SeatId, String>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `username` for `seat`, returning the name it replaced.
    pub fn register(&mut self, seat: SeatId, username: impl Into<String>) -> Option<String> {
        self.users.insert(seat, username.into())
    }

    pub fn get(&self, seat: SeatId) -> Option<&str> {
        self.users.get(&seat).map(String::as_str)
    }

    /// Returns the seat that `username` is registered for, if any.
    pub fn seat_of(&self, username: &str) -> Option<SeatId> {
        self.users
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(username))
            .map(|(seat, _)| *seat)
    }

    /// Iterates `(seat, username)` pairs in ascending seat order.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &str)> {
        self.users.iter().map(|(seat, name)| (*seat, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
