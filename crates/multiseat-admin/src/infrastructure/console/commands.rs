//! Parsing of one console line into a [`ConsoleCommand`].
//!
//! Grammar (words separated by whitespace, command names case-insensitive):
//!
//! ```text
//! scan
//! devices
//! options     <monitor|keyboard|mouse>
//! seats
//! assign      <seat> <monitor|keyboard|mouse> <#index | device name...>
//! assignments
//! user        <seat> <username>
//! users
//! apply
//! share
//! help
//! quit | exit
//! ```
//!
//! `<seat>` is a bare number or `Seat N`.  The device name for `assign` is
//! everything after the kind, so descriptors with spaces need no quoting.

use multiseat_core::{parse_seat_label, DeviceKind, SeatId, ValidationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Scan,
    Devices,
    Options(DeviceKind),
    Seats,
    Assign {
        seat: SeatId,
        kind: DeviceKind,
        selection: String,
    },
    Assignments,
    User {
        seat: SeatId,
        username: String,
    },
    Users,
    Apply,
    Share,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a seat number: {0:?}")]
    Seat(String),

    #[error(transparent)]
    Kind(#[from] ValidationError),
}

const ASSIGN_USAGE: &str = "assign <seat> <monitor|keyboard|mouse> <#index|device name>";
const USER_USAGE: &str = "user <seat> <username>";
const OPTIONS_USAGE: &str = "options <monitor|keyboard|mouse>";

/// Parses one input line.  Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`ParseError`] for unknown commands, missing arguments, bad seat
/// numbers and unknown device kinds.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ParseError> {
    let line = line.trim();
    let Some((name, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "scan" => ConsoleCommand::Scan,
        "devices" => ConsoleCommand::Devices,
        "seats" => ConsoleCommand::Seats,
        "assignments" => ConsoleCommand::Assignments,
        "users" => ConsoleCommand::Users,
        "apply" => ConsoleCommand::Apply,
        "share" => ConsoleCommand::Share,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "options" => {
            let (kind, _) = split_word(rest).ok_or(ParseError::Usage(OPTIONS_USAGE))?;
            ConsoleCommand::Options(kind.parse()?)
        }
        "assign" => {
            let (seat, rest) = parse_seat(rest, ASSIGN_USAGE)?;
            let (kind, selection) = split_word(rest).ok_or(ParseError::Usage(ASSIGN_USAGE))?;
            let kind: DeviceKind = kind.parse()?;
            if selection.is_empty() {
                return Err(ParseError::Usage(ASSIGN_USAGE));
            }
            ConsoleCommand::Assign {
                seat,
                kind,
                selection: selection.to_string(),
            }
        }
        "user" => {
            let (seat, username) = parse_seat(rest, USER_USAGE)?;
            if username.is_empty() {
                return Err(ParseError::Usage(USER_USAGE));
            }
            ConsoleCommand::User {
                seat,
                username: username.to_string(),
            }
        }
        _ => return Err(ParseError::Unknown(name.to_string())),
    };
    Ok(Some(command))
}

/// Splits off the first whitespace-separated word; the remainder is trimmed.
fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((input, "")),
    }
}

/// Reads a seat as `N` or `Seat N` from the front of `input`.
fn parse_seat<'a>(input: &'a str, usage: &'static str) -> Result<(SeatId, &'a str), ParseError> {
    let (first, rest) = split_word(input).ok_or(ParseError::Usage(usage))?;
    let (label, rest) = if first.eq_ignore_ascii_case("seat") {
        let (number, rest) = split_word(rest).ok_or(ParseError::Usage(usage))?;
        (number, rest)
    } else {
        (first, rest)
    };
    let seat = parse_seat_label(label).ok_or_else(|| ParseError::Seat(label.to_string()))?;
    Ok((seat, rest))
}
