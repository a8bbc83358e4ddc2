//! Parsing of the PowerShell `Get-PnpDevice` table into keyboards and mice.
//!
//! The peripheral query selects `FriendlyName, InstanceId` and PowerShell
//! prints it as a fixed-width table:
//!
//! ```text
//! FriendlyName              InstanceId
//! ------------              ----------
//! HID Keyboard Device       HID\VID_046D&PID_C31C&MI_00\7&1A2B3C4D&0&0000
//! HID-compliant mouse       HID\VID_046D&PID_C077\7&2B3C4D5E&0&0000
//! USB Input Device          USB\VID_046D&PID_C31C&MI_01\6&3C4D5E6F&0&0001
//! ```
//!
//! Each data row is split on whitespace; the last field is the instance id
//! and everything before it, re-joined with single spaces, is the friendly
//! name.  The name is then classified by case-insensitive substring match.

/// Which scanned category a peripheral belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralClass {
    Keyboard,
    Mouse,
}

/// Classifies a device by its friendly name.
///
/// `"keyboard"` is checked before `"mouse"`, so a name containing both is a
/// keyboard.  Names containing neither return `None` and are dropped.
pub fn classify_peripheral(friendly_name: &str) -> Option<PeripheralClass> {
    let lower = friendly_name.to_lowercase();
    if lower.contains("keyboard") {
        Some(PeripheralClass::Keyboard)
    } else if lower.contains("mouse") {
        Some(PeripheralClass::Mouse)
    } else {
        None
    }
}

/// Extracts friendly names from the raw table text.
///
/// After trimming, the first line is the header and is skipped, as are blank lines
/// and the `----` rule PowerShell prints under the header.
pub fn parse_pnp_listing(output: &str) -> Vec<String> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !is_rule_line(line))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (_instance_id, name) = fields.split_last()?;
            Some(name.join(" "))
        })
        .collect()
}

fn is_rule_line(line: &str) -> bool {
    line.chars().all(|c| c == '-' || c.is_whitespace())
}

/// Keyboards and mice found in one peripheral listing, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Peripherals {
    pub keyboards: Vec<String>,
    pub mice: Vec<String>,
}

impl Peripherals {
    /// Parses and classifies a full `Get-PnpDevice` table.
    pub fn from_listing(output: &str) -> Self {
        let mut found = Self::default();
        for name in parse_pnp_listing(output) {
            match classify_peripheral(&name) {
                Some(PeripheralClass::Keyboard) => found.keyboards.push(name),
                Some(PeripheralClass::Mouse) => found.mice.push(name),
                None => {}
            }
        }
        found
    }
}
