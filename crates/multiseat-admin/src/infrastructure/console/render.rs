//! Text rendering for the console.  Pure functions over domain state.

use std::fmt::Write;

use multiseat_core::{
    seat_options, DeviceCatalog, DeviceCategory, DeviceKind, SeatId, SeatRegistry, UserRegistry,
};

use crate::application::apply_config::ApplyReport;
use crate::application::scan_devices::ScanSummary;

pub const HELP: &str = "\
Commands:
  scan                                   Scan monitors, keyboards and mice
  devices                                Show the last scan
  options <monitor|keyboard|mouse>       Show numbered candidates for a kind
  seats                                  Show the selectable seats
  assign <seat> <kind> <#index|name>     Assign a device to a seat
  assignments                            Show devices per seat
  user <seat> <username>                 Create the account for a seat
  users                                  Show accounts per seat
  apply                                  Apply the seat configuration
  share                                  Enable Internet Connection Sharing
  help                                   Show this text
  quit                                   Exit";

/// Every catalog category as a `**Title:**` heading followed by
/// `- N: device` lines.  Scanned categories come first in display order.
pub fn render_devices(catalog: &DeviceCatalog) -> String {
    if catalog.is_empty() {
        return "No devices scanned yet. Run `scan` first.".to_string();
    }

    let mut out = String::new();
    for category in DeviceCategory::ALL {
        if catalog.contains_key(category.key()) {
            push_device_list(&mut out, category.title(), catalog.devices(category));
        }
    }
    let foreign = catalog
        .iter()
        .filter(|(key, _)| DeviceCategory::ALL.iter().all(|c| c.key() != *key));
    for (key, devices) in foreign {
        push_device_list(&mut out, &capitalise(key), devices);
    }
    out.trim_end().to_string()
}

fn push_device_list(out: &mut String, title: &str, devices: &[String]) {
    let _ = writeln!(out, "**{title}:**");
    for (i, device) in devices.iter().enumerate() {
        let _ = writeln!(out, "- {}: {device}", i + 1);
    }
    out.push('\n');
}

fn capitalise(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Numbered picker for one kind: `#1: device`.
pub fn render_device_options(kind: DeviceKind, candidates: &[String]) -> String {
    if candidates.is_empty() {
        return format!("No {} found. Run `scan` first.", kind.category().key());
    }
    candidates
        .iter()
        .enumerate()
        .map(|(i, device)| format!("#{}: {device}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_seat_options(max: SeatId) -> String {
    seat_options(max).join("\n")
}

/// `**Seat N:**` followed by `- kind: device` for every seat with devices.
pub fn render_assignments(seats: &SeatRegistry) -> String {
    if seats.is_empty() {
        return "No devices assigned yet.".to_string();
    }
    let mut out = String::new();
    for (seat, devices) in seats.iter() {
        let _ = writeln!(out, "**Seat {seat}:**");
        for (kind, device) in devices {
            let _ = writeln!(out, "- {kind}: {device}");
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub fn render_users(users: &UserRegistry) -> String {
    if users.is_empty() {
        return "No users created yet.".to_string();
    }
    users
        .iter()
        .map(|(seat, username)| format!("Seat {seat}: {username}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_scan_summary(summary: &ScanSummary) -> String {
    format!(
        "Hardware scan completed: {} monitor(s), {} keyboard(s), {} mouse/mice.",
        summary.monitors, summary.keyboards, summary.mice
    )
}

pub fn render_apply_report(report: &ApplyReport) -> String {
    let mut out = String::new();
    for seat in &report.seats {
        let _ = writeln!(
            out,
            "Enabling remote sessions for user {} on Seat {}",
            seat.username, seat.seat
        );
        for (kind, device) in &seat.devices {
            let _ = writeln!(out, "  {kind}: {device}");
        }
    }
    let empty = report.seats_without_devices();
    if !empty.is_empty() {
        let seats: Vec<String> = empty.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "Warning: no devices assigned to seat(s) {}", seats.join(", "));
    }
    out.push_str("Configuration applied successfully.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::apply_config::SeatReport;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_devices_uses_headings_and_numbered_lines() {
        // Arrange
        let mut catalog = DeviceCatalog::new();
        catalog.replace(
            DeviceCategory::Monitors,
            vec!["Monitor at (0,0)-(1920,1080)".to_string()],
        );
        catalog.replace(DeviceCategory::Keyboards, vec![]);
        catalog.replace(
            DeviceCategory::Mice,
            vec!["HID-compliant mouse".to_string(), "USB Optical Mouse".to_string()],
        );

        // Act
        let text = render_devices(&catalog);

        // Assert
        assert_eq!(
            text,
            "**Monitors:**\n- 1: Monitor at (0,0)-(1920,1080)\n\n\
             **Keyboards:**\n\n\
             **Mice:**\n- 1: HID-compliant mouse\n- 2: USB Optical Mouse"
        );
    }

    #[test]
    fn test_render_devices_includes_foreign_keys_last() {
        let mut catalog = DeviceCatalog::new();
        catalog.insert_raw("tablets", vec!["Wacom".to_string()]);
        catalog.replace(DeviceCategory::Mice, vec![]);

        let text = render_devices(&catalog);

        assert_eq!(text, "**Mice:**\n\n**Tablets:**\n- 1: Wacom");
    }

    #[test]
    fn test_render_devices_before_any_scan() {
        assert!(render_devices(&DeviceCatalog::new()).contains("scan"));
    }

    #[test]
    fn test_render_device_options_numbers_from_one() {
        let candidates = vec!["A".to_string(), "B".to_string()];
        assert_eq!(render_device_options(DeviceKind::Mouse, &candidates), "#1: A\n#2: B");
    }

    #[test]
    fn test_render_device_options_empty_names_mice() {
        assert_eq!(
            render_device_options(DeviceKind::Mouse, &[]),
            "No mice found. Run `scan` first."
        );
    }

    #[test]
    fn test_render_seat_options() {
        assert_eq!(render_seat_options(3), "Seat 1\nSeat 2\nSeat 3");
    }

    #[test]
    fn test_render_assignments_groups_by_seat() {
        // Arrange
        let mut seats = SeatRegistry::new();
        seats.assign(3, DeviceKind::Keyboard, "Logitech K120");
        seats.assign(3, DeviceKind::Monitor, "DELL-24");
        seats.assign(1, DeviceKind::Mouse, "HID-compliant mouse");

        // Act
        let text = render_assignments(&seats);

        // Assert
        assert_eq!(
            text,
            "**Seat 1:**\n- mouse: HID-compliant mouse\n\n\
             **Seat 3:**\n- monitor: DELL-24\n- keyboard: Logitech K120"
        );
    }

    #[test]
    fn test_render_users_lists_in_seat_order() {
        let mut users = UserRegistry::new();
        users.register(2, "bravo");
        users.register(1, "alpha");

        assert_eq!(render_users(&users), "Seat 1: alpha\nSeat 2: bravo");
    }

    #[test]
    fn test_render_apply_report_warns_about_empty_seats() {
        let report = ApplyReport {
            seats: vec![SeatReport {
                seat: 5,
                username: "echo".to_string(),
                devices: BTreeMap::new(),
            }],
        };

        let text = render_apply_report(&report);

        assert!(text.contains("Enabling remote sessions for user echo on Seat 5"));
        assert!(text.contains("Warning: no devices assigned to seat(s) 5"));
        assert!(text.ends_with("Configuration applied successfully."));
    }
}
