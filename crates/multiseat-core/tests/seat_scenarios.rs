//! Integration tests for the multiseat-core public API.
//!
//! These walk the domain types the way one admin session does: parse a scan
//! into a catalog, assign devices to seats, register users.

use multiseat_core::{
    parse_seat_label, seat_options, validate_seat, DeviceCatalog, DeviceCategory, DeviceKind,
    Peripherals, SeatRegistry, UserRegistry, ValidationError, MAX_SEATS,
};

const PNP_TABLE: &str = "
FriendlyName                      InstanceId
------------                      ----------
HID Keyboard Device               HID\\VID_413C&PID_2107\\7&1A2B&0&0000
HID-compliant mouse               HID\\VID_046D&PID_C077\\7&2C3D&0&0000
Logitech USB Keyboard Mouse Combo USB\\VID_046D&PID_C52B\\5&1&0&1
HID-compliant consumer control device HID\\VID_046D&PID_C52B&MI_01\\8&1&0&0001
";

#[test]
fn test_scan_listing_populates_catalog_categories() {
    // Arrange
    let peripherals = Peripherals::from_listing(PNP_TABLE);
    let mut catalog = DeviceCatalog::new();

    // Act
    catalog.replace(DeviceCategory::Keyboards, peripherals.keyboards);
    catalog.replace(DeviceCategory::Mice, peripherals.mice);
    catalog.replace(DeviceCategory::Monitors, Vec::new());

    // Assert
    // A name containing both words counts as a keyboard only.
    assert_eq!(
        catalog.devices(DeviceCategory::Keyboards),
        ["HID Keyboard Device", "Logitech USB Keyboard Mouse Combo"]
    );
    assert_eq!(catalog.devices(DeviceCategory::Mice), ["HID-compliant mouse"]);
    assert!(catalog.devices(DeviceCategory::Monitors).is_empty());
    assert_eq!(catalog.device_count(), 3);
}

#[test]
fn test_seat_three_last_write_wins() {
    // Arrange
    let mut seats = SeatRegistry::new();

    // Act
    seats.assign(3, DeviceKind::Monitor, "DELL-24");
    seats.assign(3, DeviceKind::Keyboard, "Logitech K120");
    let replaced = seats.assign(3, DeviceKind::Monitor, "HP-27");

    // Assert
    assert_eq!(replaced.as_deref(), Some("DELL-24"));
    assert_eq!(seats.get(3, DeviceKind::Monitor), Some("HP-27"));
    assert_eq!(seats.get(3, DeviceKind::Keyboard), Some("Logitech K120"));
    assert_eq!(seats.len(), 1);
}

#[test]
fn test_registry_is_lenient_but_validation_is_not() {
    let mut seats = SeatRegistry::new();

    seats.assign(11, DeviceKind::Mouse, "HID-compliant mouse");

    assert_eq!(seats.get(11, DeviceKind::Mouse), Some("HID-compliant mouse"));
    assert_eq!(
        validate_seat(11, MAX_SEATS),
        Err(ValidationError::SeatOutOfRange { seat: 11, max: 10 })
    );
}

#[test]
fn test_seat_labels_round_trip_through_options() {
    let options = seat_options(MAX_SEATS);

    let parsed: Vec<_> = options.iter().filter_map(|label| parse_seat_label(label)).collect();

    assert_eq!(parsed, (1..=MAX_SEATS).collect::<Vec<_>>());
}

#[test]
fn test_user_registry_replaces_user_on_same_seat() {
    let mut users = UserRegistry::new();

    users.register(2, "alpha");
    let previous = users.register(2, "bravo");

    assert_eq!(previous.as_deref(), Some("alpha"));
    assert_eq!(users.get(2), Some("bravo"));
    assert_eq!(users.seat_of("BRAVO"), Some(2));
}
