//! Windows monitor enumeration via `EnumDisplayMonitors` / `GetMonitorInfoW`.
//!
//! The Win32 callback and its raw `LPARAM` pointer stay inside this file; the
//! rest of the crate only sees `Vec<MonitorRect>` in enumeration order.

use ::windows::{
    Win32::Foundation::{BOOL, LPARAM, RECT},
    Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO},
};

use crate::application::scan_devices::{MonitorEnumerator, MonitorError, MonitorRect};

pub struct WindowsMonitorEnumerator;

impl WindowsMonitorEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsMonitorEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorEnumerator for WindowsMonitorEnumerator {
    fn enumerate(&self) -> Result<Vec<MonitorRect>, MonitorError> {
        let mut monitors: Vec<MonitorRect> = Vec::new();

        // SAFETY: `monitor_enum_proc` has the signature Win32 expects.  The
        // LPARAM points at `monitors`, which outlives this synchronous call;
        // the callback runs only inside `EnumDisplayMonitors`.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut monitors as *mut Vec<MonitorRect> as isize),
            )
        };

        if !ok.as_bool() {
            return Err(MonitorError::Platform(
                "EnumDisplayMonitors returned FALSE".to_string(),
            ));
        }

        Ok(monitors)
    }
}

/// Win32 monitor enumeration callback.
///
/// # Safety
///
/// Called by Win32 inside `EnumDisplayMonitors`. `lparam` must be a valid
/// pointer to `Vec<MonitorRect>` for the duration of the enumeration call.
unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _lprc_clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = &mut *(lparam.0 as *mut Vec<MonitorRect>);

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
        let rc = info.rcMonitor;
        monitors.push(MonitorRect {
            left: rc.left,
            top: rc.top,
            right: rc.right,
            bottom: rc.bottom,
        });
    }

    BOOL(1) // continue enumeration
}
