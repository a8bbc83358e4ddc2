//! Plug-and-Play peripheral query via PowerShell.

use async_trait::async_trait;

use super::process::CommandRunner;
use crate::application::command::CommandError;
use crate::application::scan_devices::DeviceQuerier;

/// Pipeline listing HID, keyboard and mouse class devices as a two-column table.
pub const PNP_QUERY: &str = "Get-PnpDevice | Where-Object {$_.Class -eq 'HIDClass' -or $_.Class -eq 'Keyboard' -or $_.Class -eq 'Mouse'} | Select FriendlyName, InstanceId";

/// [`DeviceQuerier`] that runs [`PNP_QUERY`] through `powershell -Command`.
pub struct PowerShellDeviceQuerier {
    runner: CommandRunner,
}

impl PowerShellDeviceQuerier {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

/// Arguments passed to `powershell` for a one-shot command.
pub(crate) fn powershell_args(script: &str) -> [&str; 3] {
    ["-NoProfile", "-Command", script]
}

#[async_trait]
impl DeviceQuerier for PowerShellDeviceQuerier {
    async fn query_peripherals(&self) -> Result<String, CommandError> {
        let output = self
            .runner
            .run("powershell", powershell_args(PNP_QUERY))
            .await?;
        Ok(output.stdout)
    }
}
