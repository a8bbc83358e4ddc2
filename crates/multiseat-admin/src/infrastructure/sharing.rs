//! Internet Connection Sharing through PowerShell.

use async_trait::async_trait;

use super::pnp::powershell_args;
use super::process::CommandRunner;
use crate::application::command::CommandError;
use crate::application::share_internet::NetworkSharer;

pub struct PowerShellNetworkSharer {
    runner: CommandRunner,
}

impl PowerShellNetworkSharer {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

/// Builds the sharing command for `interface`.
///
/// The alias is embedded in a single-quoted PowerShell string; embedded
/// single quotes are doubled.
pub fn sharing_script(interface: &str) -> String {
    format!(
        "Set-NetConnectionSharing -InterfaceAlias '{}' -SharingEnabled $true",
        interface.replace('\'', "''")
    )
}

#[async_trait]
impl NetworkSharer for PowerShellNetworkSharer {
    async fn enable_sharing(&self, interface: &str) -> Result<(), CommandError> {
        let script = sharing_script(interface);
        self.runner
            .run("powershell", powershell_args(&script))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharing_script_for_default_interface() {
        assert_eq!(
            sharing_script("Ethernet"),
            "Set-NetConnectionSharing -InterfaceAlias 'Ethernet' -SharingEnabled $true"
        );
    }

    #[test]
    fn test_sharing_script_escapes_single_quotes() {
        assert!(sharing_script("Bob's LAN").contains("'Bob''s LAN'"));
    }
}
