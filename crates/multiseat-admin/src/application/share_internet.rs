//! Internet Connection Sharing toggle.
//!
//! One command against one interface alias.  Success means the command
//! exited 0; whether sharing is actually active afterwards is not checked.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::command::CommandError;

#[derive(Debug, Error)]
#[error("failed to enable internet sharing on {interface:?}: {source}")]
pub struct NetworkShareError {
    pub interface: String,
    #[source]
    pub source: CommandError,
}

/// Enables Internet Connection Sharing on a network interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkSharer: Send + Sync {
    async fn enable_sharing(&self, interface: &str) -> Result<(), CommandError>;
}

/// Enables sharing on `interface`.
///
/// # Errors
///
/// Returns [`NetworkShareError`] when the sharing command fails for any reason.
pub async fn enable_internet_sharing(
    sharer: &dyn NetworkSharer,
    interface: &str,
) -> Result<(), NetworkShareError> {
    sharer
        .enable_sharing(interface)
        .await
        .map_err(|source| NetworkShareError {
            interface: interface.to_string(),
            source,
        })?;
    info!("Internet sharing enabled on {interface}.");
    Ok(())
}
