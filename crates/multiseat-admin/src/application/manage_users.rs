//! ManageUsersUseCase: creates one local account per seat.
//!
//! Creating a seat account is two OS steps:
//!
//! ```text
//! create_account(name, password)  ──►  add_to_group("Remote Desktop Users", name)
//!                                              │ fails
//!                                              ▼
//!                                      delete_account(name)   (best-effort cleanup)
//! ```
//!
//! Only when both steps succeed is `seat → name` written to the
//! [`UserRegistry`].  On any failure the registry is left exactly as it was.
//!
//! If the group step fails, the freshly created account is deleted again so
//! a half-configured account is not left behind.  A failed cleanup is logged;
//! the error returned to the caller is always the original group failure.

use std::sync::Arc;

use async_trait::async_trait;
use multiseat_core::{SeatId, UserRegistry};
use thiserror::Error;
use tracing::{error, info, warn};

use super::command::CommandError;

/// Error type for account creation.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("failed to create user {username}: {source}")]
    Create {
        username: String,
        #[source]
        source: CommandError,
    },

    #[error("failed to add {username} to group {group:?}: {source}")]
    AddToGroup {
        username: String,
        group: String,
        #[source]
        source: CommandError,
    },
}

impl AccountError {
    /// Combined output of the failing `net` command, when there was one.
    pub fn command_output(&self) -> Option<&str> {
        match self {
            AccountError::EmptyUsername => None,
            AccountError::Create { source, .. } | AccountError::AddToGroup { source, .. } => {
                source.output()
            }
        }
    }
}

/// OS account management (`net user` / `net localgroup`).
#[async_trait]
pub trait AccountManager: Send + Sync {
    /// Creates a local account with the given password.
    async fn create_account(&self, username: &str, password: &str) -> Result<(), CommandError>;

    /// Adds an existing account to a local group.
    async fn add_to_group(&self, group: &str, username: &str) -> Result<(), CommandError>;

    /// Deletes a local account.
    async fn delete_account(&self, username: &str) -> Result<(), CommandError>;
}

/// Account settings applied to every seat account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPolicy {
    /// Plaintext password given to every new account.
    pub password: String,
    /// Local group granting remote-session access.
    pub remote_group: String,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            password: "password".to_string(),
            remote_group: "Remote Desktop Users".to_string(),
        }
    }
}

pub struct ManageUsersUseCase {
    manager: Arc<dyn AccountManager>,
    policy: AccountPolicy,
}

impl ManageUsersUseCase {
    pub fn new(manager: Arc<dyn AccountManager>, policy: AccountPolicy) -> Self {
        Self { manager, policy }
    }

    /// Creates the OS account for `username` and registers it for `seat`.
    ///
    /// # Errors
    ///
    /// - [`AccountError::EmptyUsername`] if `username` is blank.
    /// - [`AccountError::Create`] if `net user /add` fails (e.g. duplicate name,
    ///   missing privilege).
    /// - [`AccountError::AddToGroup`] if `net localgroup /add` fails.
    pub async fn create_user(
        &self,
        seat: SeatId,
        username: &str,
        users: &mut UserRegistry,
    ) -> Result<(), AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername);
        }

        self.manager
            .create_account(username, &self.policy.password)
            .await
            .map_err(|source| AccountError::Create {
                username: username.to_string(),
                source,
            })?;

        if let Err(source) = self
            .manager
            .add_to_group(&self.policy.remote_group, username)
            .await
        {
            warn!("rolling back account {username} after group membership failure");
            if let Err(cleanup) = self.manager.delete_account(username).await {
                error!("could not delete orphaned account {username}: {cleanup}");
            }
            return Err(AccountError::AddToGroup {
                username: username.to_string(),
                group: self.policy.remote_group.clone(),
                source,
            });
        }

        info!(
            "User {username} created and added to {} group.",
            self.policy.remote_group
        );
        users.register(seat, username);
        info!("Created user {username} for Seat {seat}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::MockAccountManager;

    fn make_use_case(manager: Arc<MockAccountManager>) -> ManageUsersUseCase {
        ManageUsersUseCase::new(manager, AccountPolicy::default())
    }

    #[tokio::test]
    async fn test_create_user_registers_seat_on_success() {
        // Arrange
        let manager = Arc::new(MockAccountManager::new());
        let use_case = make_use_case(Arc::clone(&manager));
        let mut users = UserRegistry::new();

        // Act
        use_case.create_user(4, "student4", &mut users).await.expect("create");

        // Assert
        assert_eq!(users.get(4), Some("student4"));
        assert!(manager.account_exists("student4"));
        assert_eq!(
            manager.group_members("Remote Desktop Users"),
            vec!["student4".to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_user_passes_configured_password() {
        let manager = Arc::new(MockAccountManager::new());
        let policy = AccountPolicy {
            password: "Welcome1".to_string(),
            ..AccountPolicy::default()
        };
        let use_case = ManageUsersUseCase::new(manager.clone(), policy);
        let mut users = UserRegistry::new();

        use_case.create_user(1, "kiosk", &mut users).await.expect("create");

        assert_eq!(manager.password_of("kiosk").as_deref(), Some("Welcome1"));
    }

    #[tokio::test]
    async fn test_duplicate_username_fails_and_leaves_registry_untouched() {
        // Arrange
        let manager = Arc::new(MockAccountManager::new());
        let use_case = make_use_case(Arc::clone(&manager));
        let mut users = UserRegistry::new();
        use_case.create_user(1, "shared", &mut users).await.expect("first");

        // Act
        let result = use_case.create_user(2, "shared", &mut users).await;

        // Assert
        let err = result.expect_err("duplicate must fail");
        assert!(matches!(err, AccountError::Create { .. }));
        assert!(err.command_output().unwrap_or_default().contains("already exists"));
        assert_eq!(users.len(), 1);
        assert_eq!(users.get(2), None);
    }

    #[tokio::test]
    async fn test_empty_username_is_rejected_before_any_command() {
        let manager = Arc::new(MockAccountManager::new());
        let use_case = make_use_case(Arc::clone(&manager));
        let mut users = UserRegistry::new();

        let result = use_case.create_user(1, "   ", &mut users).await;

        assert!(matches!(result, Err(AccountError::EmptyUsername)));
        assert_eq!(manager.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_group_failure_deletes_the_new_account() {
        // Arrange
        let manager = Arc::new(MockAccountManager::new().failing_group_add());
        let use_case = make_use_case(Arc::clone(&manager));
        let mut users = UserRegistry::new();

        // Act
        let result = use_case.create_user(3, "orphan", &mut users).await;

        // Assert
        assert!(matches!(result, Err(AccountError::AddToGroup { .. })));
        assert!(!manager.account_exists("orphan"));
        assert!(users.is_empty());
        assert_eq!(
            manager.calls(),
            vec![
                "create orphan".to_string(),
                "group Remote Desktop Users orphan".to_string(),
                "delete orphan".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_group_failure_error_survives_failed_cleanup() {
        let manager = Arc::new(MockAccountManager::new().failing_group_add().failing_delete());
        let use_case = make_use_case(Arc::clone(&manager));
        let mut users = UserRegistry::new();

        let result = use_case.create_user(3, "stuck", &mut users).await;

        assert!(matches!(result, Err(AccountError::AddToGroup { ref group, .. }) if group == "Remote Desktop Users"));
        assert!(manager.account_exists("stuck"));
    }
}
