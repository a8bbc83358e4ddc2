//! Local account management through `net.exe`.
//!
//! | Operation        | Command                                     |
//! |------------------|---------------------------------------------|
//! | create account   | `net user <name> <password> /add`           |
//! | add to group     | `net localgroup "<group>" <name> /add`      |
//! | delete account   | `net user <name> /delete`                   |
//!
//! Arguments are passed as separate argv entries, never through a shell, so
//! a group name with spaces such as `Remote Desktop Users` needs no quoting.

use async_trait::async_trait;
use tracing::info;

use super::process::CommandRunner;
use crate::application::command::CommandError;
use crate::application::manage_users::AccountManager;

pub struct NetAccountManager {
    runner: CommandRunner,
}

impl NetAccountManager {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

fn create_args<'a>(username: &'a str, password: &'a str) -> Vec<&'a str> {
    vec!["user", username, password, "/add"]
}

fn group_args<'a>(group: &'a str, username: &'a str) -> Vec<&'a str> {
    vec!["localgroup", group, username, "/add"]
}

fn delete_args(username: &str) -> Vec<&str> {
    vec!["user", username, "/delete"]
}

#[async_trait]
impl AccountManager for NetAccountManager {
    async fn create_account(&self, username: &str, password: &str) -> Result<(), CommandError> {
        self.runner.run("net", create_args(username, password)).await?;
        info!("created local account {username}");
        Ok(())
    }

    async fn add_to_group(&self, group: &str, username: &str) -> Result<(), CommandError> {
        self.runner.run("net", group_args(group, username)).await?;
        Ok(())
    }

    async fn delete_account(&self, username: &str) -> Result<(), CommandError> {
        self.runner.run("net", delete_args(username)).await?;
        info!("deleted local account {username}");
        Ok(())
    }
}
