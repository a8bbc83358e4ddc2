//! In-memory fakes for every capability trait, plus a log capture.
//!
//! # Why fakes?
//!
//! The real adapters run PowerShell and `net.exe`, which:
//!
//! - Only exist on Windows.
//! - Need administrator rights to create accounts or change sharing.
//! - Permanently change the machine they run on.
//!
//! The fakes below keep their "OS state" in memory instead, behave like the
//! real commands for the cases the use cases care about (for example
//! `net user /add` refusing a duplicate name), and record every call so tests
//! can assert on ordering.  They are always compiled (not `#[cfg(test)]`) so
//! integration tests under `tests/` can use them too.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;

use crate::application::command::CommandError;
use crate::application::manage_users::AccountManager;
use crate::application::scan_devices::{DeviceQuerier, MonitorEnumerator, MonitorError, MonitorRect};
use crate::application::share_internet::NetworkSharer;

// ── Monitors ──────────────────────────────────────────────────────────────────

/// Returns a fixed list of monitor rectangles.
#[derive(Debug, Default)]
pub struct MockMonitorEnumerator {
    pub monitors: Vec<MonitorRect>,
    /// When `true`, `enumerate` returns `MonitorError::Platform`.
    pub should_fail: bool,
}

impl MockMonitorEnumerator {
    /// No monitors attached.
    pub fn none() -> Self {
        Self::default()
    }

    /// One 1920×1080 monitor at the origin.
    pub fn single_1080p() -> Self {
        Self {
            monitors: vec![MonitorRect { left: 0, top: 0, right: 1920, bottom: 1080 }],
            should_fail: false,
        }
    }

    /// Two 1920×1080 monitors side by side.
    pub fn dual_1080p() -> Self {
        Self {
            monitors: vec![
                MonitorRect { left: 0, top: 0, right: 1920, bottom: 1080 },
                MonitorRect { left: 1920, top: 0, right: 3840, bottom: 1080 },
            ],
            should_fail: false,
        }
    }

    /// Display API failure.
    pub fn failing() -> Self {
        Self {
            monitors: Vec::new(),
            should_fail: true,
        }
    }
}

impl MonitorEnumerator for MockMonitorEnumerator {
    fn enumerate(&self) -> Result<Vec<MonitorRect>, MonitorError> {
        if self.should_fail {
            return Err(MonitorError::Platform("mock failure".into()));
        }
        Ok(self.monitors.clone())
    }
}

// ── Peripheral query ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum QueryBehaviour {
    Listing(String),
    Exit { code: i32, output: String },
    NotFound,
}

/// Returns a canned `Get-PnpDevice` table or a canned failure.
#[derive(Debug)]
pub struct MockDeviceQuerier {
    behaviour: QueryBehaviour,
    calls: Mutex<usize>,
}

impl MockDeviceQuerier {
    fn with(behaviour: QueryBehaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(0),
        }
    }

    pub fn with_listing(listing: &str) -> Self {
        Self::with(QueryBehaviour::Listing(listing.to_string()))
    }

    pub fn failing_with_exit(code: i32, output: &str) -> Self {
        Self::with(QueryBehaviour::Exit {
            code,
            output: output.to_string(),
        })
    }

    /// PowerShell is not installed.
    pub fn not_found() -> Self {
        Self::with(QueryBehaviour::NotFound)
    }

    /// How many times the query ran.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl DeviceQuerier for MockDeviceQuerier {
    async fn query_peripherals(&self) -> Result<String, CommandError> {
        *self.calls.lock().expect("lock poisoned") += 1;
        match &self.behaviour {
            QueryBehaviour::Listing(listing) => Ok(listing.clone()),
            QueryBehaviour::Exit { code, output } => Err(CommandError::NonZeroExit {
                program: "powershell".to_string(),
                code: Some(*code),
                output: output.clone(),
            }),
            QueryBehaviour::NotFound => Err(CommandError::NotFound {
                program: "powershell".to_string(),
            }),
        }
    }
}

// ── Accounts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct AccountState {
    /// username (lowercase) → password
    accounts: BTreeMap<String, String>,
    /// group → members (lowercase)
    groups: BTreeMap<String, BTreeSet<String>>,
    calls: Vec<String>,
}

/// Simulates `net user` / `net localgroup` against an in-memory account table.
///
/// Usernames are case-insensitive, like Windows account names.
#[derive(Debug, Default)]
pub struct MockAccountManager {
    state: Mutex<AccountState>,
    fail_group_add: bool,
    fail_delete: bool,
}

impl MockAccountManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-creates an account, as if it already existed on the machine.
    pub fn with_existing(self, username: &str) -> Self {
        self.state
            .lock()
            .expect("lock poisoned")
            .accounts
            .insert(username.to_lowercase(), String::new());
        self
    }

    /// Makes every `add_to_group` call fail (e.g. the group does not exist).
    pub fn failing_group_add(mut self) -> Self {
        self.fail_group_add = true;
        self
    }

    /// Makes every `delete_account` call fail.
    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn account_exists(&self, username: &str) -> bool {
        self.state
            .lock()
            .expect("lock poisoned")
            .accounts
            .contains_key(&username.to_lowercase())
    }

    pub fn password_of(&self, username: &str) -> Option<String> {
        self.state
            .lock()
            .expect("lock poisoned")
            .accounts
            .get(&username.to_lowercase())
            .cloned()
    }

    pub fn group_members(&self, group: &str) -> Vec<String> {
        self.state
            .lock()
            .expect("lock poisoned")
            .groups
            .get(group)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every call in order, as `"create <u>"`, `"group <g> <u>"`, `"delete <u>"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().expect("lock poisoned").calls.clone()
    }
}

fn net_failure(code: i32, output: &str) -> CommandError {
    CommandError::NonZeroExit {
        program: "net".to_string(),
        code: Some(code),
        output: output.to_string(),
    }
}

#[async_trait]
impl AccountManager for MockAccountManager {
    async fn create_account(&self, username: &str, password: &str) -> Result<(), CommandError> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.calls.push(format!("create {username}"));
        let key = username.to_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(net_failure(
                2,
                "The account already exists.\r\n\r\nMore help is available by typing NET HELPMSG 2224.\r\n",
            ));
        }
        state.accounts.insert(key, password.to_string());
        Ok(())
    }

    async fn add_to_group(&self, group: &str, username: &str) -> Result<(), CommandError> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.calls.push(format!("group {group} {username}"));
        if self.fail_group_add {
            return Err(net_failure(2, "System error 1376 has occurred.\r\n\r\nThe specified local group does not exist.\r\n"));
        }
        if !state.accounts.contains_key(&username.to_lowercase()) {
            return Err(net_failure(2, "There is no such global user or group.\r\n"));
        }
        state
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(username.to_lowercase());
        Ok(())
    }

    async fn delete_account(&self, username: &str) -> Result<(), CommandError> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.calls.push(format!("delete {username}"));
        if self.fail_delete {
            return Err(net_failure(2, "System error 5 has occurred.\r\n\r\nAccess is denied.\r\n"));
        }
        let key = username.to_lowercase();
        if state.accounts.remove(&key).is_none() {
            return Err(net_failure(2, "The user name could not be found.\r\n"));
        }
        for members in state.groups.values_mut() {
            members.remove(&key);
        }
        Ok(())
    }
}

// ── Internet sharing ──────────────────────────────────────────────────────────

/// Records every interface sharing was enabled on.
#[derive(Debug, Default)]
pub struct RecordingNetworkSharer {
    pub enabled: Mutex<Vec<String>>,
    /// When `true`, every call fails as if the cmdlet were unavailable.
    pub should_fail: bool,
}

impl RecordingNetworkSharer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn enabled_interfaces(&self) -> Vec<String> {
        self.enabled.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl NetworkSharer for RecordingNetworkSharer {
    async fn enable_sharing(&self, interface: &str) -> Result<(), CommandError> {
        if self.should_fail {
            return Err(CommandError::NonZeroExit {
                program: "powershell".to_string(),
                code: Some(1),
                output: "Set-NetConnectionSharing : The term is not recognized.\r\n".to_string(),
            });
        }
        self.enabled.lock().expect("lock poisoned").push(interface.to_string());
        Ok(())
    }
}

// ── Logs ──────────────────────────────────────────────────────────────────────

/// Collects formatted `tracing` output in memory so tests can read the log.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes events on the current thread here until the guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().expect("lock poisoned")).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("lock poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_account_manager_rejects_duplicate_case_insensitively() {
        let manager = MockAccountManager::new().with_existing("Admin");

        let result = manager.create_account("ADMIN", "pw").await;

        assert!(matches!(result, Err(CommandError::NonZeroExit { code: Some(2), .. })));
    }

    #[tokio::test]
    async fn test_mock_delete_removes_group_membership() {
        let manager = MockAccountManager::new();
        manager.create_account("seat1", "pw").await.expect("create");
        manager.add_to_group("Remote Desktop Users", "seat1").await.expect("group");

        manager.delete_account("seat1").await.expect("delete");

        assert!(!manager.account_exists("seat1"));
        assert!(manager.group_members("Remote Desktop Users").is_empty());
    }

    #[tokio::test]
    async fn test_mock_group_membership_ignores_username_case() {
        // Arrange
        let manager = MockAccountManager::new();
        manager.create_account("Seat1", "pw").await.expect("create");
        manager.add_to_group("Remote Desktop Users", "Seat1").await.expect("group");

        // Act
        manager.delete_account("seat1").await.expect("delete");

        // Assert
        assert!(!manager.account_exists("Seat1"));
        assert!(manager.group_members("Remote Desktop Users").is_empty());
    }

    #[test]
    fn test_log_capture_collects_events_while_installed() {
        let logs = LogCapture::new();

        {
            let _guard = logs.install();
            tracing::warn!("captured line");
        }
        tracing::warn!("after the guard");

        let text = logs.contents();
        assert!(text.contains("captured line"), "{text}");
        assert!(!text.contains("after the guard"), "{text}");
    }

    #[tokio::test]
    async fn test_failing_sharer_records_nothing() {
        let sharer = RecordingNetworkSharer::failing();

        let result = sharer.enable_sharing("Ethernet").await;

        assert!(matches!(result, Err(CommandError::NonZeroExit { code: Some(1), .. })));
        assert!(sharer.enabled_interfaces().is_empty());
    }

    #[test]
    fn test_mock_monitor_enumerator_failing() {
        assert!(MockMonitorEnumerator::failing().enumerate().is_err());
        assert_eq!(MockMonitorEnumerator::dual_1080p().enumerate().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_recording_sharer_records_interfaces() {
        let sharer = RecordingNetworkSharer::new();
        sharer.enable_sharing("Ethernet").await.expect("enable");
        assert_eq!(sharer.enabled_interfaces(), vec!["Ethernet".to_string()]);
    }
}
