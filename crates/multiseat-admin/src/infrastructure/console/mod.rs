//! The operator console: interactive shell and batch plans.
//!
//! [`Console`] owns the session's [`Workstation`] and the use cases, and runs
//! one [`ConsoleCommand`] at a time to completion.  A failing command never
//! ends the session: its error is logged, shown to the operator, and the next
//! command is read.
//!
//! ```text
//! stdin line ──► parse_command ──► Console::execute ──► render ──► stdout
//!                                        │
//!                                        ├─ ScanDevicesUseCase
//!                                        ├─ Workstation::assign_checked
//!                                        ├─ ManageUsersUseCase
//!                                        ├─ apply_config::apply
//!                                        └─ enable_internet_sharing
//! ```

pub mod commands;
pub mod render;

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use multiseat_core::ValidationError;

use crate::application::apply_config::{apply, ApplyError, ApplyPolicy};
use crate::application::manage_users::{AccountError, ManageUsersUseCase};
use crate::application::scan_devices::{ScanDevicesUseCase, ScanError};
use crate::application::share_internet::{enable_internet_sharing, NetworkShareError, NetworkSharer};
use crate::application::workstation::{SelectionError, Workstation};
use crate::infrastructure::accounts::NetAccountManager;
use crate::infrastructure::display::NativeMonitorEnumerator;
use crate::infrastructure::pnp::PowerShellDeviceQuerier;
use crate::infrastructure::process::CommandRunner;
use crate::infrastructure::sharing::PowerShellNetworkSharer;
use crate::infrastructure::storage::config::AppConfig;
use crate::infrastructure::storage::plan::SeatPlan;

pub use commands::{parse_command, ConsoleCommand, ParseError};

/// Any failure of a single console command.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Share(#[from] NetworkShareError),
}

impl ConsoleError {
    /// The operator-facing message.  Command failures already carry the
    /// command's output in their message.
    pub fn report(&self) -> String {
        format!("Error: {self}")
    }
}

/// The use cases and settings a console dispatches to.
pub struct AdminServices {
    pub scanner: ScanDevicesUseCase,
    pub users: ManageUsersUseCase,
    pub sharer: Arc<dyn NetworkSharer>,
    pub interface: String,
    pub apply_policy: ApplyPolicy,
}

impl AdminServices {
    /// Wires the OS-backed adapters with the configured timeout and policies.
    pub fn native(config: &AppConfig) -> Self {
        let runner = CommandRunner::new(config.command_timeout());
        Self {
            scanner: ScanDevicesUseCase::new(
                Arc::new(NativeMonitorEnumerator::new()),
                Arc::new(PowerShellDeviceQuerier::new(runner)),
            ),
            users: ManageUsersUseCase::new(
                Arc::new(NetAccountManager::new(runner)),
                config.account_policy(),
            ),
            sharer: Arc::new(PowerShellNetworkSharer::new(runner)),
            interface: config.network.interface_alias.clone(),
            apply_policy: config.apply_policy(),
        }
    }
}

/// Result of feeding one line to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Reply(String),
    Quit,
}

/// Outcome of a batch plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOutcome {
    /// Commands run, in order.
    pub executed: usize,
    /// Error report of every failed command.
    pub failures: Vec<String>,
}

impl PlanOutcome {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Console {
    services: AdminServices,
    workstation: Workstation,
}

impl Console {
    pub fn new(services: AdminServices, workstation: Workstation) -> Self {
        Self {
            services,
            workstation,
        }
    }

    pub fn workstation(&self) -> &Workstation {
        &self.workstation
    }

    /// Runs one command to completion and returns the text to show.
    ///
    /// `Quit` returns an empty reply; callers stop reading on their own.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] wrapping the failing use case's error.  State
    /// is unchanged by a failed command, except that a failed scan has
    /// already refreshed the monitor list.
    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<String, ConsoleError> {
        let ws = &mut self.workstation;
        match command {
            ConsoleCommand::Scan => {
                let summary = self.services.scanner.scan(&mut ws.catalog).await?;
                Ok(format!(
                    "{}\n\n{}",
                    render::render_scan_summary(&summary),
                    render::render_devices(&ws.catalog)
                ))
            }
            ConsoleCommand::Devices => Ok(render::render_devices(&ws.catalog)),
            ConsoleCommand::Options(kind) => {
                Ok(render::render_device_options(kind, ws.candidates(kind)))
            }
            ConsoleCommand::Seats => Ok(render::render_seat_options(ws.max_seats())),
            ConsoleCommand::Assign {
                seat,
                kind,
                selection,
            } => {
                ws.check_seat(seat)?;
                let device = ws.resolve_device(kind, &selection)?;
                let holders: Vec<_> = ws
                    .seats
                    .seats_holding(&device)
                    .into_iter()
                    .filter(|s| *s != seat)
                    .collect();
                let previous = ws.assign_checked(seat, kind, &device)?;

                let mut reply = format!("Assigned {kind}: {device} to Seat {seat}");
                if let Some(previous) = previous.filter(|p| *p != device) {
                    reply.push_str(&format!(" (replaces {previous})"));
                }
                if !holders.is_empty() {
                    warn!("{device} is also assigned to seat(s) {holders:?}");
                    reply.push_str(&format!("\nNote: {device} is also assigned to seat(s) {holders:?}"));
                }
                Ok(reply)
            }
            ConsoleCommand::Assignments => Ok(render::render_assignments(&ws.seats)),
            ConsoleCommand::User { seat, username } => {
                ws.check_seat(seat)?;
                self.services
                    .users
                    .create_user(seat, &username, &mut ws.users)
                    .await?;
                Ok(format!("Created user {} for Seat {seat}", username.trim()))
            }
            ConsoleCommand::Users => Ok(render::render_users(&ws.users)),
            ConsoleCommand::Apply => {
                let report = apply(&ws.seats, &ws.users, self.services.apply_policy)?;
                Ok(render::render_apply_report(&report))
            }
            ConsoleCommand::Share => {
                enable_internet_sharing(self.services.sharer.as_ref(), &self.services.interface)
                    .await?;
                Ok(format!(
                    "Internet sharing enabled on {}.",
                    self.services.interface
                ))
            }
            ConsoleCommand::Help => Ok(render::HELP.to_string()),
            ConsoleCommand::Quit => Ok(String::new()),
        }
    }

    /// Parses and runs one input line.  Errors become replies.
    pub async fn execute_line(&mut self, line: &str) -> Step {
        let command = match parse_command(line) {
            Ok(Some(ConsoleCommand::Quit)) => return Step::Quit,
            Ok(Some(command)) => command,
            Ok(None) => return Step::Reply(String::new()),
            Err(e) => {
                let e = ConsoleError::from(e);
                error!("{e}");
                return Step::Reply(e.report());
            }
        };
        match self.execute(command).await {
            Ok(reply) => Step::Reply(reply),
            Err(e) => {
                error!("{e}");
                Step::Reply(e.report())
            }
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O errors on `input` or `output` end the loop early.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(render::HELP.as_bytes()).await?;
        output.write_all(b"\n> ").await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match self.execute_line(&line).await {
                Step::Quit => break,
                Step::Reply(reply) if reply.is_empty() => {}
                Step::Reply(reply) => {
                    output.write_all(reply.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }
        output.flush().await?;
        Ok(())
    }

    /// Runs a seat plan: scan, each seat's devices and account, apply, then
    /// sharing when the plan asks for it.  A failed step is logged and the
    /// batch moves on to the next one.
    pub async fn run_plan(&mut self, plan: &SeatPlan) -> PlanOutcome {
        let mut steps = vec![ConsoleCommand::Scan];
        for planned in &plan.seats {
            for (kind, selection) in planned.selections() {
                steps.push(ConsoleCommand::Assign {
                    seat: planned.seat,
                    kind,
                    selection: selection.to_string(),
                });
            }
            if let Some(username) = &planned.username {
                steps.push(ConsoleCommand::User {
                    seat: planned.seat,
                    username: username.clone(),
                });
            }
        }
        steps.push(ConsoleCommand::Apply);
        if plan.share_internet {
            steps.push(ConsoleCommand::Share);
        }

        let mut outcome = PlanOutcome::default();
        for step in steps {
            outcome.executed += 1;
            match self.execute(step).await {
                Ok(reply) => info!("{reply}"),
                Err(e) => {
                    error!("{e}");
                    outcome.failures.push(e.report());
                }
            }
        }
        info!(
            "Seat plan finished: {} step(s), {} failed.",
            outcome.executed,
            outcome.failures.len()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::manage_users::AccountPolicy;
    use crate::application::share_internet::MockNetworkSharer;
    use crate::infrastructure::mock::{
        LogCapture, MockAccountManager, MockDeviceQuerier, MockMonitorEnumerator,
        RecordingNetworkSharer,
    };
    use crate::infrastructure::storage::plan::PlannedSeat;
    use multiseat_core::DeviceKind;

    const LISTING: &str = "FriendlyName InstanceId\n\
------------ ----------\n\
HID Keyboard Device HID\\VID_413C&PID_2107\\7&1&0&0000\n\
HID-compliant mouse HID\\VID_046D&PID_C077\\7&2&0&0000\n\
USB Optical Mouse HID\\VID_093A&PID_2510\\7&3&0&0000\n";

    fn make_services(
        accounts: Arc<MockAccountManager>,
        sharer: Arc<dyn NetworkSharer>,
    ) -> AdminServices {
        AdminServices {
            scanner: ScanDevicesUseCase::new(
                Arc::new(MockMonitorEnumerator::dual_1080p()),
                Arc::new(MockDeviceQuerier::with_listing(LISTING)),
            ),
            users: ManageUsersUseCase::new(accounts, AccountPolicy::default()),
            sharer,
            interface: "Ethernet".to_string(),
            apply_policy: ApplyPolicy::Advisory,
        }
    }

    fn make_console() -> (Console, Arc<MockAccountManager>, Arc<RecordingNetworkSharer>) {
        let accounts = Arc::new(MockAccountManager::new());
        let sharer = Arc::new(RecordingNetworkSharer::new());
        let console = Console::new(
            make_services(Arc::clone(&accounts), sharer.clone()),
            Workstation::default(),
        );
        (console, accounts, sharer)
    }

    #[tokio::test]
    async fn test_scan_then_assign_by_index() {
        // Arrange
        let (mut console, _, _) = make_console();
        console.execute(ConsoleCommand::Scan).await.expect("scan");

        // Act
        let reply = console
            .execute(ConsoleCommand::Assign {
                seat: 2,
                kind: DeviceKind::Mouse,
                selection: "#2".to_string(),
            })
            .await
            .expect("assign");

        // Assert
        assert_eq!(reply, "Assigned mouse: USB Optical Mouse to Seat 2");
        assert_eq!(
            console.workstation().seats.get(2, DeviceKind::Mouse),
            Some("USB Optical Mouse")
        );
    }

    #[tokio::test]
    async fn test_assign_to_seat_eleven_is_rejected() {
        let (mut console, _, _) = make_console();

        let step = console.execute_line("assign 11 monitor DELL-24").await;

        assert_eq!(
            step,
            Step::Reply("Error: seat 11 is outside the allowed range 1..=10".to_string())
        );
        assert!(console.workstation().seats.is_empty());
    }

    #[tokio::test]
    async fn test_assign_same_device_to_two_seats_adds_note() {
        let (mut console, _, _) = make_console();
        console.execute_line("assign 1 keyboard Logitech K120").await;

        let step = console.execute_line("assign 2 keyboard Logitech K120").await;

        let Step::Reply(reply) = step else {
            panic!("expected a reply");
        };
        assert!(reply.contains("also assigned to seat(s) [1]"), "{reply}");
        assert_eq!(console.workstation().seats.seats_holding("Logitech K120"), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_user_command_creates_account_and_registers_seat() {
        // Arrange
        let (mut console, accounts, _) = make_console();

        // Act
        let step = console.execute_line("user 3 seat3").await;

        // Assert
        assert_eq!(step, Step::Reply("Created user seat3 for Seat 3".to_string()));
        assert!(accounts.account_exists("seat3"));
        assert_eq!(console.workstation().users.get(3), Some("seat3"));
    }

    #[tokio::test]
    async fn test_duplicate_user_reports_command_output() {
        let accounts = Arc::new(MockAccountManager::new().with_existing("seat1"));
        let mut console = Console::new(
            make_services(accounts, Arc::new(RecordingNetworkSharer::new())),
            Workstation::default(),
        );

        let step = console.execute_line("user 1 seat1").await;

        let Step::Reply(reply) = step else {
            panic!("expected a reply");
        };
        assert!(reply.starts_with("Error: failed to create user seat1"), "{reply}");
        assert!(reply.contains("The account already exists."), "{reply}");
        assert!(console.workstation().users.is_empty());
    }

    #[tokio::test]
    async fn test_share_uses_configured_interface() {
        // Arrange
        let mut sharer = MockNetworkSharer::new();
        sharer
            .expect_enable_sharing()
            .with(mockall::predicate::eq("Ethernet"))
            .times(1)
            .returning(|_| Ok(()));
        let mut console = Console::new(
            make_services(Arc::new(MockAccountManager::new()), Arc::new(sharer)),
            Workstation::default(),
        );

        // Act
        let reply = console.execute(ConsoleCommand::Share).await.expect("share");

        // Assert
        assert_eq!(reply, "Internet sharing enabled on Ethernet.");
    }

    #[tokio::test]
    async fn test_unknown_command_is_reported_and_logged() {
        // Arrange
        let (mut console, _, _) = make_console();
        let logs = LogCapture::new();
        let _guard = logs.install();

        // Act
        let step = console.execute_line("reboot now").await;

        // Assert
        assert_eq!(
            step,
            Step::Reply("Error: unknown command \"reboot\"; type `help` for a list".to_string())
        );
        let text = logs.contents();
        assert!(text.contains("ERROR"), "{text}");
        assert!(text.contains("unknown command \"reboot\""), "{text}");
    }

    #[tokio::test]
    async fn test_quit_and_blank_lines() {
        let (mut console, _, _) = make_console();

        assert_eq!(console.execute_line("quit").await, Step::Quit);
        assert_eq!(console.execute_line("").await, Step::Reply(String::new()));
    }

    #[tokio::test]
    async fn test_run_reads_until_quit() {
        // Arrange
        let (mut console, _, _) = make_console();
        let input: &[u8] = b"assign 1 monitor DELL-24\nassignments\nquit\nassign 2 monitor X\n";
        let mut output = Vec::new();

        // Act
        console.run(input, &mut output).await.expect("run");

        // Assert
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("Assigned monitor: DELL-24 to Seat 1"));
        assert!(text.contains("**Seat 1:**\n- monitor: DELL-24"));
        assert_eq!(console.workstation().seats.len(), 1);
    }

    #[tokio::test]
    async fn test_run_plan_continues_after_failures() {
        // Arrange
        let (mut console, accounts, sharer) = make_console();
        let plan = SeatPlan {
            share_internet: true,
            seats: vec![
                PlannedSeat {
                    seat: 1,
                    monitor: Some("#1".to_string()),
                    keyboard: Some("#1".to_string()),
                    mouse: Some("#9".to_string()),
                    username: Some("seat1".to_string()),
                },
                PlannedSeat {
                    seat: 12,
                    username: Some("seat12".to_string()),
                    ..PlannedSeat::default()
                },
            ],
        };

        // Act
        let outcome = console.run_plan(&plan).await;

        // Assert
        assert_eq!(outcome.executed, 8);
        assert_eq!(outcome.failures.len(), 2, "{:?}", outcome.failures);
        assert!(accounts.account_exists("seat1"));
        assert!(!accounts.account_exists("seat12"));
        assert_eq!(
            console.workstation().seats.get(1, DeviceKind::Monitor),
            Some("Monitor at (0,0)-(1920,1080)")
        );
        assert_eq!(sharer.enabled_interfaces(), vec!["Ethernet".to_string()]);
    }

    #[tokio::test]
    async fn test_run_plan_counts_failed_sharing_and_logs_summary() {
        // Arrange
        let accounts = Arc::new(MockAccountManager::new());
        let sharer = Arc::new(RecordingNetworkSharer::failing());
        let mut console = Console::new(
            make_services(Arc::clone(&accounts), sharer.clone()),
            Workstation::default(),
        );
        let plan = SeatPlan {
            share_internet: true,
            seats: vec![PlannedSeat {
                seat: 1,
                monitor: Some("#1".to_string()),
                username: Some("seat1".to_string()),
                ..PlannedSeat::default()
            }],
        };
        let logs = LogCapture::new();
        let _guard = logs.install();

        // Act
        let outcome = console.run_plan(&plan).await;

        // Assert
        assert_eq!(outcome.executed, 5);
        assert!(!outcome.succeeded());
        assert_eq!(outcome.failures.len(), 1, "{:?}", outcome.failures);
        assert!(
            outcome.failures[0].starts_with("Error: failed to enable internet sharing on \"Ethernet\":"),
            "{:?}",
            outcome.failures
        );
        assert!(accounts.account_exists("seat1"));
        assert!(sharer.enabled_interfaces().is_empty());
        let text = logs.contents();
        assert!(text.contains("Seat plan finished: 5 step(s), 1 failed."), "{text}");
    }
}
