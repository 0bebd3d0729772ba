// AuditDesk CLI - headless audit dashboard operations

mod docs;
mod exit_codes;
mod roster;
mod util;
mod watch;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use auditdesk_config::{CredentialGate, LoginError, Session, Settings, ThrottleState};
use auditdesk_recon::ReconcileError;
use auditdesk_remote::{RemoteError, ServiceCredentials};
use auditdesk_store::{LocalStore, StoreError};

use exit_codes::{
    reconcile_exit_code, remote_exit_code, store_exit_code, EXIT_AUTH_BAD, EXIT_AUTH_LOCKED,
    EXIT_AUTH_UNCONFIGURED, EXIT_ERROR, EXIT_SUCCESS,
};

#[derive(Parser)]
#[command(name = "adesk")]
#[command(about = "Internal audit dashboard (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Personnel roster operations
    Roster {
        #[command(subcommand)]
        command: roster::RosterCommands,
    },

    /// Controlled-document register operations
    Docs {
        #[command(subcommand)]
        command: docs::DocsCommands,
    },

    /// Start an operator session (password read from stdin)
    #[command(after_help = "\
Examples:
  adesk login admin")]
    Login {
        /// Username from the configured allow-list
        user: String,
    },

    /// End the operator session
    Logout,

    /// Saved credentials for the hosted table service
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },

    /// Periodically re-read and redisplay a table
    #[command(after_help = "\
Examples:
  adesk watch
  adesk watch --docs --interval 10
  adesk watch --docs --remote --count 3")]
    Watch {
        /// Watch the document register instead of the roster
        #[arg(long)]
        docs: bool,

        /// Watch the hosted table service (documents only)
        #[arg(long)]
        remote: bool,

        /// Seconds between re-reads (defaults from settings)
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after N refreshes (default: run until interrupted)
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Save the service endpoint and API key (key read from stdin)
    Login {
        /// API base URL, e.g. https://tables.example.app
        api_base: String,
    },
    /// Forget the saved service credentials
    Logout,
}

/// A command failure: exit code, operator-facing message, optional hint.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let hint = match &err {
            StoreError::Conflict(_) => Some("another writer holds the store — retry".into()),
            StoreError::Io(_) => None,
        };
        Self { code: store_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<ReconcileError> for CliError {
    fn from(err: ReconcileError) -> Self {
        Self { code: reconcile_exit_code(&err), message: err.to_string(), hint: None }
    }
}

impl From<RemoteError> for CliError {
    fn from(err: RemoteError) -> Self {
        let hint = match &err {
            RemoteError::NotConfigured => Some("run `adesk remote login API_BASE` first".into()),
            RemoteError::Replace { .. } => {
                Some("re-read the table before retrying the import".into())
            }
            _ => None,
        };
        Self { code: remote_exit_code(&err), message: err.to_string(), hint }
    }
}

/// Open the local store at the configured path.
pub fn open_store() -> Result<LocalStore, CliError> {
    let settings = Settings::load();
    Ok(LocalStore::open(&settings.resolved_store_path())?)
}

fn cmd_login(user: &str) -> Result<(), CliError> {
    let gate = CredentialGate::load_from(&CredentialGate::path()).ok_or_else(|| CliError {
        code: EXIT_AUTH_UNCONFIGURED,
        message: "no operator credentials configured".into(),
        hint: Some(format!(
            "create {} with {{\"users\": {{\"NAME\": \"sha256-hex-digest\"}}}}",
            CredentialGate::path().display()
        )),
    })?;

    let password = util::read_password()?;

    let throttle_path = ThrottleState::path();
    let mut throttle = ThrottleState::load_from(&throttle_path);
    let verdict = gate.verify(user, &password, &mut throttle);
    // Persist the updated failure counters regardless of the verdict, so
    // the lockout holds across invocations.
    throttle.save_to(&throttle_path).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot persist throttle state: {e}"),
        hint: None,
    })?;

    match verdict {
        Ok(()) => {
            let session = Session::start(user);
            session.save().map_err(|e| CliError {
                code: EXIT_ERROR,
                message: format!("cannot save session: {e}"),
                hint: None,
            })?;
            println!("logged in as {user}");
            Ok(())
        }
        Err(err @ LoginError::BadCredentials) => Err(CliError {
            code: EXIT_AUTH_BAD,
            message: err.to_string(),
            hint: None,
        }),
        Err(err @ LoginError::LockedOut { .. }) => Err(CliError {
            code: EXIT_AUTH_LOCKED,
            message: err.to_string(),
            hint: None,
        }),
    }
}

fn cmd_logout() -> Result<(), CliError> {
    match Session::load() {
        Some(session) => {
            Session::clear().map_err(|e| CliError {
                code: EXIT_ERROR,
                message: format!("cannot clear session: {e}"),
                hint: None,
            })?;
            println!("logged out {}", session.user);
        }
        None => println!("no active session"),
    }
    Ok(())
}

fn cmd_remote(cmd: RemoteCommands) -> Result<(), CliError> {
    match cmd {
        RemoteCommands::Login { api_base } => {
            eprintln!("Paste the service API key:");
            let api_key = util::read_password()?;
            let creds = ServiceCredentials::new(api_base, api_key);
            auditdesk_remote::save_auth(&creds).map_err(|e| CliError {
                code: EXIT_ERROR,
                message: e,
                hint: None,
            })?;
            println!("service credentials saved");
            Ok(())
        }
        RemoteCommands::Logout => {
            auditdesk_remote::delete_auth().map_err(|e| CliError {
                code: EXIT_ERROR,
                message: e,
                hint: None,
            })?;
            println!("service credentials removed");
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Roster { command } => roster::cmd_roster(command),
        Commands::Docs { command } => docs::cmd_docs(command),
        Commands::Login { user } => cmd_login(&user),
        Commands::Logout => cmd_logout(),
        Commands::Remote { command } => cmd_remote(command),
        Commands::Watch { docs, remote, interval, count } => {
            let interval = interval.unwrap_or_else(|| Settings::load().poll_interval_secs);
            watch::cmd_watch(docs, remote, interval, count)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.code)
        }
    }
}
