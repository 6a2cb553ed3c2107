use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Write;
use std::process::ExitCode;

use encounter_manager::app_state::{AppConfig, AppState};
use encounter_manager::commands;
use encounter_manager::driver::{self, Request, RequestSender};
use encounter_manager::logging::{self, STARTUP_TARGET};
use encounter_manager::repl::readline;
use encounter_manager::selector::SelectionPolicy;
use encounter_manager::sequence::{Command, SequenceNavigator};

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = logging::init();

    let config = AppConfig::load();
    let mut state = match AppState::load(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(target: STARTUP_TARGET, error = %e, "failed to load encounter");
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            return ExitCode::FAILURE;
        }
    };

    let navigator = SequenceNavigator::new(
        state.encounter.sequence.clone(),
        state.manager.turn_duration(),
    );
    let (requests, handle) = driver::spawn(navigator, &state.manager);

    println!(
        "Loaded {} with {} participants. `next` shows the first turn, `help` lists commands.",
        state.encounter.source.label(),
        state.encounter.order.len()
    );

    loop {
        let line = match readline() {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut state, &requests) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").ok();
                std::io::stdout().flush().ok();
            }
        }
    }

    handle.abort();
    ExitCode::SUCCESS
}

#[derive(Parser)]
#[command(version, about = "encounter manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the next participant
    #[command(alias = "n")]
    Next,
    /// Show the previous participant
    #[command(alias = "p")]
    Prev,
    /// Start the turn timer
    Start,
    /// Pause the turn timer
    Pause,
    /// Reset the turn timer to the configured duration
    Reset,
    /// Current turn and timer
    Status,
    /// Full turn order
    Order,
    /// List encounter descriptions in the encounter directory
    Files,
    /// Write the image summary file
    Summary,
    /// Show the active configuration
    Config,
    /// Change how the encounter file is chosen
    SetPolicy {
        #[arg(value_enum)]
        policy: SelectionPolicy,
    },
    /// Change the encounter directory
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

fn respond(line: &str, state: &mut AppState, requests: &RequestSender) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "encounter-manager".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let request: Option<Request> = match cli.command {
        Some(Commands::Next) => Some(Command::Advance.into()),
        Some(Commands::Prev) => Some(Command::Retreat.into()),
        Some(Commands::Start) => Some(Command::StartTimer.into()),
        Some(Commands::Pause) => Some(Command::PauseTimer.into()),
        Some(Commands::Reset) => Some(Command::ResetTimer.into()),
        Some(Commands::Status) => Some(Request::Status),
        Some(Commands::Order) => Some(Request::ShowOrder),
        Some(Commands::Files) => {
            commands::list_files(state);
            None
        }
        Some(Commands::Summary) => {
            commands::export_summary(state);
            None
        }
        Some(Commands::Config) => {
            commands::show_config(state);
            None
        }
        Some(Commands::SetPolicy { policy }) => {
            commands::set_policy(state, policy);
            None
        }
        Some(Commands::SetDirectory { path }) => {
            commands::set_directory(state, &path);
            None
        }
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => None,
    };

    if let Some(request) = request {
        requests
            .send(request)
            .map_err(|_| "error: session driver stopped".to_string())?;
    }
    Ok(false)
}
