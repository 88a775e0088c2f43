//! CLI for the GitHub profile lookup.
//!
//! Looks up a single profile, prints or toggles stored preferences, or runs
//! an interactive session where typing triggers debounced searches.

use clap::{Parser, Subcommand};
use profile_lookup::{
    default_config_path, default_storage_path, detect_prefers_dark, load_config,
    load_config_or_default, App, AppError, FileStore, GitHubClient, LookupConfig, SearchOutcome,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinSet, LocalSet};
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type GitHubApp = App<GitHubClient, FileStore>;

/// GitHub profile lookup - Search developer profiles and their latest repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file.
    #[arg(long, env = "PROFILE_LOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the local store file (history and theme).
    #[arg(long, env = "PROFILE_LOOKUP_STORE")]
    store: Option<PathBuf>,

    /// Users endpoint of the API.
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one profile and print it.
    Lookup {
        /// GitHub username.
        username: String,
    },

    /// Print the lookup history, most recent first.
    History,

    /// Print the stored theme, or toggle it.
    Theme {
        /// Flip between light and dark.
        #[arg(long)]
        toggle: bool,
    },

    /// Interactive session (default).
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    // Another provider may already be installed; either one serves octocrab.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    // Controllers are single-threaded and spawn local tasks.
    let local = LocalSet::new();
    match local.run_until(run(args)).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so they never interleave with the painted page.
/// Filtering is controlled by `RUST_LOG` and defaults to "warn".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ExitCode, AppError> {
    let config = resolve_config(&args)?;
    let storage_path = args
        .store
        .clone()
        .or_else(|| config.storage_path.clone())
        .unwrap_or_else(default_storage_path);
    let prefers_dark = config.prefers_dark.unwrap_or_else(detect_prefers_dark);

    let app = App::github(&config, &storage_path, prefers_dark)?;
    app.init();

    match args.command.unwrap_or(Command::Interactive) {
        Command::Lookup { username } => lookup(&app, &username).await,
        Command::History => {
            for entry in app.history() {
                println!("{entry}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Theme { toggle } => {
            let theme = if toggle {
                app.theme().toggle()
            } else {
                app.theme().current()
            };
            println!("{}", theme.as_str());
            Ok(ExitCode::SUCCESS)
        }
        Command::Interactive => {
            interactive(&app).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Loads the config file given on the command line (which must exist), or
/// the default one (which may not), then applies flag overrides.
fn resolve_config(args: &Args) -> Result<LookupConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_config_or_default(&default_config_path())?,
    };

    if let Some(api_base) = &args.api_base {
        config.api_base = api_base.clone();
        config.validate(std::path::Path::new("--api-base"))?;
    }

    Ok(config)
}

async fn lookup(app: &GitHubApp, username: &str) -> Result<ExitCode, AppError> {
    let outcome = app.lookup(username).await;
    print!("{}", app.paint()?);

    Ok(match outcome {
        SearchOutcome::Found { .. } => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    })
}

/// Runs the interactive session until `:quit` or end of input.
///
/// Plain lines replace the input and schedule an automatic search; an empty
/// line submits. Commands start with `:`. At end of input, searches already
/// submitted or scheduled finish before the final page is painted.
async fn interactive(app: &GitHubApp) -> Result<(), AppError> {
    let mut pages = app.document().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches = JoinSet::new();

    repaint(app)?;
    print_help();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(app, &line, &mut searches) {
                        return Ok(());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            },
            changed = pages.changed() => {
                if changed.is_err() {
                    break;
                }
                repaint(app)?;
            }
        }
    }

    while searches.join_next().await.is_some() {}
    app.search().settle().await;
    repaint(app)
}

/// Handles one line of interactive input. Returns `false` to quit.
fn handle_line(app: &GitHubApp, line: &str, searches: &mut JoinSet<()>) -> bool {
    let search = app.search().clone();
    let trimmed = line.trim();

    match trimmed.split_once(' ').unwrap_or((trimmed, "")) {
        (":quit" | ":q", _) => return false,
        (":help", _) => print_help(),
        (":theme", _) => {
            app.theme().toggle();
        }
        (":submit", _) | ("", _) => {
            searches.spawn_local(async move {
                search.submit().await;
            });
        }
        (":history", number) => match pick_history(app, number) {
            Some(identifier) => {
                searches.spawn_local(async move {
                    search.select_history(&identifier).await;
                });
            }
            None => println!("No history entry '{number}'"),
        },
        _ => search.input_changed(line),
    }

    true
}

/// Resolves a one-based history shortcut number.
fn pick_history(app: &GitHubApp, number: &str) -> Option<String> {
    let index = number.trim().parse::<usize>().ok()?.checked_sub(1)?;
    app.document()
        .snapshot()
        .history
        .get(index)
        .map(|shortcut| shortcut.identifier.clone())
}

fn repaint(app: &GitHubApp) -> Result<(), AppError> {
    let text = app.paint()?;
    if std::io::stdout().is_terminal() {
        // Clear screen and move the cursor home.
        print!("\x1b[2J\x1b[H");
    }
    print!("{text}");
    Ok(())
}

fn print_help() {
    println!();
    println!("Type a username to search as you type, or press Enter to submit.");
    println!("Commands: :history <n>, :theme, :submit, :help, :quit");
}
